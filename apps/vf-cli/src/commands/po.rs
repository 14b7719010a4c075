// po.rs — Purchase-order status graph subcommands.

use clap::Subcommand;
use vf_approval::{next_po_statuses, po_status_graph, PoStatus};

#[derive(Subcommand)]
pub enum PoCommands {
    /// Show the allowed next statuses for a purchase order.
    Next {
        /// Current purchase-order status (e.g., "pending_approval").
        status: String,
    },
    /// Find a transition path between two purchase-order statuses.
    Path { from: String, to: String },
}

pub fn execute(cmd: &PoCommands) -> anyhow::Result<()> {
    match cmd {
        PoCommands::Next { status } => {
            let status: PoStatus = status.parse()?;
            let targets = next_po_statuses(status);
            if targets.is_empty() {
                println!("{status} is terminal — no outbound transitions");
            } else {
                let rendered: Vec<_> = targets.iter().map(|s| s.as_str()).collect();
                println!("{status} → {}", rendered.join(", "));
            }
            Ok(())
        }
        PoCommands::Path { from, to } => {
            let from: PoStatus = from.parse()?;
            let to: PoStatus = to.parse()?;
            let decision = po_status_graph().can_transition_to(from, to);
            if !decision.allowed {
                println!(
                    "no path: {}",
                    decision.reason.unwrap_or_else(|| "not allowed".to_string())
                );
                return Ok(());
            }
            match decision.path {
                Some(path) => {
                    let rendered: Vec<_> = path.iter().map(|s| s.as_str()).collect();
                    println!("{}", rendered.join(" → "));
                }
                None => println!("{from} → {to} (direct)"),
            }
            Ok(())
        }
    }
}
