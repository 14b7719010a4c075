// status.rs — Component lifecycle subcommands: list, info, next, validate, path.

use clap::Subcommand;
use vf_lifecycle::{
    can_transition_to, progress_percentage, status_metadata, validate_transition,
    ComponentStatus,
};
use vf_service::{next_states, NextStatesRequest};

#[derive(Subcommand)]
pub enum StatusCommands {
    /// List every lifecycle status with its stage and progress.
    List,
    /// Show the metadata for one status.
    Info {
        /// Status name (e.g., "compliance_pending").
        status: String,
    },
    /// Show the valid targets and transition options from a status.
    Next {
        /// Current status name.
        status: String,
        /// Print the full response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check whether a transition would be accepted.
    Validate {
        from: String,
        to: String,
        /// Trigger event accompanying the transition.
        #[arg(long)]
        event: String,
        /// Role requesting the transition.
        #[arg(long)]
        role: String,
    },
    /// Find a multi-step transition path between two statuses.
    Path { from: String, to: String },
    /// Show approximate lifecycle progress for a status.
    Progress {
        /// Status name.
        status: String,
    },
}

pub fn execute(cmd: &StatusCommands) -> anyhow::Result<()> {
    match cmd {
        StatusCommands::List => list(),
        StatusCommands::Info { status } => info(status),
        StatusCommands::Next { status, json } => next(status, *json),
        StatusCommands::Validate {
            from,
            to,
            event,
            role,
        } => validate(from, to, event, role),
        StatusCommands::Path { from, to } => path(from, to),
        StatusCommands::Progress { status } => progress(status),
    }
}

fn list() -> anyhow::Result<()> {
    for status in ComponentStatus::ALL {
        let meta = status_metadata(status);
        println!(
            "{:<20} {:<12} {:>3}%  {}",
            status,
            meta.stage,
            progress_percentage(status),
            meta.label
        );
    }
    Ok(())
}

fn info(status: &str) -> anyhow::Result<()> {
    let status: ComponentStatus = status.parse()?;
    let meta = status_metadata(status);
    println!("{} ({})", meta.label, status);
    println!("  stage: {}", meta.stage);
    println!("  {}", meta.description);
    if !meta.required_actions.is_empty() {
        println!("  required actions: {}", meta.required_actions.join(", "));
    }
    if !meta.stakeholders.is_empty() {
        println!("  stakeholders: {}", meta.stakeholders.join(", "));
    }
    Ok(())
}

fn next(status: &str, json: bool) -> anyhow::Result<()> {
    let current_status: ComponentStatus = status.parse()?;
    let response = next_states(NextStatesRequest {
        component_id: String::new(),
        current_status,
    });
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    if response.next_possible_states.is_empty() {
        println!("{current_status} is terminal — no outbound transitions");
        return Ok(());
    }
    for option in &response.available_transitions {
        println!(
            "{:<28} → {}  (roles: {})",
            option.trigger_event,
            option
                .allowed_target_states
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            option.roles_allowed.join(", ")
        );
    }
    Ok(())
}

fn validate(from: &str, to: &str, event: &str, role: &str) -> anyhow::Result<()> {
    let from: ComponentStatus = from.parse()?;
    let to: ComponentStatus = to.parse()?;
    let result = validate_transition(from, to, event, role);
    if result.valid {
        println!("ok: {from} → {to}");
        for warning in &result.warnings {
            println!("  warning: {warning}");
        }
    } else {
        for error in &result.errors {
            println!("rejected: {error}");
        }
    }
    Ok(())
}

fn progress(status: &str) -> anyhow::Result<()> {
    let status: ComponentStatus = status.parse()?;
    let meta = status_metadata(status);
    println!(
        "{status}: {}% ({} stage)",
        progress_percentage(status),
        meta.stage
    );
    Ok(())
}

fn path(from: &str, to: &str) -> anyhow::Result<()> {
    let from: ComponentStatus = from.parse()?;
    let to: ComponentStatus = to.parse()?;
    let decision = can_transition_to(from, to);
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
            if let Some(reason) = decision.reason {
                println!("  ({reason})");
            }
        }
        None => println!("{from} → {to} (direct)"),
    }
    Ok(())
}
