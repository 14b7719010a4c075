// diff.rs — Document diff command.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use vf_diff::{compute_json_patch_with, group_by_section, value_at_path, Equality};

#[derive(Args)]
pub struct DiffArgs {
    /// Source document (JSON file).
    source: PathBuf,
    /// Target document (JSON file).
    target: PathBuf,
    /// Group operations by top-level section.
    #[arg(long)]
    group: bool,
    /// Use the conservative equality policy (flag structurally-equal
    /// arrays as changed).
    #[arg(long)]
    conservative: bool,
    /// Print the raw patch as JSON.
    #[arg(long)]
    json: bool,
}

pub fn execute(args: &DiffArgs) -> anyhow::Result<()> {
    let source: serde_json::Value = read_document(&args.source)?;
    let target: serde_json::Value = read_document(&args.target)?;

    let equality = if args.conservative {
        Equality::Conservative
    } else {
        Equality::Deep
    };
    let patch = compute_json_patch_with(&source, &target, equality);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&patch)?);
        return Ok(());
    }
    if patch.is_empty() {
        println!("documents are identical");
        return Ok(());
    }

    if args.group {
        for (section, operations) in group_by_section(&patch) {
            println!("[{section}]");
            for op in &operations {
                print_operation(op, &source);
            }
        }
    } else {
        for op in &patch {
            print_operation(op, &source);
        }
    }
    Ok(())
}

fn read_document(path: &PathBuf) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_operation(op: &vf_diff::PatchOperation, source: &serde_json::Value) {
    use vf_diff::PatchOperation::*;
    match op {
        Add { path, value } => println!("  + {path} = {value}"),
        Remove { path } => println!("  - {path}"),
        Replace { path, value } => {
            // Recover the old value for before/after display.
            match value_at_path(source, path) {
                Some(old) => println!("  ~ {path}: {old} → {value}"),
                None => println!("  ~ {path} → {value}"),
            }
        }
    }
}
