//! Print a ClusterRole built from the built-in rule groups.
//!
//! Usage:
//!   cargo run --bin rolegen -- --name csi-e2e              # every group
//!   cargo run --bin rolegen -- --name csi-e2e -g csi -g events

use anyhow::Context;
use clap::Parser;

use kube_test_framework::policy::{rule_group, ClusterRoleBuilder, DEFAULT_RULE_GROUPS};

#[derive(Parser, Debug)]
#[command(name = "rolegen", about = "Generate ClusterRole YAML from rule groups")]
struct Args {
    /// metadata.name of the generated ClusterRole.
    #[arg(long)]
    name: String,

    /// Rule group to include (repeatable). Defaults to every group.
    #[arg(short = 'g', long = "group")]
    groups: Vec<String>,

    /// Label to attach, as key=value (repeatable).
    #[arg(short = 'l', long = "label")]
    labels: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut builder = ClusterRoleBuilder::new(&args.name);
    if args.groups.is_empty() {
        for group in DEFAULT_RULE_GROUPS {
            builder = builder.rule_group(group);
        }
    } else {
        for name in &args.groups {
            let group = rule_group(name).with_context(|| {
                let known: Vec<_> = DEFAULT_RULE_GROUPS.iter().map(|g| g.name).collect();
                format!("unknown rule group {name:?} (known: {})", known.join(", "))
            })?;
            builder = builder.rule_group(group);
        }
    }
    for label in &args.labels {
        let (key, value) = label
            .split_once('=')
            .with_context(|| format!("label {label:?} is not key=value"))?;
        builder = builder.label(key, value);
    }

    let yaml = serde_yaml::to_string(&builder.build())?;
    println!("---\n{yaml}");
    Ok(())
}
