use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn, LevelFilter};
use nexthop::concepts::node::Node;
use nexthop::framework::{StepParam, Traversal, TraversalExtension, TraversalStep};
use nexthop::step::{NextHopExtension, NEXT_HOP_IDENT};
use simplelog::*;

#[derive(Parser)]
#[command(name = "snapshot-query")]
#[command(about = "Resolve next hops across a topology snapshot", long_about = None)]
struct Cli {
    /// JSON array of nodes, each `{"ID": ..., "Metadata": {...}}`
    #[arg(short, long, default_value = "./snapshot.json")]
    snapshot: PathBuf,

    /// address to resolve toward
    #[arg(short, long)]
    destination: String,

    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    TermLogger::init(cli.log_level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;

    let raw = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("Unable to read snapshot {}", cli.snapshot.display()))?;
    let nodes: Vec<Node> = serde_json::from_str(&raw).context("Snapshot is not a list of nodes")?;
    info!("Loaded {} nodes from {}", nodes.len(), cli.snapshot.display());

    let extension = NextHopExtension::<Node>::new();
    let step = extension
        .parse_step(NEXT_HOP_IDENT, &[StepParam::Str(cli.destination)])?
        .context("NextHop step is not registered")?;

    let hops = step.exec(&Traversal::Vertices(nodes.iter().collect()))?;
    for warning in hops.warnings() {
        warn!("{warning}");
    }
    info!("{} of {} nodes have a next hop toward {}", hops.len(), nodes.len(), step.destination());

    println!("{}", serde_json::to_string_pretty(&hops)?);
    Ok(())
}
