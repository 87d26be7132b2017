//! Thin CLI (spec §6, "external collaborator"): selects inputs, sets the
//! verbose flag, prints the reachable count on completion. All other
//! diagnostics are left to the `log` backend this initializes.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use dd_net_reach::{run_network, RunOptions};

/// Symbolic reachability over a network of synchronizing finite-state
/// automata, encoded as BDDs.
#[derive(Parser, Debug)]
#[command(name = "dd_net_reach")]
#[command(about = "Compute the reachable global state space of a synchronizing automaton network")]
struct Args {
    /// Synchronization file naming the ordered, shared action alphabet.
    sync: PathBuf,

    /// Per-automaton model files, one `*.modgraph` per component, in
    /// declaration order.
    #[arg(required = true)]
    models: Vec<PathBuf>,

    /// Print per-iteration reachable-state progress.
    #[arg(short, long)]
    verbose: bool,

    /// Reject transitions referencing undeclared states before encoding,
    /// instead of letting the label lookup fail during encoding.
    #[arg(long = "strict-refs")]
    strict_refs: bool,

    /// Abort once the reachable-set BDD exceeds this many nodes.
    #[arg(long = "node-limit")]
    node_limit: Option<usize>,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    let options = RunOptions {
        verbose: args.verbose,
        strict_refs: args.strict_refs,
        node_limit: args.node_limit,
    };

    match run_network(&args.sync, &args.models, &options) {
        Ok(report) => {
            if args.verbose {
                println!("iterations: {}", report.iterations);
            }
            println!("reachable states: {}", report.reachable_states);
            println!("approximate transitions: {:.0}", report.approx_transitions);
        }
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(err.exit_code());
        }
    }
}
