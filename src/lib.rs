//! Symbolic reachability over networks of synchronizing finite-state
//! automata, encoded as Reduced Ordered Binary Decision Diagrams.
//!
//! The public entry point is [`run_network`]: it reads a synchronization
//! file and a list of per-automaton model files, builds the symbolic
//! encoding (see [`network`]), and drives the forward-reachability fixpoint
//! (see [`reachability`]) to completion.

pub mod automaton;
pub mod error;
pub mod label;
pub mod network;
pub mod parser;
pub mod reachability;

use std::path::{Path, PathBuf};

use num_bigint::BigInt;

pub use error::Error;
use network::{NamedComponent, Network};

/// Options threaded through a single run; mirrors the CLI's flags (spec §6).
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Print per-iteration progress via the `log` crate at `info` level.
    pub verbose: bool,
    /// Validate that every transition endpoint is a declared state before
    /// encoding, rather than letting the Label Encoder lookup fail lazily.
    pub strict_refs: bool,
    /// Abort once the reachable-set `Bdd` exceeds this many nodes.
    pub node_limit: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            verbose: false,
            strict_refs: false,
            node_limit: None,
        }
    }
}

/// Summary of a completed run: the reachable-state count (exact, via
/// arbitrary-precision arithmetic since the state space is the whole point
/// of the symbolic compression) and the approximate transition count
/// (spec §4.4, §9 — left approximate by design).
#[derive(Debug, Clone)]
pub struct RunReport {
    pub reachable_states: BigInt,
    pub approx_transitions: f64,
    pub iterations: usize,
}

/// Runs the full pipeline: parse, encode, compose, reach fixpoint.
///
/// `model_paths` must be given in the same order the network should compose
/// its automata in (spec §4.3 requires a fixed declaration order for
/// reproducibility). Each automaton's name is taken from its file stem.
pub fn run_network(
    sync_path: &Path,
    model_paths: &[PathBuf],
    options: &RunOptions,
) -> Result<RunReport, Error> {
    let alphabet = parser::read_sync_file(sync_path)?;

    let mut components = Vec::with_capacity(model_paths.len());
    for path in model_paths {
        let raw = parser::read_model_file(path)?;
        components.push(NamedComponent {
            name: component_name(path),
            raw,
        });
    }

    let network = Network::build(alphabet, components, options)?;

    let dont_care_bits = (network.action_var_ids.len() + network.primed_var_ids.len()) as u32;
    let result = reachability::reachable(
        &network.init,
        &network.transition,
        &network.state_var_ids,
        &network.action_var_ids,
        &network.renaming,
        options.node_limit,
    )
    // The partial `reach`/iteration count stay available to callers who need
    // them (see `PartialReachability`); `run_network` only needs the error.
    .map_err(|failure| failure.error)?;

    let reachable_states = reachability::state_count_exact(&result.reach, dont_care_bits);
    let approx_transitions = reachability::approx_transition_count(&network, &result.reach);

    Ok(RunReport {
        reachable_states,
        approx_transitions,
        iterations: result.iterations,
    })
}

fn component_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
