//! Error types, one `thiserror` enum per concern, aggregated into a single
//! top-level [`Error`] for the public API.

use thiserror::Error;

/// Failures while reading `sync.modgraph` / `*.modgraph` files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model file '{path}' does not start with a 'states' section header")]
    MissingStatesHeader { path: String },

    #[error("model file '{path}' has no 'transitions' section header")]
    MissingTransitionsHeader { path: String },

    #[error("model file '{path}' declares no states")]
    EmptyStateList { path: String },

    #[error("model file '{path}' contains a malformed transition: '{line}'")]
    MalformedTransition { path: String, line: String },
}

/// Failures while building the BDD encoding of a network (spec §7).
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("label list for '{prefix}' is empty; at least one label is required")]
    EmptyLabelList { prefix: String },

    #[error("duplicate label '{label}' in {context}")]
    DuplicateLabel { context: String, label: String },

    #[error("two component automata share the name '{name}'")]
    NameCollision { name: String },

    #[error("automaton '{automaton}' references unknown state '{state}'")]
    UnknownReference { automaton: String, state: String },

    #[error(
        "state variables of automaton '{automaton}' are not disjoint from an earlier automaton's"
    )]
    NonDisjointStateVariables { automaton: String },
}

/// Failures during the forward-reachability fixpoint.
#[derive(Debug, Error)]
pub enum ReachabilityError {
    #[error(
        "BDD size limit exceeded after {iterations} iteration(s): {node_count} nodes (limit {limit})"
    )]
    BddLimitExceeded {
        node_count: usize,
        limit: usize,
        /// Number of forward-image iterations completed before the limit
        /// was hit; the caller's partial `reach` is returned alongside this
        /// error rather than carried inside it (spec §7).
        iterations: usize,
    },
}

/// Top-level error for the crate's public entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Reachability(#[from] ReachabilityError),
}

impl Error {
    /// Process exit code for the CLI: 0 is reserved for success by the
    /// caller, 1 covers malformed input and encoding failures, 2 is reserved
    /// for BDD resource exhaustion.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Reachability(ReachabilityError::BddLimitExceeded { .. }) => 2,
            _ => 1,
        }
    }
}
