//! Reachability Engine (spec §4.4): frontier-based forward image fixpoint
//! over the global transition relation, starting at the global initial
//! state and terminating at quiescence.

use std::ops::Shr;

use biodivine_lib_bdd::{Bdd, BddVariable};
use num_bigint::BigInt;

use crate::error::ReachabilityError;
use crate::network::{Network, VarRenaming};

/// Outcome of a completed fixpoint run: the reachable-state `Bdd` itself,
/// plus the iteration count callers may want to report in verbose mode.
pub struct ReachabilityResult {
    pub reach: Bdd,
    pub iterations: usize,
}

/// Returned instead of a bare [`ReachabilityError`] when the fixpoint aborts
/// before quiescence: spec §7 requires that "errors during reachability are
/// reported with the iteration count and partial `reach`", so the partial
/// result computed so far travels alongside the error rather than being
/// discarded.
pub struct PartialReachability {
    pub error: ReachabilityError,
    pub partial: ReachabilityResult,
}

/// Runs the forward-image fixpoint described in spec §4.4:
///
/// ```text
/// reach ← init; frontier ← init
/// repeat:
///   post′ = ∃ (state_vars ∪ action_vars) . (frontier ∧ transition)
///   post  = rename(primed → unprimed, post′)
///   new   = post ∧ ¬reach
///   reach |= new; frontier ← new
/// until new = false
/// ```
///
/// `node_limit`, if set, is checked against `reach`'s BDD node count after
/// every iteration and surfaces as [`ReachabilityError::BddLimitExceeded`],
/// wrapped in a [`PartialReachability`] carrying the iterations completed
/// and the `reach` computed so far.
pub fn reachable(
    init: &Bdd,
    transition: &Bdd,
    state_vars: &[BddVariable],
    action_vars: &[BddVariable],
    renaming: &VarRenaming,
    node_limit: Option<usize>,
) -> Result<ReachabilityResult, PartialReachability> {
    let mut quantify: Vec<BddVariable> = Vec::with_capacity(state_vars.len() + action_vars.len());
    quantify.extend_from_slice(state_vars);
    quantify.extend_from_slice(action_vars);

    let dont_care_bits = (action_vars.len() + renaming.primed_var_count()) as u32;

    let mut reach = init.clone();
    let mut frontier = init.clone();
    let mut iterations = 0usize;

    loop {
        if let Some(limit) = node_limit {
            if reach.size() > limit {
                let error = ReachabilityError::BddLimitExceeded {
                    node_count: reach.size(),
                    limit,
                    iterations,
                };
                return Err(PartialReachability {
                    error,
                    partial: ReachabilityResult { reach, iterations },
                });
            }
        }

        let post_primed = frontier.and(transition).project(&quantify);
        let post = renaming.rename_primed_to_unprimed(&post_primed);
        let new_states = post.and_not(&reach);

        if new_states.is_false() {
            log::info!(
                "reachability fixpoint reached after {iterations} iteration(s): states={}, size={}",
                state_count(&reach, dont_care_bits),
                reach.size()
            );
            return Ok(ReachabilityResult { reach, iterations });
        }

        reach = reach.or(&new_states);
        frontier = new_states;
        iterations += 1;
        log::info!(
            "iteration {iterations}: states={}, size={}",
            state_count(&reach, dont_care_bits),
            reach.size()
        );
    }
}

/// A `Bdd`'s raw `cardinality()` counts satisfying assignments over every
/// variable the manager knows about, including action and primed-state vars
/// a state-only set like `reach` never constrains. `dont_care_bits` is the
/// count of such extraneous variables; dividing compensates (spec §4.4).
pub fn state_count(reach: &Bdd, dont_care_bits: u32) -> f64 {
    reach.cardinality() / 2f64.powi(dont_care_bits as i32)
}

pub fn state_count_exact(reach: &Bdd, dont_care_bits: u32) -> BigInt {
    reach.exact_cardinality().shr(dont_care_bits)
}

/// Approximate transition count (spec §4.4, §9): `|transition ∧ reach|`
/// counted over the full unprimed-state ∪ action ∪ primed-state universe.
/// No `dont_care` correction applies here — that universe is exactly the
/// manager's full variable set, so don't-care completions of the action
/// channel on `τ`-transitions are counted uniformly, matching source intent.
pub fn approx_transition_count(network: &Network, reach: &Bdd) -> f64 {
    network.transition.and(reach).cardinality()
}
