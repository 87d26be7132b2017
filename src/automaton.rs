//! Data model (spec §3) and Automaton Encoder (spec §4.2).
//!
//! A [`ComponentModel`] is the parsed, name-resolved form of one `*.modgraph`
//! file: a list of state names (the first is the initial state) and a list
//! of transitions, each already classified as either a shared action or the
//! private/silent action `τ`. An [`AutomatonEncoding`] is the BDD form of
//! that model, built once the network's global variable set exists.

use std::collections::{BTreeSet, HashMap, HashSet};

use biodivine_lib_bdd::{Bdd, BddVariableSet};

use crate::error::EncodingError;
use crate::label::LabelEncoding;
use crate::parser::RawModel;

/// An action reference on a transition: either a name shared with other
/// components through the global alphabet, or the private action `τ` that
/// every component can always take unilaterally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionLabel {
    Tau,
    Named(String),
}

/// One component automaton, name-resolved against the global alphabet.
#[derive(Debug, Clone)]
pub struct ComponentModel {
    pub name: String,
    /// `states[0]` is the initial state.
    pub states: Vec<String>,
    pub transitions: Vec<(String, ActionLabel, String)>,
}

impl ComponentModel {
    /// Builds a `ComponentModel` from a parsed `*.modgraph` file. Any
    /// transition whose label is not a member of `alphabet` is rewritten to
    /// `τ`, per spec §4.2 — this also vacuously covers the empty-alphabet
    /// case (every transition becomes τ, and no action variables are ever
    /// allocated for this network).
    pub fn from_raw(
        name: String,
        raw: RawModel,
        alphabet: &[String],
    ) -> Result<ComponentModel, EncodingError> {
        let mut seen = HashSet::with_capacity(raw.states.len());
        for state in &raw.states {
            if !seen.insert(state.clone()) {
                return Err(EncodingError::DuplicateLabel {
                    context: format!("states of '{name}'"),
                    label: state.clone(),
                });
            }
        }

        let alphabet_set: HashSet<&str> = alphabet.iter().map(String::as_str).collect();
        let transitions = raw
            .transitions
            .into_iter()
            .map(|(src, label, dst)| {
                let action = if alphabet_set.contains(label.as_str()) {
                    ActionLabel::Named(label)
                } else {
                    ActionLabel::Tau
                };
                (src, action, dst)
            })
            .collect();

        Ok(ComponentModel {
            name,
            states: raw.states,
            transitions,
        })
    }

    /// The subset of the global alphabet this component actually uses —
    /// `K_i` in spec §3.
    pub fn known_actions(&self) -> BTreeSet<String> {
        self.transitions
            .iter()
            .filter_map(|(_, action, _)| match action {
                ActionLabel::Named(name) => Some(name.clone()),
                ActionLabel::Tau => None,
            })
            .collect()
    }

    /// Checks every transition's endpoints are declared states, ahead of
    /// BDD construction. Opt-in via `RunOptions::strict_refs`; when off, the
    /// same failure is instead reported lazily by the Label Encoder lookup
    /// in [`AutomatonEncoding::build`].
    pub fn validate_references(&self) -> Result<(), EncodingError> {
        let known: HashSet<&str> = self.states.iter().map(String::as_str).collect();
        for (src, _, dst) in &self.transitions {
            if !known.contains(src.as_str()) {
                return Err(EncodingError::UnknownReference {
                    automaton: self.name.clone(),
                    state: src.clone(),
                });
            }
            if !known.contains(dst.as_str()) {
                return Err(EncodingError::UnknownReference {
                    automaton: self.name.clone(),
                    state: dst.clone(),
                });
            }
        }
        Ok(())
    }
}

/// BDD encoding of one component automaton: `init_i`, `identity_i`, and the
/// per-action transition relations `R_i[a]` for `a ∈ K_i ∪ {τ}`.
#[derive(Debug, Clone)]
pub struct AutomatonEncoding {
    pub name: String,
    pub state_vars: LabelEncoding,
    pub primed_vars: LabelEncoding,
    pub init: Bdd,
    pub identity: Bdd,
    pub relations: HashMap<ActionLabel, Bdd>,
    pub known_actions: BTreeSet<String>,
}

impl AutomatonEncoding {
    /// Builds the BDD encoding of `model`, given its already-finalized
    /// unprimed (`state_vars`) and primed (`primed_vars`) state encodings —
    /// two independent [`LabelEncoding`]s over the same ordered state list,
    /// which is what lets `init`/`identity`/`relations` be assembled
    /// directly from per-state minterms without any runtime substitution.
    pub fn build(
        ctx: &BddVariableSet,
        model: ComponentModel,
        state_vars: LabelEncoding,
        primed_vars: LabelEncoding,
        action_vars: Option<&LabelEncoding>,
    ) -> Result<AutomatonEncoding, EncodingError> {
        let init = state_vars
            .bdd_of(&model.states[0])
            .expect("initial state is always the first entry of the allocated state list")
            .clone();

        let mut identity = ctx.mk_false();
        for state in &model.states {
            let unprimed = state_vars
                .bdd_of(state)
                .expect("every declared state has a minterm");
            let primed = primed_vars
                .bdd_of(state)
                .expect("every declared state has a primed minterm");
            identity = identity.or(&unprimed.and(primed));
        }

        let known_actions = model.known_actions();
        let mut relations: HashMap<ActionLabel, Bdd> = HashMap::new();
        relations.insert(ActionLabel::Tau, ctx.mk_false());
        for action in &known_actions {
            relations.insert(ActionLabel::Named(action.clone()), ctx.mk_false());
        }

        for (src, action, dst) in &model.transitions {
            let src_bdd = state_vars.bdd_of(src).ok_or_else(|| EncodingError::UnknownReference {
                automaton: model.name.clone(),
                state: src.clone(),
            })?;
            let dst_bdd = primed_vars.bdd_of(dst).ok_or_else(|| EncodingError::UnknownReference {
                automaton: model.name.clone(),
                state: dst.clone(),
            })?;
            let action_bdd = match action {
                ActionLabel::Tau => ctx.mk_true(),
                ActionLabel::Named(name) => action_vars
                    .and_then(|vars| vars.bdd_of(name))
                    .expect("from_raw only produces Named actions present in the global alphabet")
                    .clone(),
            };

            let step = src_bdd.and(&action_bdd).and(dst_bdd);
            let entry = relations
                .get_mut(action)
                .expect("relations pre-seeded from known_actions and Tau");
            *entry = entry.or(&step);
        }

        Ok(AutomatonEncoding {
            name: model.name,
            state_vars,
            primed_vars,
            init,
            identity,
            relations,
            known_actions,
        })
    }
}
