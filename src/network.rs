//! Network Composer (spec §4.3): allocates every BDD variable block through
//! one shared builder (action vars first, then per-automaton state/primed
//! blocks in declaration order, per spec §5/§6), then assembles the global
//! initial-state BDD and the global transition relation under CSP-style
//! synchronization on shared labels and independent interleaving on `τ`.

use std::collections::{HashMap, HashSet};

use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet, BddVariableSetBuilder};

use crate::automaton::{ActionLabel, AutomatonEncoding, ComponentModel};
use crate::error::EncodingError;
use crate::label::{bit_width, LabelEncoding, LabelVars};
use crate::parser::RawModel;
use crate::RunOptions;

/// One component's parsed-but-not-yet-encoded input: its declared name and
/// the raw contents of its `*.modgraph` file.
pub struct NamedComponent {
    pub name: String,
    pub raw: RawModel,
}

/// Renames a `Bdd` over primed state variables back to the corresponding
/// unprimed ones, using the "comparator + project" technique: conjoin with
/// `⋀ (unprimed ⟺ primed)` then existentially quantify away the primed
/// variables. This BDD binding exposes no direct rename primitive, so the
/// comparator has to be built once and reused for every fixpoint iteration.
#[derive(Debug, Clone)]
pub struct VarRenaming {
    comparator: Bdd,
    primed_vars: Vec<BddVariable>,
}

impl VarRenaming {
    fn build(ctx: &BddVariableSet, automata: &[AutomatonEncoding]) -> VarRenaming {
        let mut comparator = ctx.mk_true();
        let mut primed_vars = Vec::new();
        for automaton in automata {
            for (&unprimed, &primed) in automaton
                .state_vars
                .vars()
                .iter()
                .zip(automaton.primed_vars.vars().iter())
            {
                let unprimed_lit = ctx.mk_var(unprimed);
                let primed_lit = ctx.mk_var(primed);
                comparator = comparator.and(&unprimed_lit.iff(&primed_lit));
                primed_vars.push(primed);
            }
        }
        VarRenaming {
            comparator,
            primed_vars,
        }
    }

    /// Renames a `Bdd` over primed state vars to one over the matching
    /// unprimed vars; any other variable (action vars, or unprimed state
    /// vars already present) passes through unchanged.
    pub fn rename_primed_to_unprimed(&self, bdd: &Bdd) -> Bdd {
        bdd.and(&self.comparator).project(&self.primed_vars)
    }

    /// Number of primed state variables across the whole network — one of
    /// the don't-care counts the Reachability Engine needs to correct a raw
    /// `cardinality()` down to an actual reachable-state count (spec §4.4).
    pub fn primed_var_count(&self) -> usize {
        self.primed_vars.len()
    }
}

/// The fully encoded network: global initial state, global transition
/// relation, and the variable bookkeeping the Reachability Engine needs to
/// drive its fixpoint.
pub struct Network {
    pub ctx: BddVariableSet,
    pub action_vars: Option<LabelEncoding>,
    pub automata: Vec<AutomatonEncoding>,
    pub init: Bdd,
    pub transition: Bdd,
    pub state_var_ids: Vec<BddVariable>,
    pub primed_var_ids: Vec<BddVariable>,
    pub action_var_ids: Vec<BddVariable>,
    pub renaming: VarRenaming,
}

impl Network {
    /// Builds the network from an ordered action alphabet and an ordered
    /// list of named, raw component models (spec §4.3).
    pub fn build(
        alphabet: Vec<String>,
        components: Vec<NamedComponent>,
        options: &RunOptions,
    ) -> Result<Network, EncodingError> {
        assert_names_distinct(&components)?;

        let models: Vec<ComponentModel> = components
            .into_iter()
            .map(|c| ComponentModel::from_raw(c.name, c.raw, &alphabet))
            .collect::<Result<_, _>>()?;

        if options.strict_refs {
            for model in &models {
                model.validate_references()?;
            }
        }

        assert_state_var_names_disjoint(&models)?;

        let mut builder = BddVariableSetBuilder::new();
        let action_alloc = if alphabet.is_empty() {
            None
        } else {
            Some(LabelVars::allocate(&mut builder, &alphabet, "act")?)
        };

        let mut per_component = Vec::with_capacity(models.len());
        for model in models {
            let state_alloc =
                LabelVars::allocate(&mut builder, &model.states, &format!("{}state", model.name))?;
            let primed_alloc = LabelVars::allocate(
                &mut builder,
                &model.states,
                &format!("primed{}state", model.name),
            )?;
            per_component.push((model, state_alloc, primed_alloc));
        }

        let ctx = builder.build();
        let action_vars = action_alloc.map(|alloc| alloc.encode(&ctx));

        let mut automata = Vec::with_capacity(per_component.len());
        for (model, state_alloc, primed_alloc) in per_component {
            let state_enc = state_alloc.encode(&ctx);
            let primed_enc = primed_alloc.encode(&ctx);
            automata.push(AutomatonEncoding::build(
                &ctx,
                model,
                state_enc,
                primed_enc,
                action_vars.as_ref(),
            )?);
        }

        let init = automata
            .iter()
            .fold(ctx.mk_true(), |acc, a| acc.and(&a.init));

        let transition = build_transition_relation(&ctx, &automata, &alphabet);

        let state_var_ids = automata
            .iter()
            .flat_map(|a| a.state_vars.vars().to_vec())
            .collect();
        let primed_var_ids = automata
            .iter()
            .flat_map(|a| a.primed_vars.vars().to_vec())
            .collect();
        let action_var_ids = action_vars
            .as_ref()
            .map(|enc| enc.vars().to_vec())
            .unwrap_or_default();

        let renaming = VarRenaming::build(&ctx, &automata);

        Ok(Network {
            ctx,
            action_vars,
            automata,
            init,
            transition,
            state_var_ids,
            primed_var_ids,
            action_var_ids,
            renaming,
        })
    }
}

/// `R_global = (⋁_{a∈A} sync_a) ∨ (⋁_i local_i)`, per spec §4.3.
fn build_transition_relation(
    ctx: &BddVariableSet,
    automata: &[AutomatonEncoding],
    alphabet: &[String],
) -> Bdd {
    let mut global = ctx.mk_false();

    for action in alphabet {
        let action_label = ActionLabel::Named(action.clone());
        let participants: Vec<&AutomatonEncoding> = automata
            .iter()
            .filter(|a| a.known_actions.contains(action))
            .collect();
        if participants.is_empty() {
            continue;
        }

        let mut sync_a = ctx.mk_true();
        for automaton in automata {
            if automaton.known_actions.contains(action) {
                sync_a = sync_a.and(&automaton.relations[&action_label]);
            } else {
                sync_a = sync_a.and(&automaton.identity);
            }
        }
        global = global.or(&sync_a);
    }

    for (i, automaton) in automata.iter().enumerate() {
        let tau_relation = &automaton.relations[&ActionLabel::Tau];
        if tau_relation.is_false() {
            continue;
        }
        let mut local_i = tau_relation.clone();
        for (j, other) in automata.iter().enumerate() {
            if i != j {
                local_i = local_i.and(&other.identity);
            }
        }
        global = global.or(&local_i);
    }

    global
}

fn assert_names_distinct(components: &[NamedComponent]) -> Result<(), EncodingError> {
    let mut seen = HashSet::with_capacity(components.len());
    for component in components {
        if !seen.insert(component.name.clone()) {
            return Err(EncodingError::NameCollision {
                name: component.name.clone(),
            });
        }
    }
    Ok(())
}

/// Spec §4.3: "the union of per-automaton state-var blocks must be pairwise
/// disjoint; the composer asserts this and fails if violated." Checked
/// against the variable *names* the Label Encoder would allocate, before any
/// variable is actually registered with the builder.
fn assert_state_var_names_disjoint(models: &[ComponentModel]) -> Result<(), EncodingError> {
    let mut seen: HashMap<String, String> = HashMap::new();
    for model in models {
        let width = bit_width(model.states.len());
        for prefix in [
            format!("{}state", model.name),
            format!("primed{}state", model.name),
        ] {
            for i in 0..width {
                let var_name = format!("{prefix}{i}");
                if let Some(owner) = seen.insert(var_name.clone(), model.name.clone()) {
                    if owner != model.name {
                        return Err(EncodingError::NonDisjointStateVariables {
                            automaton: model.name.clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
