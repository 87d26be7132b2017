//! Label Encoder: maps an ordered list of distinct labels onto minterms over
//! a freshly allocated block of BDD variables.
//!
//! Allocation happens in two phases, mirroring how the rest of this crate's
//! BDD variables come into being: a [`LabelVars`] reserves its variables
//! through a shared [`BddVariableSetBuilder`] while the network is still
//! being assembled, and is only turned into a [`LabelEncoding`] (with real
//! per-label `Bdd`s) once the builder has been finalized into a
//! `BddVariableSet`.

use std::collections::HashMap;

use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet, BddVariableSetBuilder};

use crate::error::EncodingError;

/// Number of bits needed to uniquely index `count` distinct labels.
///
/// `bit_width(1) == 0`: a single label needs no variables at all.
pub fn bit_width(count: usize) -> u32 {
    if count <= 1 {
        0
    } else {
        usize::BITS - (count - 1).leading_zeros()
    }
}

/// A label list with its variable block allocated, but not yet encoded.
#[derive(Debug, Clone)]
pub struct LabelVars {
    labels: Vec<String>,
    index_of: HashMap<String, usize>,
    vars: Vec<BddVariable>,
}

impl LabelVars {
    /// Allocates `⌈log₂ labels.len()⌉` fresh variables named `{prefix}0`,
    /// `{prefix}1`, ... through `builder`.
    pub fn allocate(
        builder: &mut BddVariableSetBuilder,
        labels: &[String],
        prefix: &str,
    ) -> Result<LabelVars, EncodingError> {
        if labels.is_empty() {
            return Err(EncodingError::EmptyLabelList {
                prefix: prefix.to_string(),
            });
        }

        let mut index_of = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index_of.insert(label.clone(), i).is_some() {
                return Err(EncodingError::DuplicateLabel {
                    context: prefix.to_string(),
                    label: label.clone(),
                });
            }
        }

        let width = bit_width(labels.len());
        let vars = (0..width)
            .map(|i| builder.make_variable(format!("{prefix}{i}").as_str()))
            .collect();

        Ok(LabelVars {
            labels: labels.to_vec(),
            index_of,
            vars,
        })
    }

    pub fn vars(&self) -> &[BddVariable] {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Builds the concrete per-label minterm `Bdd`s, consuming this
    /// allocation. Requires the `BddVariableSet` the variables were
    /// registered into.
    pub fn encode(self, ctx: &BddVariableSet) -> LabelEncoding {
        let bdds = (0..self.labels.len())
            .map(|i| minterm(ctx, &self.vars, i))
            .collect();
        LabelEncoding {
            labels: self.labels,
            index_of: self.index_of,
            vars: self.vars,
            bdds,
        }
    }
}

fn minterm(ctx: &BddVariableSet, vars: &[BddVariable], index: usize) -> Bdd {
    let width = vars.len();
    let mut bdd = ctx.mk_true();
    for (j, &var) in vars.iter().enumerate() {
        let shift = width - 1 - j;
        let bit_set = (index >> shift) & 1 == 1;
        let literal = if bit_set {
            ctx.mk_var(var)
        } else {
            ctx.mk_var(var).not()
        };
        bdd = bdd.and(&literal);
    }
    bdd
}

/// A label list together with its minterm `Bdd` per label.
#[derive(Debug, Clone)]
pub struct LabelEncoding {
    labels: Vec<String>,
    index_of: HashMap<String, usize>,
    vars: Vec<BddVariable>,
    bdds: Vec<Bdd>,
}

impl LabelEncoding {
    pub fn vars(&self) -> &[BddVariable] {
        &self.vars
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn bdd_of(&self, label: &str) -> Option<&Bdd> {
        self.index_of.get(label).map(|&i| &self.bdds[i])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of.contains_key(label)
    }
}
