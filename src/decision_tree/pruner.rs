//! Post-pruning against a validation set.
use crate::classifier::Classifier;
use crate::common::checker;
use crate::error::{Result, TreeError};
use crate::sample::Dataset;
use crate::trace::{NoTrace, TraceEvent, TraceSink};

use super::dtree_classifier::DecisionTreeClassifier;
use super::node::Node;


/// The penalty per leaf set as default.
pub const DEFAULT_PENALTY: f64 = 0.5;


/// One tree examined while pruning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruneStep {
    /// Zero for the unpruned tree, then one per trim.
    pub round: usize,
    /// Depth of the deepest leaf.
    pub max_depth: usize,
    /// Number of leaves.
    pub leaves: usize,
    /// Pessimistic error estimate.
    pub estimate: f64,
    /// Whether the tree was kept as the best so far.
    pub accepted: bool,
}


/// Simplifies a grown tree level by level from the bottom,
/// as long as the pessimistic error estimate
/// `(misclassified + leaves * penalty) / |validation|`
/// strictly decreases.
///
/// # Example
///
/// ```no_run
/// use minitree::prelude::*;
///
/// let data = Dataset::from_csv("/path/to/file.csv").unwrap();
/// let (train, valid) = data.split_holdout(0.3, 1234).unwrap();
///
/// let tree = DecisionTreeBuilder::new("class")
///     .attribute("color", Scale::Nominal)
///     .build()
///     .fit(&train)
///     .unwrap();
///
/// let pruned = Pruner::new()
///     .penalty(1.0)
///     .prune(&tree, &valid)
///     .unwrap();
/// assert!(pruned.leaves() <= tree.leaves());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pruner {
    penalty: f64,
}


impl Default for Pruner {
    fn default() -> Self {
        Self::new()
    }
}


impl Pruner {
    /// Construct a new instance of [`Pruner`]
    /// with penalty [`DEFAULT_PENALTY`].
    pub fn new() -> Self {
        Self { penalty: DEFAULT_PENALTY }
    }


    /// Set the penalty charged per leaf.
    /// Larger penalties favor smaller trees.
    /// The value is checked when pruning.
    #[inline]
    pub fn penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }


    /// Returns the penalty charged per leaf.
    #[inline]
    pub fn penalty_per_leaf(&self) -> f64 {
        self.penalty
    }


    /// Prune a copy of `tree` against `validation`.
    /// `tree` itself is left untouched.
    pub fn prune(&self, tree: &DecisionTreeClassifier, validation: &Dataset)
        -> Result<DecisionTreeClassifier>
    {
        self.prune_traced(tree, validation, &mut NoTrace)
    }


    /// Prune a copy of `tree` against `validation`,
    /// reporting every examined tree to `sink`.
    pub fn prune_traced(
        &self,
        tree: &DecisionTreeClassifier,
        validation: &Dataset,
        sink: &mut dyn TraceSink,
    ) -> Result<DecisionTreeClassifier>
    {
        let (pruned, history) = self.prune_with_history(tree, validation)?;
        for step in history {
            sink.record(TraceEvent::Prune {
                round: step.round,
                max_depth: step.max_depth,
                leaves: step.leaves,
                estimate: step.estimate,
                accepted: step.accepted,
            });
        }
        Ok(pruned)
    }


    /// Prune a copy of `tree` against `validation`.
    /// Returns the pruned tree and every tree examined on the way,
    /// starting from `tree` itself at round `0`.
    pub fn prune_with_history(
        &self,
        tree: &DecisionTreeClassifier,
        validation: &Dataset,
    ) -> Result<(DecisionTreeClassifier, Vec<PruneStep>)>
    {
        checker::check_penalty(self.penalty)?;
        if validation.is_empty() {
            return Err(TreeError::EmptyValidationSet);
        }
        if validation.schema().names() != tree.schema().names() {
            return Err(TreeError::SchemaMismatch);
        }


        let class = tree.class();
        let mut best = tree.root().clone();
        let mut best_estimate = self.estimate(&best, validation, class);

        let mut history = vec![PruneStep {
            round: 0,
            max_depth: best.deepest(),
            leaves: best.leaves(),
            estimate: best_estimate,
            accepted: true,
        }];


        let mut round = 0;
        while !best.is_leaf() {
            round += 1;

            let mut trimmed = best.clone();
            let deepest = trimmed.deepest();
            trimmed.merge_deepest(deepest, class);

            let estimate = self.estimate(&trimmed, validation, class);
            let accepted = estimate < best_estimate;
            history.push(PruneStep {
                round,
                max_depth: trimmed.deepest(),
                leaves: trimmed.leaves(),
                estimate,
                accepted,
            });

            if !accepted { break; }

            best = trimmed;
            best_estimate = estimate;
        }

        Ok((tree.with_root(best), history))
    }


    /// Pessimistic error estimate of `root` on `validation`.
    #[inline]
    fn estimate(&self, root: &Node, validation: &Dataset, class: usize) -> f64 {
        let mistakes = root.misclassified(validation, class) as f64;
        let leaves = root.leaves() as f64;
        (mistakes + leaves * self.penalty) / validation.len() as f64
    }
}
