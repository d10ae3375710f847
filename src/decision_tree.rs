//! Defines the decision tree learner, its classifier and the post-pruner.

/// Defines the builder of `DecisionTree`.
pub mod builder;
/// Defines the decision tree learner.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod dtree_classifier;
/// Defines the post-pruner.
pub mod pruner;

/// Defines the inner representations of `DecisionTreeClassifier`.
pub mod node;


pub use builder::{DecisionTreeBuilder, DEFAULT_GAIN_THRESHOLD, GAIN_EPSILON};
pub use dtree::DecisionTree;
pub use dtree_classifier::DecisionTreeClassifier;
pub use node::{BranchNode, LeafNode, Node};
pub use pruner::{Pruner, PruneStep, DEFAULT_PENALTY};


use crate::classifier::Classifier;
use crate::error::{Result, TreeError};
use crate::measure::Measure;
use crate::sample::{Dataset, Instance, Label};
use crate::strategy::AttributeSpec;
use crate::trace::TraceSink;


/// Grow a decision tree on `dataset` predicting `class`,
/// splitting on `specs` in the given order.
/// `measure` defaults to `Measure::Entropy`,
/// `gain_threshold` to [`DEFAULT_GAIN_THRESHOLD`].
pub fn build_tree(
    dataset: &Dataset,
    class: &str,
    specs: &[AttributeSpec],
    measure: Option<Measure>,
    gain_threshold: Option<f64>,
    trace: Option<&mut dyn TraceSink>,
) -> Result<DecisionTreeClassifier>
{
    let learner = specs.iter()
        .cloned()
        .fold(DecisionTreeBuilder::new(class), |builder, spec| builder.spec(spec))
        .measure(measure.unwrap_or_default())
        .gain_threshold(gain_threshold.unwrap_or(DEFAULT_GAIN_THRESHOLD))
        .build();

    match trace {
        Some(sink) => learner.fit_traced(dataset, sink),
        None => learner.fit(dataset),
    }
}


/// Classify `instance` with `tree`.
/// Returns `Label::Unclassified` if the instance reaches
/// a branch it has no key for.
#[inline]
pub fn classify(tree: &DecisionTreeClassifier, instance: &Instance) -> Label {
    tree.classify(instance)
}


/// Post-prune a copy of `tree` against `validation`.
/// `class` must name the attribute `tree` predicts.
/// `penalty` defaults to [`DEFAULT_PENALTY`].
pub fn prune(
    tree: &DecisionTreeClassifier,
    validation: &Dataset,
    class: &str,
    penalty: Option<f64>,
    trace: Option<&mut dyn TraceSink>,
) -> Result<DecisionTreeClassifier>
{
    if class != tree.class_attribute() {
        return Err(TreeError::ClassMismatch {
            expected: tree.class_attribute().to_string(),
            got: class.to_string(),
        });
    }

    let pruner = Pruner::new().penalty(penalty.unwrap_or(DEFAULT_PENALTY));
    match trace {
        Some(sink) => pruner.prune_traced(tree, validation, sink),
        None => pruner.prune(tree, validation),
    }
}
