use crate::measure::Measure;
use crate::strategy::{AttributeSpec, Comparator, Scale};

use super::dtree::DecisionTree;


/// The gain threshold set as default.
/// A cluster whose impurity is below the threshold becomes a leaf.
pub const DEFAULT_GAIN_THRESHOLD: f64 = 0.0;
/// A best gain at or below this value does not split.
pub const GAIN_EPSILON: f64 = 1e-7;


/// A struct that builds [`DecisionTree`].
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```no_run
/// use minitree::prelude::*;
///
/// let learner = DecisionTreeBuilder::new("class")
///     .attribute("color", Scale::Nominal)
///     .attribute("length", Scale::Ratio)
///     .measure(Measure::Gini)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder {
    class: String,
    specs: Vec<AttributeSpec>,
    measure: Measure,
    gain_threshold: f64,
    gain_ratio: bool,
    parallel: bool,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`]
    /// that predicts the attribute named `class`.
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// measure: Measure::Entropy,
    /// gain_threshold: DEFAULT_GAIN_THRESHOLD == 0.0,
    /// gain_ratio: false,
    /// parallel: false,
    /// ```
    pub fn new<T: ToString>(class: T) -> Self {
        Self {
            class: class.to_string(),
            specs: Vec::new(),
            measure: Measure::default(),
            gain_threshold: DEFAULT_GAIN_THRESHOLD,
            gain_ratio: false,
            parallel: false,
        }
    }


    /// Allow splitting on the attribute named `name`.
    /// Attributes are evaluated in the order they are added;
    /// the first one wins a tie on gain.
    pub fn attribute<T: ToString>(mut self, name: T, scale: Scale) -> Self {
        self.specs.push(AttributeSpec::new(name, scale));
        self
    }


    /// Allow splitting on the attribute named `name`,
    /// sorting its values with `order`.
    pub fn attribute_ordered_by<T: ToString>(
        mut self,
        name: T,
        scale: Scale,
        order: Comparator,
    ) -> Self
    {
        self.specs.push(AttributeSpec::new(name, scale).ordered_by(order));
        self
    }


    /// Allow splitting with the given spec.
    pub fn spec(mut self, spec: AttributeSpec) -> Self {
        self.specs.push(spec);
        self
    }


    /// Set the impurity measure.
    /// Default value is `Measure::Entropy`.
    #[inline]
    pub fn measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }


    /// Set the gain threshold.
    /// Default value is [`DEFAULT_GAIN_THRESHOLD`].
    /// The value is checked when the tree is fitted.
    #[inline]
    pub fn gain_threshold(mut self, threshold: f64) -> Self {
        self.gain_threshold = threshold;
        self
    }


    /// Normalize gains by split information.
    /// Default is `false`.
    #[inline]
    pub fn gain_ratio(mut self, flag: bool) -> Self {
        self.gain_ratio = flag;
        self
    }


    /// Evaluate the attributes of each node in parallel.
    /// The grown tree is the same either way.
    /// Default is `false`.
    #[inline]
    pub fn parallel(mut self, flag: bool) -> Self {
        self.parallel = flag;
        self
    }


    /// Build a [`DecisionTree`].
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::from_components(
            self.class,
            self.specs,
            self.measure,
            self.gain_threshold,
            self.gain_ratio,
            self.parallel,
        )
    }
}
