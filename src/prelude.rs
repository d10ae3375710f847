//! Exports the standard learner, classifier and traits.
//!
pub use crate::sample::{
    Dataset,
    Instance,
    Label,
    Schema,
    Value,
};


pub use crate::measure::Measure;


pub use crate::strategy::{
    AttributeSpec,
    Comparator,
    Scale,
};


pub use crate::decision_tree::{
    // Learner
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,


    // Post-pruning
    Pruner,
    PruneStep,
};


pub use crate::classifier::Classifier;


pub use crate::trace::{
    TraceSink,
    TraceEvent,
    ConsoleTrace,
    NoTrace,
};


pub use crate::error::{
    Result,
    TreeError,
};
