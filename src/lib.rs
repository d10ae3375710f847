#![warn(missing_docs)]

//!
//! A crate that grows classification decision trees
//! and post-prunes them against a validation set.
//!
//! A tree is grown top-down. Each node picks, among the attributes
//! not yet used on its path, the split with the largest impurity reduction.
//! How an attribute may split depends on its measurement scale.
//!
//! - Nominal attributes
//!     split multiway, one branch per observed value.
//! - Ordinal and interval attributes
//!     split in two at the first value of the upper side.
//! - Ratio attributes
//!     split in two at the midpoint between both sides.
//!
//! Impurity is measured by entropy, the Gini index
//! or the classification error.
//! A grown tree can be simplified by [`Pruner`],
//! which merges the deepest level of the tree
//! as long as a pessimistic validation error decreases.
//!
//! ```no_run
//! use minitree::prelude::*;
//!
//! let data = Dataset::from_csv("/path/to/file.csv").unwrap();
//! let (train, valid) = data.split_holdout(0.3, 1234).unwrap();
//!
//! let tree = DecisionTreeBuilder::new("class")
//!     .attribute("color", Scale::Nominal)
//!     .attribute("length", Scale::Ratio)
//!     .build()
//!     .fit_pruned(&train, &valid, &Pruner::new())
//!     .unwrap();
//!
//! let labels = tree.classify_all(&valid);
//! ```

pub mod error;
pub mod sample;
pub mod measure;
pub mod strategy;
pub mod classifier;
pub mod decision_tree;
pub mod trace;
pub mod prelude;

mod common;


pub use error::{Result, TreeError};

pub use sample::{Cluster, Dataset, Instance, Label, Schema, Value};

pub use measure::{ClassCounts, Measure};

pub use strategy::{
    AttributeSpec,
    BranchKey,
    Comparator,
    Pivot,
    Scale,
    SplitProposal,
    split,
};

pub use classifier::Classifier;

pub use decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    Pruner,
    PruneStep,
    build_tree,
    classify,
    prune,
};

pub use trace::{ConsoleTrace, NoTrace, TraceEvent, TraceSink};
