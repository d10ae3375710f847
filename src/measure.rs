//! Impurity measures scoring the class disorder of a cluster.

mod counts;

pub use counts::ClassCounts;

use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::TreeError;
use crate::sample::Instance;


/// Impurity measures for growing a decision tree.
/// * `Measure::Entropy` is `-Σ p_k log2(p_k)`.
/// * `Measure::Gini` is `1 - Σ p_k^2`.
/// * `Measure::ClassificationError` is `1 - max_k p_k`.
///
/// Each one is `0` on a class-pure cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Measure {
    /// Information entropy (base 2).
    #[default]
    Entropy,
    /// Gini index.
    Gini,
    /// Classification error.
    ClassificationError,
}


impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Entropy => "Entropy",
            Self::Gini => "Gini index",
            Self::ClassificationError => "Classification error",
        };

        write!(f, "{name}")
    }
}


impl FromStr for Measure {
    type Err = TreeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "entropy" => Ok(Self::Entropy),
            "gini" => Ok(Self::Gini),
            "error" | "classification_error" => Ok(Self::ClassificationError),
            _ => Err(TreeError::UnknownMeasure { name: s.to_string() }),
        }
    }
}


impl Measure {
    /// Returns the impurity of `cluster` w.r.t. the class column `class`.
    ///
    /// The impurity of an empty cluster is undefined;
    /// the tree builder never asks for it.
    #[inline]
    pub fn impurity(&self, cluster: &[Arc<Instance>], class: usize) -> f64 {
        debug_assert!(!cluster.is_empty(), "impurity of an empty cluster");
        let counts = ClassCounts::of(cluster.iter().map(|i| i.as_ref()), class);
        self.impurity_of(&counts)
    }


    /// Returns the impurity described by a class frequency table.
    /// An empty table scores `0`.
    #[inline]
    pub fn impurity_of(&self, counts: &ClassCounts) -> f64 {
        if counts.is_empty() { return 0f64; }

        match self {
            Self::Entropy => entropy(counts),
            Self::Gini => gini_index(counts),
            Self::ClassificationError => classification_error(counts),
        }
    }
}


#[inline(always)]
fn entropy(counts: &ClassCounts) -> f64 {
    counts.frequencies()
        .map(|p| -p * p.log2())
        .sum::<f64>()
}


#[inline(always)]
fn gini_index(counts: &ClassCounts) -> f64 {
    let squared = counts.frequencies()
        .map(|p| p.powi(2))
        .sum::<f64>();

    (1f64 - squared).max(0f64)
}


#[inline(always)]
fn classification_error(counts: &ClassCounts) -> f64 {
    let max = counts.frequencies()
        .fold(0f64, f64::max);

    1f64 - max
}
