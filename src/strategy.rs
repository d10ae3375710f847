//! Splitting strategies, one per attribute scale.
//!
//! A nominal attribute splits multiway, one branch per observed value.
//! Ordinal, interval and ratio attributes split in two around a pivot:
//! branch `1` holds the values below the pivot,
//! branch `0` holds the pivot and everything above it.

mod binary;
mod nominal;

use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::cmp::Ordering;

use crate::error::{Result, TreeError};
use crate::measure::Measure;
use crate::sample::{Cluster, Dataset, Instance, Schema, Value};


/// Measurement scale of an attribute.
/// The scale decides how the attribute may split a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    /// Distinct values without order (e.g., color). Multiway split.
    Nominal,
    /// Distinct values with order (e.g., grade A to F). Binary split,
    /// the pivot is the first value of the upper side.
    Ordinal,
    /// Equidistant values (e.g., calendar date). Binary split,
    /// the pivot is the first value of the upper side.
    Interval,
    /// Values with a meaningful zero (e.g., length). Binary split,
    /// the pivot is the midpoint between both sides.
    Ratio,
}


impl Scale {
    /// Returns `true` if this scale splits in two.
    #[inline]
    pub fn is_binary(&self) -> bool {
        !matches!(self, Self::Nominal)
    }
}


impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Nominal => "nominal",
            Self::Ordinal => "ordinal",
            Self::Interval => "interval",
            Self::Ratio => "ratio",
        };

        write!(f, "{tag}")
    }
}


impl FromStr for Scale {
    type Err = TreeError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nominal" => Ok(Self::Nominal),
            "ordinal" => Ok(Self::Ordinal),
            "interval" => Ok(Self::Interval),
            "ratio" => Ok(Self::Ratio),
            _ => Err(TreeError::UnknownScale { tag: s.to_string() }),
        }
    }
}


/// Ordering used to sort the values of a binary-split attribute.
#[derive(Clone)]
pub struct Comparator(Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>);


impl Comparator {
    /// Wrap a comparison function.
    pub fn new<F>(compare: F) -> Self
        where F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static
    {
        Self(Arc::new(compare))
    }


    /// Compare two values.
    #[inline]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        (self.0)(a, b)
    }
}


impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comparator(..)")
    }
}


impl PartialEq for Comparator {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}


/// Compares with `order` if given, on the natural scale otherwise.
#[inline]
pub(crate) fn compare_with(order: Option<&Comparator>, a: &Value, b: &Value)
    -> Ordering
{
    match order {
        Some(cmp) => cmp.compare(a, b),
        None => a.natural_cmp(b),
    }
}


/// Describes how an attribute may be used to split.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    pub(crate) name: String,
    pub(crate) scale: Scale,
    pub(crate) order: Option<Comparator>,
}


impl AttributeSpec {
    /// Construct a spec that orders values naturally.
    pub fn new<T: ToString>(name: T, scale: Scale) -> Self {
        Self { name: name.to_string(), scale, order: None }
    }


    /// Construct a spec from a strategy tag
    /// (`nominal`, `ordinal`, `interval` or `ratio`).
    pub fn parse<T: ToString>(name: T, tag: &str) -> Result<Self> {
        Ok(Self::new(name, tag.parse()?))
    }


    /// Sort the values of this attribute with `order` instead of
    /// the natural ordering. Nominal attributes ignore the order.
    pub fn ordered_by(mut self, order: Comparator) -> Self {
        self.order = Some(order);
        self
    }


    /// Returns the attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the attribute scale.
    #[inline]
    pub fn scale(&self) -> Scale {
        self.scale
    }


    pub(crate) fn resolve(&self, schema: &Schema) -> Result<Candidate> {
        let attribute = schema.index_of(&self.name)?;
        Ok(Candidate {
            name: self.name.clone(),
            attribute,
            scale: self.scale,
            order: self.order.clone(),
        })
    }
}


/// An [`AttributeSpec`] bound to a column index.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) name: String,
    pub(crate) attribute: usize,
    pub(crate) scale: Scale,
    pub(crate) order: Option<Comparator>,
}


/// Key of a branch below a split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchKey {
    /// Values below the pivot (code `1`).
    Below,
    /// Values equal to or above the pivot (code `0`).
    AtOrAbove,
    /// Values equal to the given one (multiway splits).
    Value(Value),
}


impl BranchKey {
    /// Returns the boolean code of a binary branch:
    /// `1` for `Below` and `0` for `AtOrAbove`.
    #[inline]
    pub fn code(&self) -> Option<u8> {
        match self {
            Self::Below => Some(1),
            Self::AtOrAbove => Some(0),
            Self::Value(_) => None,
        }
    }
}


impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below => write!(f, "1"),
            Self::AtOrAbove => write!(f, "0"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}


/// The test of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pivot {
    /// Distinct values of a multiway split.
    Values(Vec<Value>),
    /// Threshold of a binary split, tested by `value < threshold`.
    Threshold(Value),
}


impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => {
                let values = values.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "by [{values}]")
            },
            Self::Threshold(v) => write!(f, "val < {v}"),
        }
    }
}


/// A candidate partition of a cluster.
#[derive(Debug, Clone)]
pub struct SplitProposal {
    /// The split test.
    pub pivot: Pivot,
    /// Impurity reduction, or gain ratio if normalization is on.
    pub gain: f64,
    /// Disjoint sub-clusters whose union is the split cluster.
    pub partition: Vec<(BranchKey, Cluster)>,
}


/// Parameters shared by every strategy during one induction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitParams {
    pub(crate) measure: Measure,
    pub(crate) class: usize,
    pub(crate) gain_ratio: bool,
}


impl Candidate {
    /// Propose the best split of `cluster` on this attribute.
    /// `impurity` is the impurity of the whole cluster.
    pub(crate) fn propose(
        &self,
        cluster: &[Arc<Instance>],
        params: &SplitParams,
        impurity: f64,
    ) -> Result<Option<SplitProposal>>
    {
        match self.scale {
            Scale::Nominal => {
                Ok(Some(nominal::split(cluster, self.attribute, params, impurity)))
            },
            _ => binary::split(cluster, self, params, impurity),
        }
    }
}


/// Normalize `gain` into a gain ratio.
/// A split without split information carries no gain.
#[inline(always)]
pub(crate) fn normalize(gain: f64, split_info: f64) -> f64 {
    if split_info > 0f64 { gain / split_info } else { 0f64 }
}


/// Evaluate one attribute on a whole dataset.
///
/// Returns the best split and its gain, or `None` when a binary
/// attribute has no boundary improving purity.
/// `impurity` defaults to the impurity of `dataset`.
pub fn split(
    dataset: &Dataset,
    spec: &AttributeSpec,
    class: &str,
    measure: Measure,
    impurity: Option<f64>,
    gain_ratio: bool,
) -> Result<Option<SplitProposal>>
{
    let schema = dataset.schema();
    let class = schema.index_of(class)?;
    let candidate = spec.resolve(schema)?;
    let params = SplitParams { measure, class, gain_ratio };

    if dataset.is_empty() { return Ok(None); }

    let impurity = impurity
        .unwrap_or_else(|| measure.impurity(dataset.instances(), class));
    candidate.propose(dataset.instances(), &params, impurity)
}
