//! Attribute values and class labels.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::cmp::Ordering;


/// A single attribute value of an instance.
///
/// Categorical values and textual ordinal codes are `Text`,
/// ordinal codes, counts and calendar days are `Integer`,
/// measurements are `Real`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Textual value.
    Text(String),
    /// Integral value.
    Integer(i64),
    /// Real value. Datasets never hold NaN or infinities.
    Real(f64),
}


impl Value {
    /// Returns the numeric view of this value, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Real(r) => Some(*r),
            Self::Text(_) => None,
        }
    }


    /// Returns the text of this value, if any.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }


    /// Returns `true` if the value is `Integer` or `Real`.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Text(_))
    }


    /// Returns the arithmetic midpoint of two numeric values.
    /// Returns `None` if either value is textual.
    pub fn midpoint(&self, other: &Self) -> Option<Self> {
        let lo = self.as_f64()?;
        let hi = other.as_f64()?;
        Some(Self::Real((lo + hi) / 2.0))
    }


    /// Compares two values on their natural scale.
    ///
    /// Integers and reals compare numerically with each other,
    /// texts compare lexicographically, and numbers precede texts.
    /// `Integer(5)` and `Real(5.0)` compare `Equal` here,
    /// while the total order of [`Ord`] separates them.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Text(_), _) => Ordering::Greater,
            (_, Self::Text(_)) => Ordering::Less,
            (a, b) => {
                // Both numeric, at least one real.
                let a = a.as_f64().unwrap_or_default();
                let b = b.as_f64().unwrap_or_default();
                a.total_cmp(&b)
            },
        }
    }


    #[inline]
    fn rank(&self) -> u8 {
        match self {
            Self::Integer(_) => 0,
            Self::Real(_) => 1,
            Self::Text(_) => 2,
        }
    }
}


impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}


impl Eq for Value {}


impl PartialOrd for Value {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


impl Ord for Value {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.natural_cmp(other)
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}


impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Text(s) => s.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Real(r) => r.to_bits().hash(state),
        }
    }
}


impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}


impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}


impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}


impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}


impl From<i32> for Value {
    #[inline]
    fn from(i: i32) -> Self {
        Self::Integer(i as i64)
    }
}


impl From<f64> for Value {
    #[inline]
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}


/// The class a tree assigns to an instance.
///
/// `Unclassified` is reported for leaves grown from an empty cluster
/// and for instances whose value has no branch in the tree.
/// It never equals a real class value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// A class value observed in the training data.
    Class(Value),
    /// No class could be assigned.
    Unclassified,
}


impl Label {
    /// Returns the class value, or `None` for `Unclassified`.
    #[inline]
    pub fn class(&self) -> Option<&Value> {
        match self {
            Self::Class(v) => Some(v),
            Self::Unclassified => None,
        }
    }


    /// Returns `true` if this label is `Unclassified`.
    #[inline]
    pub fn is_unclassified(&self) -> bool {
        matches!(self, Self::Unclassified)
    }


    /// Returns `true` if this label is the class `value`.
    #[inline]
    pub fn matches(&self, value: &Value) -> bool {
        self.class().is_some_and(|v| v == value)
    }
}


impl From<Value> for Label {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Class(value)
    }
}


impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(v) => write!(f, "{v}"),
            Self::Unclassified => write!(f, "Un-classified"),
        }
    }
}
