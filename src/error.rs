//! Errors reported by tree induction, classification and pruning.
//!
//! Only caller misuse is an error.
//! Empty clusters, unseen categorical values and degenerate splits
//! are ordinary outcomes and never surface here.

use polars::prelude::PolarsError;

/// Errors from dataset construction, induction and pruning.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when an attribute name does not exist in the schema.
    #[error("attribute `{name}` does not exist in the schema")]
    UnknownAttribute {
        /// The name that failed to resolve.
        name: String,
    },

    /// Returned when a split-strategy tag is not one of
    /// `nominal`, `ordinal`, `interval` or `ratio`.
    #[error("unknown split strategy `{tag}`")]
    UnknownScale {
        /// The unrecognized tag.
        tag: String,
    },

    /// Returned when an impurity measure name is not recognized.
    #[error("unknown impurity measure `{name}`")]
    UnknownMeasure {
        /// The unrecognized name.
        name: String,
    },

    /// Returned when the class attribute is also listed as a split attribute.
    #[error("class attribute `{name}` cannot be used to split")]
    ClassAsAttribute {
        /// The class attribute name.
        name: String,
    },

    /// Returned when the same attribute is listed twice.
    #[error("attribute `{name}` is listed more than once")]
    DuplicateAttribute {
        /// The repeated attribute name.
        name: String,
    },

    /// Returned when a schema lists the same name twice.
    #[error("schema contains the attribute `{name}` more than once")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// Returned when a row has a different number of values than the schema.
    #[error("row {row} has {got} values, expected {expected}")]
    ArityMismatch {
        /// The zero-based index of the offending row.
        row: usize,
        /// The number of values in the schema.
        expected: usize,
        /// The number of values in the row.
        got: usize,
    },

    /// Returned when a real value is NaN or infinite.
    #[error("non-finite value in row {row}, attribute `{attribute}`")]
    NonFiniteValue {
        /// The zero-based index of the offending row.
        row: usize,
        /// The attribute holding the value.
        attribute: String,
    },

    /// Returned when a DataFrame column holds a null.
    #[error("missing value in row {row}, column `{column}`")]
    MissingValue {
        /// The zero-based index of the offending row.
        row: usize,
        /// The column holding the null.
        column: String,
    },

    /// Returned when a DataFrame column has a dtype that cannot become a `Value`.
    #[error("column `{column}` has unsupported dtype {dtype}")]
    UnsupportedDtype {
        /// The column name.
        column: String,
        /// The polars dtype, rendered.
        dtype: String,
    },

    /// Returned when a ratio-scaled attribute holds a non-numeric value.
    #[error("ratio attribute `{attribute}` holds non-numeric values")]
    NonNumericRatio {
        /// The attribute name.
        attribute: String,
    },

    /// Returned when `prune` receives an empty validation set.
    #[error("validation set has zero instances")]
    EmptyValidationSet,

    /// Returned when a dataset does not share the tree's schema.
    #[error("dataset schema does not match the schema the tree was trained on")]
    SchemaMismatch,

    /// Returned when the class attribute differs from the tree's class attribute.
    #[error("class attribute `{got}` differs from the tree's class attribute `{expected}`")]
    ClassMismatch {
        /// The tree's class attribute.
        expected: String,
        /// The class attribute given by the caller.
        got: String,
    },

    /// Returned when the pruning penalty is negative or not finite.
    #[error("penalty must be finite and non-negative, got {penalty}")]
    InvalidPenalty {
        /// The invalid penalty.
        penalty: f64,
    },

    /// Returned when the gain threshold is negative or not finite.
    #[error("gain threshold must be finite and non-negative, got {threshold}")]
    InvalidThreshold {
        /// The invalid threshold.
        threshold: f64,
    },

    /// Returned when a holdout ratio is not in `(0, 1)`.
    #[error("holdout ratio must be in (0, 1), got {ratio}")]
    InvalidRatio {
        /// The invalid ratio.
        ratio: f64,
    },

    /// Returned when polars fails to read or convert a frame.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}


/// Shorthand for results carrying a [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;
