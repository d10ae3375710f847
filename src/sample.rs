//! Values, instances and datasets.

// Provides attribute values and class labels.
pub(crate) mod value;
// Provides the schema and instance structs.
pub(crate) mod instance;
// Provides the dataset struct.
pub(crate) mod dataset;
// Provides conversion from polars frames.
pub(crate) mod frame;


pub use value::{Value, Label};
pub use instance::{Schema, Instance};
pub use dataset::{Dataset, Cluster};
