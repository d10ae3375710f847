use serde::{Serialize, Deserialize};

use std::collections::HashMap;
use std::ops::Index;

use crate::error::{Result, TreeError};
use super::value::Value;


/// Ordered attribute names of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    names: Vec<String>,
    name_to_index: HashMap<String, usize>,
}


impl Schema {
    /// Construct a schema from the given column names.
    pub fn new<I, T>(names: I) -> Result<Self>
        where I: IntoIterator<Item = T>,
              T: ToString,
    {
        let names = names.into_iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();

        let mut name_to_index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name_to_index.insert(name.clone(), i).is_some() {
                return Err(TreeError::DuplicateColumn { name: name.clone() });
            }
        }

        Ok(Self { names, name_to_index })
    }


    /// Returns the column index of `name`.
    #[inline]
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.name_to_index.get(name)
            .copied()
            .ok_or_else(|| TreeError::UnknownAttribute { name: name.to_string() })
    }


    /// Returns the name of the column at `index`.
    #[inline]
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }


    /// Returns the column names in order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names[..]
    }


    /// Returns the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }


    /// Returns `true` if the schema has no column.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }


    /// Validate `values` against this schema and wrap them as an [`Instance`].
    /// `row` is only used to report errors.
    pub fn instance(&self, row: usize, values: Vec<Value>) -> Result<Instance> {
        if values.len() != self.len() {
            return Err(TreeError::ArityMismatch {
                row,
                expected: self.len(),
                got: values.len(),
            });
        }

        let bad = values.iter()
            .position(|v| matches!(v, Value::Real(r) if !r.is_finite()));
        if let Some(col) = bad {
            return Err(TreeError::NonFiniteValue {
                row,
                attribute: self.names[col].clone(),
            });
        }

        Ok(Instance { values })
    }
}


/// One row of a dataset.
/// Instances are immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instance {
    values: Vec<Value>,
}


impl Instance {
    /// Returns the value at column `index`, if the column exists.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }


    /// Returns all values in schema order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values[..]
    }
}


impl Index<usize> for Instance {
    type Output = Value;
    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.values[idx]
    }
}
