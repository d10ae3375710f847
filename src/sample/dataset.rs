use rand::prelude::*;

use std::sync::Arc;
use std::ops::Index;

use crate::error::{Result, TreeError};
use super::instance::{Schema, Instance};
use super::value::Value;


/// A group of instances that reached the same place in a tree.
/// Clusters share instances with the dataset they came from.
pub type Cluster = Vec<Arc<Instance>>;


/// An ordered, validated sequence of instances sharing one [`Schema`].
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Arc<Schema>,
    instances: Cluster,
}


impl Dataset {
    /// Construct an empty dataset with the given column names.
    pub fn new<I, T>(names: I) -> Result<Self>
        where I: IntoIterator<Item = T>,
              T: ToString,
    {
        let schema = Arc::new(Schema::new(names)?);
        Ok(Self { schema, instances: Vec::new() })
    }


    /// Construct a dataset from column names and rows.
    pub fn from_rows<I, T, R>(names: I, rows: R) -> Result<Self>
        where I: IntoIterator<Item = T>,
              T: ToString,
              R: IntoIterator<Item = Vec<Value>>,
    {
        let mut dataset = Self::new(names)?;
        for row in rows {
            dataset.push(row)?;
        }
        Ok(dataset)
    }


    pub(crate) fn from_parts(schema: Arc<Schema>, instances: Cluster) -> Self {
        Self { schema, instances }
    }


    /// Append a row to this dataset.
    pub fn push(&mut self, values: Vec<Value>) -> Result<()> {
        let row = self.instances.len();
        let instance = self.schema.instance(row, values)?;
        self.instances.push(Arc::new(instance));
        Ok(())
    }


    /// Validate `values` against this dataset's schema without storing them.
    /// Use this to build instances to classify.
    pub fn instance(&self, values: Vec<Value>) -> Result<Instance> {
        self.schema.instance(self.instances.len(), values)
    }


    /// Returns the schema.
    #[inline]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }


    /// Returns the instances in order.
    #[inline]
    pub fn instances(&self) -> &[Arc<Instance>] {
        &self.instances[..]
    }


    /// Returns an iterator over the instances.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Instance> + '_ {
        self.instances.iter().map(|instance| instance.as_ref())
    }


    /// Returns the number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }


    /// Returns `true` if the dataset has no instance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }


    /// Returns the values of the column named `name`.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let col = self.schema.index_of(name)?;
        Ok(self.instances.iter().map(|inst| &inst[col]).collect())
    }


    /// Shuffle the instances with a seeded generator and split them
    /// into a training part holding `ratio` of the instances
    /// and a validation part holding the rest.
    ///
    /// Both parts share this dataset's schema.
    pub fn split_holdout(&self, ratio: f64, seed: u64)
        -> Result<(Dataset, Dataset)>
    {
        if !(0f64 < ratio && ratio < 1f64) {
            return Err(TreeError::InvalidRatio { ratio });
        }

        let mut ix = (0..self.len()).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        ix.shuffle(&mut rng);

        let train_size = (ratio * self.len() as f64) as usize;
        let (train_ix, valid_ix) = ix.split_at(train_size);

        let pick = |ix: &[usize]| {
            let instances = ix.iter()
                .map(|&i| Arc::clone(&self.instances[i]))
                .collect();
            Self::from_parts(Arc::clone(&self.schema), instances)
        };

        Ok((pick(train_ix), pick(valid_ix)))
    }
}


impl Index<usize> for Dataset {
    type Output = Instance;
    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.instances[idx]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Dataset {
        let rows = (0..10).map(|i| vec![Value::from(i as i64), Value::from("A")]);
        Dataset::from_rows(["x", "class"], rows).unwrap()
    }

    #[test]
    fn rejects_wrong_arity() {
        let mut data = Dataset::new(["x", "class"]).unwrap();
        let err = data.push(vec![Value::from(1i64)]).unwrap_err();
        assert!(matches!(err, TreeError::ArityMismatch { row: 0, expected: 2, got: 1 }));
    }

    #[test]
    fn rejects_non_finite_reals() {
        let mut data = Dataset::new(["x", "class"]).unwrap();
        let err = data.push(vec![Value::from(f64::NAN), Value::from("A")])
            .unwrap_err();
        assert!(matches!(err, TreeError::NonFiniteValue { .. }));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Dataset::new(["x", "x"]).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateColumn { .. }));
    }

    #[test]
    fn holdout_partitions_every_instance() {
        let data = toy();
        let (train, valid) = data.split_holdout(0.7, 1234).unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(valid.len(), 3);

        let mut xs = train.iter().chain(valid.iter())
            .map(|inst| inst[0].clone())
            .collect::<Vec<_>>();
        xs.sort();
        let expected = (0..10).map(|i| Value::from(i as i64)).collect::<Vec<_>>();
        assert_eq!(xs, expected);
    }

    #[test]
    fn holdout_is_reproducible() {
        let data = toy();
        let (a, _) = data.split_holdout(0.5, 7).unwrap();
        let (b, _) = data.split_holdout(0.5, 7).unwrap();
        let a = a.iter().cloned().collect::<Vec<_>>();
        let b = b.iter().cloned().collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn holdout_rejects_degenerate_ratio() {
        assert!(toy().split_holdout(1.0, 0).is_err());
        assert!(toy().split_holdout(0.0, 0).is_err());
    }
}
