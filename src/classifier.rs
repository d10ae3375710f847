//! The classification interface shared by trees and their nodes.
use crate::sample::{Dataset, Instance, Label};


/// A trait that assigns class labels to instances.
pub trait Classifier {

    /// Classify the given instance.
    /// Returns `Label::Unclassified` when no class can be assigned.
    fn classify(&self, instance: &Instance) -> Label;


    /// Classify every instance of `dataset`, in order.
    fn classify_all(&self, dataset: &Dataset) -> Vec<Label> {
        dataset.iter()
            .map(|instance| self.classify(instance))
            .collect()
    }


    /// Returns the number of instances of `dataset` whose label,
    /// read from column `class`, differs from the assigned one.
    /// `Unclassified` always counts as a mistake.
    ///
    /// # Panics
    ///
    /// Panics if `class` is not a column of `dataset`.
    fn misclassified(&self, dataset: &Dataset, class: usize) -> usize {
        let n_column = dataset.schema().len();
        assert!(
            class < n_column,
            "class column {class} is out of range for {n_column} columns"
        );

        dataset.iter()
            .filter(|instance| !self.classify(instance).matches(&instance[class]))
            .count()
    }
}
