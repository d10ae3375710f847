//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::sync::Arc;

use crate::classifier::Classifier;
use crate::error::Result;
use crate::sample::{Instance, Label, Schema};
use crate::strategy::Comparator;

use super::node::*;


/// Decision tree classifier.
/// This struct wraps the root `Node`
/// with the schema and class attribute it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Node,
    schema: Arc<Schema>,
    class: usize,
}


impl DecisionTreeClassifier {
    #[inline]
    pub(crate) fn new(root: Node, schema: Arc<Schema>, class: usize) -> Self {
        Self { root, schema, class }
    }


    #[inline]
    pub(crate) fn with_root(&self, root: Node) -> Self {
        Self { root, schema: Arc::clone(&self.schema), class: self.class }
    }


    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the schema the tree was trained on.
    #[inline]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }


    /// Returns the column index of the class attribute.
    #[inline]
    pub fn class(&self) -> usize {
        self.class
    }


    /// Returns the name of the class attribute.
    #[inline]
    pub fn class_attribute(&self) -> &str {
        self.schema.name(self.class)
    }


    /// Returns the number of leaves.
    #[inline]
    pub fn leaves(&self) -> usize {
        self.root.leaves()
    }


    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }


    /// Returns the depth of the deepest leaf.
    /// A single-leaf tree has depth `0`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.deepest()
    }


    /// Returns the leaves, left to right.
    #[inline]
    pub fn leaf_nodes(&self) -> Vec<&LeafNode> {
        self.root.leaf_nodes()
    }


    /// Returns the training instances retained by each leaf, left to right.
    pub fn leaf_clusters(&self) -> Vec<&[Arc<Instance>]> {
        self.root.leaf_nodes()
            .into_iter()
            .map(|leaf| leaf.cluster())
            .collect()
    }


    /// Returns the attributes whose splits were sorted with a comparator
    /// that this tree no longer holds, e.g., after deserialization.
    /// Instances reaching such a split are `Label::Unclassified`
    /// until [`restore_order`](Self::restore_order) is called.
    pub fn missing_orders(&self) -> Vec<&str> {
        let mut attributes = Vec::new();
        self.root.missing_orders(&mut attributes);
        attributes.into_iter()
            .map(|index| self.schema.name(index))
            .collect()
    }


    /// Give `order` to every comparator-sorted split on `attribute`.
    /// Returns the number of splits updated.
    pub fn restore_order(&mut self, attribute: &str, order: Comparator)
        -> Result<usize>
    {
        let index = self.schema.index_of(attribute)?;
        Ok(self.root.restore_order(index, &order))
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {\n")?;

        let info = self.root.to_dot_info(0, &self.schema).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }
}


impl Classifier for DecisionTreeClassifier {
    #[inline]
    fn classify(&self, instance: &Instance) -> Label {
        self.root.classify(instance)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_tree::DecisionTreeBuilder;
    use crate::sample::{Dataset, Value};
    use crate::strategy::Scale;

    #[test]
    fn dot_file_lists_every_node() {
        let rows = [(1i64, "A"), (2, "A"), (8, "B"), (9, "B")];
        let rows = rows.iter().map(|(x, y)| vec![Value::from(*x), Value::from(*y)]);
        let data = Dataset::from_rows(["x", "y"], rows).unwrap();
        let tree = DecisionTreeBuilder::new("y")
            .attribute("x", Scale::Ratio)
            .build()
            .fit(&data)
            .unwrap();

        let path = std::env::temp_dir().join("minitree_dot_file_lists_every_node.dot");
        tree.to_dot_file(&path).unwrap();
        let dot = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(dot.starts_with("graph DecisionTree {"));
        assert!(dot.contains("x < 5 ?"));
        assert_eq!(dot.matches("shape = box").count(), 2);
        assert_eq!(dot.matches(" -- ").count(), 2);
    }
}
