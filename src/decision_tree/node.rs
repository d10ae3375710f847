//! Defines the inner representation
//! of the decision tree.
use serde::{Serialize, Deserialize};

use std::cmp::Ordering;
use std::sync::Arc;

use crate::classifier::Classifier;
use crate::measure::ClassCounts;
use crate::sample::{Cluster, Instance, Label, Schema};
use crate::strategy::{BranchKey, Comparator, Pivot, compare_with};


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that splits on an attribute.
    Branch(BranchNode),


    /// A node that assigns a class.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// A binary split has the branches `Below` and `AtOrAbove`,
/// a multiway split has one branch per distinct value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(crate) attribute: usize,
    pub(crate) pivot: Pivot,
    pub(crate) branches: Vec<(BranchKey, Node)>,
    pub(crate) depth: usize,

    // Whether the attribute was sorted with a comparator.
    // Comparators are not serialized; a deserialized node with
    // `ordered` set routes nothing until the comparator is restored.
    #[serde(default)]
    pub(crate) ordered: bool,
    #[serde(skip)]
    pub(crate) order: Option<Comparator>,
}


/// Represents the leaf nodes of decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(crate) label: Label,
    pub(crate) depth: usize,
    pub(crate) cluster: Cluster,
    pub(crate) class: usize,
}


impl BranchNode {
    /// Returns the column index of the split attribute.
    #[inline]
    pub fn attribute(&self) -> usize {
        self.attribute
    }


    /// Returns the split test.
    #[inline]
    pub fn pivot(&self) -> &Pivot {
        &self.pivot
    }


    /// Returns the branches of this node.
    #[inline]
    pub fn branches(&self) -> &[(BranchKey, Node)] {
        &self.branches[..]
    }


    /// Returns the child reached by `key`.
    pub fn child(&self, key: &BranchKey) -> Option<&Node> {
        self.branches.iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }


    /// Returns `true` if this node was split with a comparator
    /// that it no longer holds.
    #[inline]
    pub fn is_missing_order(&self) -> bool {
        self.ordered && self.order.is_none()
    }


    /// Returns the child `instance` descends to.
    /// Returns `None` if its value has no branch,
    /// or if the comparator of this split is missing.
    pub(crate) fn route(&self, instance: &Instance) -> Option<&Node> {
        let value = instance.get(self.attribute)?;
        let key = match &self.pivot {
            Pivot::Threshold(threshold) => {
                if self.is_missing_order() { return None; }
                let ord = compare_with(self.order.as_ref(), value, threshold);
                if ord == Ordering::Less {
                    BranchKey::Below
                } else {
                    BranchKey::AtOrAbove
                }
            },
            Pivot::Values(_) => {
                return self.branches.iter()
                    .find(|(k, _)| matches!(k, BranchKey::Value(v) if v == value))
                    .map(|(_, node)| node);
            },
        };
        self.child(&key)
    }


    #[inline]
    fn has_only_leaves(&self) -> bool {
        self.branches.iter().all(|(_, node)| node.is_leaf())
    }


    /// Collapse this node and its leaf children into one leaf
    /// labeled by the majority over the children's clusters.
    fn merge(&mut self, class: usize) -> LeafNode {
        let mut cluster = Cluster::new();
        for (_, child) in self.branches.drain(..) {
            if let Node::Leaf(leaf) = child {
                cluster.extend(leaf.cluster);
            }
        }

        LeafNode::by_majority(cluster, self.depth, class)
    }
}


impl LeafNode {
    /// Construct a leaf labeled by the majority of `cluster`.
    #[inline]
    pub(crate) fn by_majority(cluster: Cluster, depth: usize, class: usize) -> Self {
        let label = ClassCounts::of(cluster.iter().map(|x| x.as_ref()), class)
            .majority();
        Self { label, depth, cluster, class }
    }


    /// Returns the class label of this leaf.
    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }


    /// Returns the training instances that reached this leaf.
    #[inline]
    pub fn cluster(&self) -> &[Arc<Instance>] {
        &self.cluster[..]
    }


    /// Returns the column index of the class attribute.
    #[inline]
    pub fn class(&self) -> usize {
        self.class
    }


    /// Returns the majority class of the retained cluster.
    #[inline]
    pub fn majority(&self) -> Label {
        ClassCounts::of(self.cluster.iter().map(|x| x.as_ref()), self.class)
            .majority()
    }
}


impl Node {
    /// Construct a leaf node.
    #[inline]
    pub(crate) fn leaf(label: Label, depth: usize, cluster: Cluster, class: usize) -> Self {
        Node::Leaf(LeafNode { label, depth, cluster, class })
    }


    /// Construct a leaf node labeled by the majority of `cluster`.
    #[inline]
    pub(crate) fn majority_leaf(cluster: Cluster, depth: usize, class: usize) -> Self {
        Node::Leaf(LeafNode::by_majority(cluster, depth, class))
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }


    /// Returns the class label if this node is a leaf.
    #[inline]
    pub fn label(&self) -> Option<&Label> {
        match self {
            Node::Leaf(leaf) => Some(&leaf.label),
            Node::Branch(_) => None,
        }
    }


    /// Returns the depth this node was created at.
    #[inline]
    pub fn depth(&self) -> usize {
        match self {
            Node::Branch(branch) => branch.depth,
            Node::Leaf(leaf) => leaf.depth,
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub fn leaves(&self) -> usize {
        match self {
            Node::Branch(branch) => branch.branches.iter()
                .map(|(_, node)| node.leaves())
                .sum(),
            Node::Leaf(_) => 1,
        }
    }


    /// Returns the number of nodes of this sub-tree.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Branch(branch) => 1 + branch.branches.iter()
                .map(|(_, node)| node.node_count())
                .sum::<usize>(),
            Node::Leaf(_) => 1,
        }
    }


    /// Returns the depth of the deepest leaf of this sub-tree.
    pub fn deepest(&self) -> usize {
        match self {
            Node::Branch(branch) => branch.branches.iter()
                .map(|(_, node)| node.deepest())
                .max()
                .unwrap_or(branch.depth),
            Node::Leaf(leaf) => leaf.depth,
        }
    }


    /// Returns the leaves of this sub-tree, left to right.
    pub fn leaf_nodes(&self) -> Vec<&LeafNode> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }


    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a LeafNode>) {
        match self {
            Node::Branch(branch) => {
                branch.branches.iter()
                    .for_each(|(_, node)| node.collect_leaves(leaves));
            },
            Node::Leaf(leaf) => leaves.push(leaf),
        }
    }


    /// Collect the attributes of branch nodes missing their comparator.
    pub(crate) fn missing_orders(&self, attributes: &mut Vec<usize>) {
        if let Node::Branch(branch) = self {
            if branch.is_missing_order() && !attributes.contains(&branch.attribute) {
                attributes.push(branch.attribute);
            }
            branch.branches.iter()
                .for_each(|(_, node)| node.missing_orders(attributes));
        }
    }


    /// Give `order` back to every comparator-sorted split on `attribute`.
    /// Returns the number of nodes updated.
    pub(crate) fn restore_order(&mut self, attribute: usize, order: &Comparator)
        -> usize
    {
        let Node::Branch(branch) = self else { return 0; };

        let mut updated = 0;
        if branch.ordered && branch.attribute == attribute {
            branch.order = Some(order.clone());
            updated += 1;
        }
        for (_, node) in branch.branches.iter_mut() {
            updated += node.restore_order(attribute, order);
        }
        updated
    }


    /// Merge every branch node whose children are all leaves
    /// at depth `deepest` into a single leaf.
    pub(crate) fn merge_deepest(&mut self, deepest: usize, class: usize) {
        let merged = match self {
            Node::Branch(branch) if branch.depth + 1 == deepest
                && branch.has_only_leaves() => branch.merge(class),
            Node::Branch(branch) => {
                branch.branches.iter_mut()
                    .for_each(|(_, node)| node.merge_deepest(deepest, class));
                return;
            },
            Node::Leaf(_) => return,
        };

        *self = Node::Leaf(merged);
    }


    pub(crate) fn to_dot_info(&self, id: usize, schema: &Schema)
        -> (Vec<String>, usize)
    {
        match self {
            Node::Branch(b) => {
                let feat = escape(schema.name(b.attribute));
                let b_info = match &b.pivot {
                    Pivot::Threshold(thr) => format!(
                        "\tnode_{id} [ label = \"{feat} < {thr} ?\" ];\n",
                        thr = escape(&thr.to_string()),
                    ),
                    Pivot::Values(_) => format!(
                        "\tnode_{id} [ label = \"{feat} ?\" ];\n"
                    ),
                };

                let mut info = vec![b_info];
                let mut next_id = id + 1;
                for (key, child) in b.branches.iter() {
                    let edge = match key {
                        BranchKey::Below => "Yes".to_string(),
                        BranchKey::AtOrAbove => "No".to_string(),
                        BranchKey::Value(v) => escape(&v.to_string()),
                    };
                    info.push(format!(
                        "\tnode_{id} -- node_{next_id} [ label = \"{edge}\" ];\n"
                    ));

                    let (mut c_info, ret_id) = child.to_dot_info(next_id, schema);
                    info.append(&mut c_info);
                    next_id = ret_id;
                }

                (info, next_id)
            },
            Node::Leaf(l) => {
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"{p}\", \
                     shape = box, \
                     ];\n",
                    p = escape(&l.label.to_string())
                );

                (vec![info], id + 1)
            }
        }
    }
}


/// Escape `text` for a double-quoted DOT string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}


impl Classifier for Node {
    fn classify(&self, instance: &Instance) -> Label {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.label.clone(),
                Node::Branch(branch) => match branch.route(instance) {
                    Some(child) => { node = child; },
                    None => return Label::Unclassified,
                },
            }
        }
    }
}
