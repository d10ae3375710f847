use rayon::prelude::*;

use std::sync::Arc;

use crate::common::checker;
use crate::error::Result;
use crate::measure::Measure;
use crate::sample::{Cluster, Dataset, Instance, Label};
use crate::strategy::{AttributeSpec, Candidate, SplitParams, SplitProposal};
use crate::trace::{NoTrace, TraceEvent, TraceSink};

use super::builder::GAIN_EPSILON;
use super::dtree_classifier::DecisionTreeClassifier;
use super::node::{BranchNode, Node};
use super::pruner::Pruner;


/// Grows a [`DecisionTreeClassifier`] from a dataset.
/// Construct it with [`DecisionTreeBuilder`](super::DecisionTreeBuilder).
///
/// # Example
///
/// ```no_run
/// use minitree::prelude::*;
///
/// let data = Dataset::from_csv("/path/to/file.csv").unwrap();
/// let tree = DecisionTreeBuilder::new("class")
///     .attribute("color", Scale::Nominal)
///     .build()
///     .fit(&data)
///     .unwrap();
///
/// let labels = tree.classify_all(&data);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTree {
    class: String,
    specs: Vec<AttributeSpec>,
    measure: Measure,
    gain_threshold: f64,
    gain_ratio: bool,
    parallel: bool,
}


impl DecisionTree {
    #[inline]
    pub(super) fn from_components(
        class: String,
        specs: Vec<AttributeSpec>,
        measure: Measure,
        gain_threshold: f64,
        gain_ratio: bool,
        parallel: bool,
    ) -> Self
    {
        Self { class, specs, measure, gain_threshold, gain_ratio, parallel, }
    }


    /// Returns the name of the predicted attribute.
    #[inline]
    pub fn class_attribute(&self) -> &str {
        &self.class
    }


    /// Returns the attributes a node may split on, in evaluation order.
    #[inline]
    pub fn specs(&self) -> &[AttributeSpec] {
        &self.specs[..]
    }


    /// Grow a tree on `dataset`.
    pub fn fit(&self, dataset: &Dataset) -> Result<DecisionTreeClassifier> {
        self.fit_traced(dataset, &mut NoTrace)
    }


    /// Grow a tree on `dataset`,
    /// reporting every split and leaf to `sink`.
    pub fn fit_traced(&self, dataset: &Dataset, sink: &mut dyn TraceSink)
        -> Result<DecisionTreeClassifier>
    {
        checker::check_threshold(self.gain_threshold)?;

        let schema = dataset.schema();
        let class = schema.index_of(&self.class)?;
        checker::check_attributes(
            self.specs.iter().map(|spec| spec.name()), &self.class
        )?;
        let candidates = self.specs.iter()
            .map(|spec| spec.resolve(schema))
            .collect::<Result<Vec<_>>>()?;

        let params = SplitParams {
            measure: self.measure,
            class,
            gain_ratio: self.gain_ratio,
        };

        let cluster = dataset.instances().to_vec();
        let root = self.grow(cluster, &candidates, 0, &params, sink)?;

        Ok(DecisionTreeClassifier::new(root, Arc::clone(schema), class))
    }


    /// Grow a tree on `train` and post-prune it against `valid`.
    pub fn fit_pruned(&self, train: &Dataset, valid: &Dataset, pruner: &Pruner)
        -> Result<DecisionTreeClassifier>
    {
        let tree = self.fit(train)?;
        pruner.prune(&tree, valid)
    }


    /// Grow the sub-tree of `cluster` at `depth`,
    /// splitting only on `candidates`.
    fn grow(
        &self,
        cluster: Cluster,
        candidates: &[Candidate],
        depth: usize,
        params: &SplitParams,
        sink: &mut dyn TraceSink,
    ) -> Result<Node>
    {
        let class = params.class;

        // Nothing reached this node, so there is no vote to take.
        if cluster.is_empty() {
            return Ok(leaf(Label::Unclassified, depth, cluster, class, sink));
        }

        if candidates.is_empty() {
            return Ok(majority_leaf(cluster, depth, class, sink));
        }


        let impurity = self.measure.impurity(&cluster[..], class);

        if impurity == 0f64 {
            let label = Label::Class(cluster[0][class].clone());
            return Ok(leaf(label, depth, cluster, class, sink));
        }

        if impurity < self.gain_threshold {
            return Ok(majority_leaf(cluster, depth, class, sink));
        }


        let proposals = self.evaluate(&cluster[..], candidates, params, impurity)?;

        // Strictly greater gain wins, so the first spec keeps a tie.
        let mut best: Option<(usize, SplitProposal)> = None;
        let mut best_gain = 0f64;
        for (index, proposal) in proposals.into_iter().enumerate() {
            let Some(proposal) = proposal else { continue; };
            if proposal.gain > best_gain {
                best_gain = proposal.gain;
                best = Some((index, proposal));
            }
        }

        let (index, proposal) = match best {
            Some(best) if best_gain > GAIN_EPSILON => best,
            _ => { return Ok(majority_leaf(cluster, depth, class, sink)); },
        };


        let chosen = &candidates[index];
        sink.record(TraceEvent::Split {
            depth,
            impurity,
            attribute: chosen.name.clone(),
            gain: proposal.gain,
            pivot: proposal.pivot.clone(),
        });

        let remaining = candidates.iter()
            .enumerate()
            .filter_map(|(i, c)| (i != index).then(|| c.clone()))
            .collect::<Vec<_>>();

        let SplitProposal { pivot, partition, .. } = proposal;
        let mut branches = Vec::with_capacity(partition.len());
        for (key, sub) in partition {
            let child = self.grow(sub, &remaining, depth + 1, params, sink)?;
            branches.push((key, child));
        }


        // Only binary splits consult the ordering.
        let order = chosen.order.clone()
            .filter(|_| chosen.scale.is_binary());
        let branch = BranchNode {
            attribute: chosen.attribute,
            pivot,
            branches,
            depth,
            ordered: order.is_some(),
            order,
        };
        Ok(Node::Branch(branch))
    }


    /// Evaluate every candidate on `cluster`.
    /// The proposals are returned in candidate order,
    /// whether or not they were computed in parallel.
    fn evaluate(
        &self,
        cluster: &[Arc<Instance>],
        candidates: &[Candidate],
        params: &SplitParams,
        impurity: f64,
    ) -> Result<Vec<Option<SplitProposal>>>
    {
        if self.parallel {
            candidates.par_iter()
                .map(|candidate| candidate.propose(cluster, params, impurity))
                .collect()
        } else {
            candidates.iter()
                .map(|candidate| candidate.propose(cluster, params, impurity))
                .collect()
        }
    }
}


#[inline]
fn leaf(
    label: Label,
    depth: usize,
    cluster: Cluster,
    class: usize,
    sink: &mut dyn TraceSink,
) -> Node
{
    sink.record(TraceEvent::Leaf {
        depth,
        size: cluster.len(),
        label: label.clone(),
    });
    Node::leaf(label, depth, cluster, class)
}


#[inline]
fn majority_leaf(
    cluster: Cluster,
    depth: usize,
    class: usize,
    sink: &mut dyn TraceSink,
) -> Node
{
    let node = Node::majority_leaf(cluster, depth, class);
    if let Node::Leaf(leaf) = &node {
        sink.record(TraceEvent::Leaf {
            depth,
            size: leaf.cluster().len(),
            label: leaf.label().clone(),
        });
    }
    node
}
