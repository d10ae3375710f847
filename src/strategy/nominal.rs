use std::sync::Arc;
use std::collections::HashMap;

use crate::sample::{Cluster, Instance, Value};
use super::{BranchKey, Pivot, SplitParams, SplitProposal, normalize};


/// Partition `cluster` by the exact value of `attribute`.
/// Branches follow the order in which values first appear.
pub(super) fn split(
    cluster: &[Arc<Instance>],
    attribute: usize,
    params: &SplitParams,
    impurity: f64,
) -> SplitProposal
{
    let mut values: Vec<Value> = Vec::new();
    let mut groups: Vec<Cluster> = Vec::new();
    let mut value_to_group: HashMap<&Value, usize> = HashMap::new();

    for instance in cluster {
        let value = &instance[attribute];
        let group = *value_to_group.entry(value)
            .or_insert_with(|| {
                values.push(value.clone());
                groups.push(Vec::new());
                groups.len() - 1
            });
        groups[group].push(Arc::clone(instance));
    }


    let size = cluster.len() as f64;
    let mut gain = impurity;
    let mut split_info = 0f64;
    for group in groups.iter() {
        let ratio = group.len() as f64 / size;
        gain -= ratio * params.measure.impurity(group, params.class);
        split_info -= ratio * ratio.log2();
    }

    if params.gain_ratio {
        gain = normalize(gain, split_info);
    }


    let partition = values.iter()
        .cloned()
        .map(BranchKey::Value)
        .zip(groups)
        .collect();

    SplitProposal {
        pivot: Pivot::Values(values),
        gain,
        partition,
    }
}
