use std::sync::Arc;
use std::cmp::Ordering;

use crate::error::{Result, TreeError};
use crate::measure::ClassCounts;
use crate::sample::{Cluster, Instance};
use super::{
    BranchKey,
    Candidate,
    Pivot,
    Scale,
    SplitParams,
    SplitProposal,
    compare_with,
    normalize,
};


/// Find the best binary partition of `cluster` on an ordered attribute.
///
/// The cluster is stably sorted by the attribute, then every boundary
/// between two distinct consecutive values is scored.
/// Class counts move from the right side to the left side one instance
/// at a time, so a scan costs one pass over the sorted cluster.
/// Returns `None` if no boundary has positive gain.
pub(super) fn split(
    cluster: &[Arc<Instance>],
    candidate: &Candidate,
    params: &SplitParams,
    impurity: f64,
) -> Result<Option<SplitProposal>>
{
    let attr = candidate.attribute;
    let class = params.class;
    let order = candidate.order.as_ref();

    if candidate.scale == Scale::Ratio
        && cluster.iter().any(|x| !x[attr].is_numeric())
    {
        return Err(TreeError::NonNumericRatio {
            attribute: candidate.name.clone(),
        });
    }


    let mut sorted: Cluster = cluster.to_vec();
    sorted.sort_by(|x, y| compare_with(order, &x[attr], &y[attr]));


    let size = sorted.len();
    let total = size as f64;
    let mut left = ClassCounts::new();
    let mut right = ClassCounts::of(sorted.iter().map(|x| x.as_ref()), class);

    let mut best_gain = 0f64;
    let mut best_index = None;

    for i in 1..size {
        let moved = &sorted[i - 1][class];
        left.add(moved);
        right.remove(moved);

        // Only the last of a run of equal values is a boundary.
        let (prev, next) = (&sorted[i - 1][attr], &sorted[i][attr]);
        if compare_with(order, prev, next) == Ordering::Equal {
            continue;
        }

        let head_ratio = i as f64 / total;
        let tail_ratio = (size - i) as f64 / total;

        let mut gain = impurity
            - head_ratio * params.measure.impurity_of(&left)
            - tail_ratio * params.measure.impurity_of(&right);

        if params.gain_ratio {
            let split_info = -head_ratio * head_ratio.log2()
                - tail_ratio * tail_ratio.log2();
            gain = normalize(gain, split_info);
        }

        if gain > best_gain {
            best_gain = gain;
            best_index = Some(i);
        }
    }


    let Some(i) = best_index else { return Ok(None); };

    let (lower, upper) = (&sorted[i - 1][attr], &sorted[i][attr]);
    let threshold = match candidate.scale {
        Scale::Ratio => {
            let mid = lower.midpoint(upper)
                .ok_or_else(|| TreeError::NonNumericRatio {
                    attribute: candidate.name.clone(),
                })?;
            // The midpoint of adjacent floats may round onto the lower one.
            if compare_with(order, lower, &mid) == Ordering::Less {
                mid
            } else {
                upper.clone()
            }
        },
        _ => upper.clone(),
    };

    let tail = sorted.split_off(i);
    let proposal = SplitProposal {
        pivot: Pivot::Threshold(threshold),
        gain: best_gain,
        partition: vec![
            (BranchKey::Below, sorted),
            (BranchKey::AtOrAbove, tail),
        ],
    };

    Ok(Some(proposal))
}
