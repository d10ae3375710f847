use std::collections::HashMap;

use crate::sample::{Instance, Label, Value};


/// Class frequency table.
///
/// Labels keep the order in which they were first counted,
/// which fixes the tie-break of [`ClassCounts::majority`].
#[derive(Debug, Clone, Default)]
pub struct ClassCounts {
    slots: Vec<(Value, usize)>,
    label_to_slot: HashMap<Value, usize>,
    total: usize,
}


impl ClassCounts {
    /// Construct an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }


    /// Count the class labels (column `class`) of the given instances.
    pub fn of<'a, I>(instances: I, class: usize) -> Self
        where I: IntoIterator<Item = &'a Instance>
    {
        let mut counts = Self::new();
        for instance in instances {
            counts.add(&instance[class]);
        }
        counts
    }


    /// Count one more instance of `label`.
    #[inline]
    pub fn add(&mut self, label: &Value) {
        match self.label_to_slot.get(label) {
            Some(&slot) => { self.slots[slot].1 += 1; },
            None => {
                self.label_to_slot.insert(label.clone(), self.slots.len());
                self.slots.push((label.clone(), 1));
            },
        }
        self.total += 1;
    }


    /// Count one less instance of `label`.
    /// The label keeps its position even when its count drops to zero.
    #[inline]
    pub fn remove(&mut self, label: &Value) {
        let slot = *self.label_to_slot.get(label)
            .expect("removed a label that was never counted");
        assert!(self.slots[slot].1 > 0, "class count underflow");
        self.slots[slot].1 -= 1;
        self.total -= 1;
    }


    /// Returns the number of counted instances.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }


    /// Returns `true` if nothing is counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }


    /// Returns the count of `label`.
    #[inline]
    pub fn count(&self, label: &Value) -> usize {
        self.label_to_slot.get(label)
            .map(|&slot| self.slots[slot].1)
            .unwrap_or(0)
    }


    /// Returns the non-zero frequencies `count / total`.
    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.total as f64;
        self.slots.iter()
            .filter(|(_, c)| *c > 0)
            .map(move |(_, c)| *c as f64 / total)
    }


    /// Returns the most frequent label.
    /// Among equally frequent labels, the one counted first wins.
    /// An empty table has no majority and yields `Label::Unclassified`.
    pub fn majority(&self) -> Label {
        let mut best: Option<&(Value, usize)> = None;
        for slot in self.slots.iter() {
            if slot.1 > best.map_or(0, |b| b.1) {
                best = Some(slot);
            }
        }

        best.map(|(label, _)| Label::Class(label.clone()))
            .unwrap_or(Label::Unclassified)
    }
}
