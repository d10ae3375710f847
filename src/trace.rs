//! Observers for induction and pruning progress.
//!
//! A [`TraceSink`] receives one [`TraceEvent`] per split decision
//! and per pruning round. Sinks only observe;
//! the tree they watch is the same with or without them.
use colored::Colorize;

use crate::sample::Label;
use crate::strategy::Pivot;

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;


/// Progress of tree induction or pruning.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A branch node was created.
    Split {
        /// Depth of the new branch node.
        depth: usize,
        /// Impurity of the cluster being split.
        impurity: f64,
        /// Name of the chosen attribute.
        attribute: String,
        /// Gain (or gain ratio) of the chosen split.
        gain: f64,
        /// The chosen split test.
        pivot: Pivot,
    },
    /// A leaf was created.
    Leaf {
        /// Depth of the leaf.
        depth: usize,
        /// Number of instances in the leaf.
        size: usize,
        /// Class assigned to the leaf.
        label: Label,
    },
    /// A pruning round was evaluated.
    Prune {
        /// Zero for the unpruned tree, then one per trim.
        round: usize,
        /// Depth of the deepest leaf after the trim.
        max_depth: usize,
        /// Number of leaves after the trim.
        leaves: usize,
        /// Pessimistic error estimate after the trim.
        estimate: f64,
        /// Whether the trim was kept.
        accepted: bool,
    },
}


/// Receives progress events.
pub trait TraceSink {
    /// Record one event.
    fn record(&mut self, event: TraceEvent);
}


/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;


impl TraceSink for NoTrace {
    #[inline(always)]
    fn record(&mut self, _event: TraceEvent) {}
}


impl TraceSink for Vec<TraceEvent> {
    #[inline]
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}


/// Prints one colored line per event on the standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTrace {
    leaves: bool,
}


impl ConsoleTrace {
    /// Construct a console trace that prints splits and pruning rounds.
    pub fn new() -> Self {
        Self { leaves: false }
    }


    /// Print leaf creations as well.
    /// Default is `false`.
    pub fn leaves(mut self, flag: bool) -> Self {
        self.leaves = flag;
        self
    }
}


impl TraceSink for ConsoleTrace {
    fn record(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::Split { depth, impurity, attribute, gain, pivot } => {
                println!(
                    "{} {} {} {} {}",
                    format!("[DEPTH {depth:>3}]").bold().red(),
                    format!("impurity: {impurity:>WIDTH$.PREC_WIDTH$}").bold().blue(),
                    format!("gain: {gain:>WIDTH$.PREC_WIDTH$}").bold().green(),
                    format!("attr: {attribute}").bold().yellow(),
                    format!("decision: {pivot}").bold().cyan(),
                );
            },
            TraceEvent::Leaf { depth, size, label } => {
                if !self.leaves { return; }
                println!(
                    "{} {} {}",
                    format!("[DEPTH {depth:>3}]").bold().red(),
                    format!("leaf: {label}").bold().magenta(),
                    format!("size: {size:>WIDTH$}").bold().green(),
                );
            },
            TraceEvent::Prune { round, max_depth, leaves, estimate, accepted } => {
                let verdict = if accepted {
                    "ACCEPT".bold().green()
                } else {
                    "REJECT".bold().red()
                };
                println!(
                    "{} {} {} {} {}",
                    format!("[ROUND {round:>3}]").bold().red(),
                    format!("depth: {max_depth:>3}").bold().blue(),
                    format!("leaves: {leaves:>WIDTH$}").bold().yellow(),
                    format!("estimate: {estimate:>WIDTH$.PREC_WIDTH$}").bold().cyan(),
                    verdict,
                );
            },
        }
    }
}
