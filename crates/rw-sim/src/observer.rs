//! Simulation observer trait for progress reporting and data collection.

use rw_core::Tick;

use crate::TickSnapshot;

/// Per-tick counts handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Successful attempt draws this tick.
    pub attempts: usize,
    /// Edges added by recruiting, summed over agents.
    pub recruited: usize,
    /// Edges removed by pruning, summed over agents.
    pub pruned: usize,
    /// Interventions that ran `intervene` this tick.
    pub active_interventions: usize,
}

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — attempt counter
///
/// ```rust,ignore
/// struct AttemptCounter { total: usize }
///
/// impl SimObserver for AttemptCounter {
///     fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
///         self.total += summary.attempts;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's agent pipeline and validation have finished.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called for every history entry as it is recorded, including the
    /// setup snapshot.
    fn on_snapshot(&mut self, _snapshot: &TickSnapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
