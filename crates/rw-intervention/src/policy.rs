//! The `Policy` trait implemented by every intervention variant.

use rw_core::{InterventionKind, Tick};

use crate::{Effect, InterventionContext, InterventionResult, InterventionState, Phase};

/// A timed intervention.
///
/// The orchestrator calls [`setup`][Self::setup] exactly once, at
/// `start_tick`, and then [`intervene`][Self::intervene] on every tick of the
/// window (including `start_tick`, after setup).  Both calls receive the
/// current population, graph and RNG through an [`InterventionContext`].
///
/// Only [`state`][Self::state], `setup` and `intervene` are required; the
/// phase queries derive from the state's window.
pub trait Policy {
    fn state(&self) -> &InterventionState;

    /// Capture the enrollment and anything else fixed for the whole window.
    fn setup(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<()>;

    /// Apply one tick of the intervention.
    fn intervene(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<Effect>;

    fn kind(&self) -> InterventionKind {
        self.state().kind()
    }

    fn phase(&self, t: Tick) -> Phase {
        self.state().phase(t)
    }

    fn is_setup_phase(&self, t: Tick) -> bool {
        self.state().is_setup_phase(t)
    }

    fn is_active_phase(&self, t: Tick) -> bool {
        self.state().is_active_phase(t)
    }
}
