//! `Intervention` — the closed set of variants, built from configuration.

use rw_core::{InterventionKind, InterventionParams};

use crate::{
    Effect, IndividualIntervention, InterventionContext, InterventionResult, InterventionState,
    MockA, MockB, NetworkIntervention, Policy,
};

/// One configured intervention of any kind.
pub enum Intervention {
    Network(NetworkIntervention),
    Individual(IndividualIntervention),
    MockA(MockA),
    MockB(MockB),
}

impl Intervention {
    /// Construct the variant named by `params.kind`.
    pub fn from_params(params: InterventionParams) -> Self {
        match params.kind {
            InterventionKind::Network    => Self::Network(NetworkIntervention::new(params)),
            InterventionKind::Individual => Self::Individual(IndividualIntervention::new(params)),
            InterventionKind::MockA      => Self::MockA(MockA::new(params)),
            InterventionKind::MockB      => Self::MockB(MockB::new(params)),
        }
    }

    fn as_policy(&self) -> &dyn Policy {
        match self {
            Self::Network(p)    => p,
            Self::Individual(p) => p,
            Self::MockA(p)      => p,
            Self::MockB(p)      => p,
        }
    }

    fn as_policy_mut(&mut self) -> &mut dyn Policy {
        match self {
            Self::Network(p)    => p,
            Self::Individual(p) => p,
            Self::MockA(p)      => p,
            Self::MockB(p)      => p,
        }
    }
}

impl From<InterventionParams> for Intervention {
    fn from(params: InterventionParams) -> Self {
        Self::from_params(params)
    }
}

impl Policy for Intervention {
    fn state(&self) -> &InterventionState {
        self.as_policy().state()
    }

    fn setup(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<()> {
        self.as_policy_mut().setup(ctx)
    }

    fn intervene(&mut self, ctx: &mut InterventionContext<'_>) -> InterventionResult<Effect> {
        self.as_policy_mut().intervene(ctx)
    }
}
