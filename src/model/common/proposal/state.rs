use mongodb::bson::{to_bson, Bson};
use serde::{Deserialize, Serialize};

/// States in the proposal lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Awaiting an admin decision; the only state that accepts votes.
    Standby,
    /// Accepted. Terminal.
    Allowed,
    /// Rejected. Terminal.
    Denied,
}

impl ProposalState {
    /// Is this a final state that no transition leaves?
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Standby)
    }
}

impl From<ProposalState> for Bson {
    fn from(state: ProposalState) -> Self {
        to_bson(&state).expect("Serialisation is infallible")
    }
}
