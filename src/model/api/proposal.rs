use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    common::proposal::{MenuCategory, ProposalState},
    db::proposal::Proposal,
    mongodb::Id,
};

/// A new proposal, as submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSpec {
    /// Menu item name.
    pub name: String,
    /// Free-form pitch for the item.
    pub description: String,
    /// Dish category.
    pub category: MenuCategory,
}

/// An admin's decision on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDecision {
    /// True to accept, false to reject.
    pub allow: bool,
}

impl ProposalDecision {
    /// The terminal state this decision resolves to.
    pub fn target_state(self) -> ProposalState {
        if self.allow {
            ProposalState::Allowed
        } else {
            ProposalState::Denied
        }
    }
}

/// A full view of a proposal, including its current vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDescription {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub category: MenuCategory,
    pub state: ProposalState,
    pub created_at: DateTime<Utc>,
    pub votes: u64,
}

impl From<Proposal> for ProposalDescription {
    fn from(proposal: Proposal) -> Self {
        Self {
            id: proposal.id,
            votes: proposal.vote_count() as u64,
            state: proposal.state,
            category: proposal.category,
            created_at: proposal.created_at,
            name: proposal.proposal.name,
            description: proposal.proposal.description,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ProposalSpec {
        pub fn example() -> Self {
            Self {
                name: "Kimbap".to_string(),
                description: "Tuna kimbap, please".to_string(),
                category: MenuCategory::Korean,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{common::user::UserId, db::proposal::{ProposalCore, Vote}};

    #[test]
    fn decision_selects_the_terminal_state() {
        assert_eq!(
            ProposalDecision { allow: true }.target_state(),
            ProposalState::Allowed
        );
        assert_eq!(
            ProposalDecision { allow: false }.target_state(),
            ProposalState::Denied
        );
    }

    #[test]
    fn description_reports_the_vote_count() {
        let mut core = ProposalCore::example();
        core.add_vote(Vote::new(UserId::from("alice"))).unwrap();
        core.add_vote(Vote::new(UserId::from("bob"))).unwrap();
        let proposal = Proposal {
            id: Id::new(),
            proposal: core,
        };

        let description = ProposalDescription::from(proposal.clone());
        assert_eq!(description.votes, 2);
        assert_eq!(description.name, proposal.name);
        assert_eq!(description.state, ProposalState::Standby);
    }
}
