use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::common::{
    proposal::{MenuCategory, ProposalState},
    user::UserId,
};

use super::vote::{Vote, VoteError};

/// Core proposal data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCore {
    /// Menu item name.
    pub name: String,
    /// Free-form pitch for the item.
    pub description: String,
    /// Dish category.
    pub category: MenuCategory,
    /// Lifecycle state.
    pub state: ProposalState,
    /// Who suggested the item.
    pub proposed_by: UserId,
    /// Creation time, set once.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Current votes, keyed by voter. The key is what enforces
    /// at-most-one vote per (voter, proposal) pair.
    pub votes: HashMap<UserId, Vote>,
}

/// A proposal without an ID.
pub type NewProposal = ProposalCore;

impl ProposalCore {
    /// Create a new proposal in the standby state with no votes.
    pub fn new(
        name: String,
        description: String,
        category: MenuCategory,
        proposed_by: UserId,
    ) -> Self {
        Self {
            name,
            description,
            category,
            state: ProposalState::Standby,
            proposed_by,
            created_at: Utc::now(),
            votes: HashMap::new(),
        }
    }

    /// Add a vote to the set.
    ///
    /// Fails if voting has closed, or if the vote's voter already has a
    /// vote here.
    pub fn add_vote(&mut self, vote: Vote) -> Result<(), VoteError> {
        if self.state.is_terminal() {
            return Err(VoteError::NotVotable);
        }
        if self.votes.contains_key(&vote.voter) {
            return Err(VoteError::AlreadyVoted);
        }
        self.votes.insert(vote.voter.clone(), vote);
        Ok(())
    }

    /// Retract the given voter's vote, returning it.
    ///
    /// Once a proposal is resolved its vote set is frozen in both
    /// directions, so retraction is gated on standby just like casting.
    pub fn remove_vote(&mut self, voter: &UserId) -> Result<Vote, VoteError> {
        if self.state.is_terminal() {
            return Err(VoteError::NotVotable);
        }
        self.votes.remove(voter).ok_or(VoteError::NeverVoted)
    }

    /// Move the proposal from standby into a terminal state.
    pub fn transition_to(&mut self, target: ProposalState) -> Result<(), TransitionError> {
        if self.state.is_terminal() {
            return Err(TransitionError::AlreadyResolved(self.state));
        }
        if !target.is_terminal() {
            return Err(TransitionError::IntoStandby);
        }
        self.state = target;
        Ok(())
    }

    /// Number of current votes. Reporting only; the state machine never
    /// consults it.
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}

/// Ways a state transition can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Terminal states have no exits.
    #[error("the proposal has already been resolved to {0:?}")]
    AlreadyResolved(ProposalState),
    /// Standby is the initial state; nothing transitions back into it.
    #[error("a proposal cannot be moved back to standby")]
    IntoStandby,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl ProposalCore {
        pub fn example() -> Self {
            Self::new(
                "Kimbap".to_string(),
                "Tuna kimbap, please".to_string(),
                MenuCategory::Korean,
                UserId::from("author"),
            )
        }

        pub fn example_resolved(state: ProposalState) -> Self {
            let mut proposal = Self::example();
            proposal
                .transition_to(state)
                .expect("example states are terminal");
            proposal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_proposals_are_standby_with_no_votes() {
        let proposal = ProposalCore::example();
        assert_eq!(proposal.state, ProposalState::Standby);
        assert_eq!(proposal.vote_count(), 0);
    }

    #[test]
    fn double_vote_is_rejected() {
        let mut proposal = ProposalCore::example();

        proposal.add_vote(Vote::new(UserId::from("alice"))).unwrap();
        assert_eq!(proposal.vote_count(), 1);

        let err = proposal
            .add_vote(Vote::new(UserId::from("alice")))
            .unwrap_err();
        assert_eq!(err, VoteError::AlreadyVoted);
        assert_eq!(proposal.vote_count(), 1);
    }

    #[test]
    fn distinct_voters_accumulate() {
        let mut proposal = ProposalCore::example();

        proposal.add_vote(Vote::new(UserId::from("alice"))).unwrap();
        proposal.add_vote(Vote::new(UserId::from("bob"))).unwrap();
        assert_eq!(proposal.vote_count(), 2);
    }

    #[test]
    fn retracting_twice_fails_the_second_time() {
        let mut proposal = ProposalCore::example();
        let alice = UserId::from("alice");

        proposal.add_vote(Vote::new(alice.clone())).unwrap();
        proposal.remove_vote(&alice).unwrap();
        assert_eq!(proposal.vote_count(), 0);

        let err = proposal.remove_vote(&alice).unwrap_err();
        assert_eq!(err, VoteError::NeverVoted);
    }

    #[test]
    fn vote_can_be_recast_after_retraction() {
        let mut proposal = ProposalCore::example();
        let alice = UserId::from("alice");

        proposal.add_vote(Vote::new(alice.clone())).unwrap();
        proposal.remove_vote(&alice).unwrap();
        proposal.add_vote(Vote::new(alice)).unwrap();
        assert_eq!(proposal.vote_count(), 1);
    }

    #[test]
    fn resolved_proposals_reject_votes() {
        for state in [ProposalState::Allowed, ProposalState::Denied] {
            let mut proposal = ProposalCore::example_resolved(state);
            let err = proposal
                .add_vote(Vote::new(UserId::from("alice")))
                .unwrap_err();
            assert_eq!(err, VoteError::NotVotable);
            assert_eq!(proposal.vote_count(), 0);
        }
    }

    #[test]
    fn resolved_proposals_freeze_existing_votes() {
        let alice = UserId::from("alice");
        let mut proposal = ProposalCore::example();
        proposal.add_vote(Vote::new(alice.clone())).unwrap();

        proposal.transition_to(ProposalState::Allowed).unwrap();

        let err = proposal.remove_vote(&alice).unwrap_err();
        assert_eq!(err, VoteError::NotVotable);
        assert_eq!(proposal.vote_count(), 1);
    }

    #[test]
    fn transitions_only_leave_standby() {
        let mut proposal = ProposalCore::example();
        proposal.transition_to(ProposalState::Allowed).unwrap();
        assert_eq!(proposal.state, ProposalState::Allowed);

        let err = proposal
            .transition_to(ProposalState::Denied)
            .unwrap_err();
        assert_eq!(err, TransitionError::AlreadyResolved(ProposalState::Allowed));
        assert_eq!(proposal.state, ProposalState::Allowed);
    }

    #[test]
    fn standby_is_not_a_transition_target() {
        let mut proposal = ProposalCore::example();
        let err = proposal
            .transition_to(ProposalState::Standby)
            .unwrap_err();
        assert_eq!(err, TransitionError::IntoStandby);
        assert_eq!(proposal.state, ProposalState::Standby);
    }

    #[test]
    fn full_proposal_lifecycle() {
        let user_a = UserId::from("user-a");
        let user_b = UserId::from("user-b");

        // Create proposal; it starts in standby with no votes.
        let mut proposal = ProposalCore::new(
            "Kimbap".to_string(),
            "Tuna kimbap, please".to_string(),
            MenuCategory::Korean,
            user_a.clone(),
        );
        assert_eq!(proposal.state, ProposalState::Standby);
        assert_eq!(proposal.vote_count(), 0);

        // User A votes.
        proposal.add_vote(Vote::new(user_a.clone())).unwrap();
        assert_eq!(proposal.vote_count(), 1);

        // User A votes again.
        let err = proposal.add_vote(Vote::new(user_a)).unwrap_err();
        assert_eq!(err, VoteError::AlreadyVoted);
        assert_eq!(proposal.vote_count(), 1);

        // Admin rejects the proposal.
        proposal.transition_to(ProposalState::Denied).unwrap();
        assert_eq!(proposal.state, ProposalState::Denied);

        // User B can no longer vote.
        let err = proposal.add_vote(Vote::new(user_b)).unwrap_err();
        assert_eq!(err, VoteError::NotVotable);
        assert_eq!(proposal.vote_count(), 1);
    }
}
