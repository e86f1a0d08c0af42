use chrono::{DateTime, Utc};
use mongodb::bson::{serde_helpers::chrono_datetime_as_bson_datetime, to_bson, Bson};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::common::user::UserId;

/// A single user's endorsement of a proposal.
///
/// A vote has no identity of its own: it exists only as the entry keyed by
/// its voter inside the owning proposal's vote set, so "the same vote" means
/// "the same (voter, proposal) pair".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Who cast the vote.
    pub voter: UserId,
    /// When it was cast.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    /// A new vote by the given voter, cast now.
    pub fn new(voter: UserId) -> Self {
        Self {
            voter,
            cast_at: Utc::now(),
        }
    }
}

impl From<&Vote> for Bson {
    fn from(vote: &Vote) -> Self {
        to_bson(vote).expect("Serialisation is infallible")
    }
}

/// Ways a vote operation can be rejected.
///
/// These are deterministic for a given proposal state and input; none of
/// them is transient, so callers must not retry with the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoteError {
    /// The proposal has left standby and its vote set is frozen.
    #[error("the proposal is no longer open for voting")]
    NotVotable,
    /// The caller already has a vote on this proposal.
    #[error("the caller has already voted for this proposal")]
    AlreadyVoted,
    /// The caller has no vote on this proposal to retract.
    #[error("the caller has never voted for this proposal")]
    NeverVoted,
}
