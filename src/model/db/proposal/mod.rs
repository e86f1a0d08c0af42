mod base;
mod db;
mod vote;

pub use base::{NewProposal, ProposalCore, TransitionError};
pub use db::Proposal;
pub use vote::{Vote, VoteError};
