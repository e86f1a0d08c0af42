use mongodb::bson::doc;
use rocket::Route;

use crate::error::{Error, Result};
use crate::model::{
    api::auth::{AnyUser, AuthToken},
    common::{proposal::ProposalState, user::UserId},
    db::proposal::{Proposal, Vote},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![cast_vote, retract_vote]
}

/// The dotted document path of the given voter's vote.
fn vote_key(voter: &UserId) -> String {
    format!("votes.{}", voter)
}

#[post("/proposals/<proposal_id>/votes")]
async fn cast_vote(
    token: AuthToken<AnyUser>,
    proposal_id: Id,
    proposals: Coll<Proposal>,
) -> Result<()> {
    // The voter key comes strictly from the caller's token, so a vote can
    // only ever be cast on the caller's own behalf.
    let vote = Vote::new(token.id);
    let key = vote_key(&vote.voter);

    // Validate against the current state, then commit with a filter that
    // re-states the preconditions. Single-document updates are atomic, so
    // a resolution or duplicate vote that lands in between makes the
    // filter miss and we re-derive from fresh state.
    loop {
        let mut proposal = proposals
            .find_one(proposal_id.as_doc(), None)
            .await?
            .ok_or_else(|| Error::not_found(format!("Proposal {}", proposal_id)))?;
        proposal.add_vote(vote.clone())?;

        let filter = doc! {
            "_id": *proposal_id,
            "state": ProposalState::Standby,
            &key: { "$exists": false },
        };
        let update = doc! {
            "$set": { &key: &vote },
        };
        let result = proposals.update_one(filter, update, None).await?;
        if result.modified_count == 1 {
            return Ok(());
        }
    }
}

#[delete("/proposals/<proposal_id>/votes")]
async fn retract_vote(
    token: AuthToken<AnyUser>,
    proposal_id: Id,
    proposals: Coll<Proposal>,
) -> Result<()> {
    let key = vote_key(&token.id);

    loop {
        let mut proposal = proposals
            .find_one(proposal_id.as_doc(), None)
            .await?
            .ok_or_else(|| Error::not_found(format!("Proposal {}", proposal_id)))?;
        proposal.remove_vote(&token.id)?;

        let filter = doc! {
            "_id": *proposal_id,
            "state": ProposalState::Standby,
            &key: { "$exists": true },
        };
        let update = doc! {
            "$unset": { &key: "" },
        };
        let result = proposals.update_one(filter, update, None).await?;
        if result.modified_count == 1 {
            return Ok(());
        }
    }
}
