use mongodb::bson::doc;
use rocket::{serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::model::{
    api::{
        auth::{Admin, AuthToken, Voter},
        proposal::{ProposalDecision, ProposalDescription},
    },
    common::proposal::ProposalState,
    db::proposal::{Proposal, TransitionError},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![resolve_proposal, resolve_proposal_non_admin]
}

#[patch(
    "/proposals/<proposal_id>/state",
    data = "<decision>",
    format = "json",
    rank = 1
)]
async fn resolve_proposal(
    _token: AuthToken<Admin>,
    proposal_id: Id,
    decision: Json<ProposalDecision>,
    proposals: Coll<Proposal>,
) -> Result<Json<ProposalDescription>> {
    // Update the state, gated on the proposal still being in standby. Any
    // vote committed after this lands will miss its own standby filter, so
    // the vote set is frozen from this point on.
    let filter = doc! {
        "_id": *proposal_id,
        "state": ProposalState::Standby,
    };
    let update = doc! {
        "$set": { "state": decision.target_state() },
    };
    let result = proposals.update_one(filter, update, None).await?;

    if result.modified_count != 1 {
        // Distinguish a missing proposal from one already resolved.
        let proposal = proposals
            .find_one(proposal_id.as_doc(), None)
            .await?
            .ok_or_else(|| Error::not_found(format!("Proposal {}", proposal_id)))?;
        return Err(TransitionError::AlreadyResolved(proposal.state).into());
    }

    // Return the updated view.
    let proposal = proposals
        .find_one(proposal_id.as_doc(), None)
        .await?
        .unwrap(); // Presence already checked.

    Ok(Json(proposal.into()))
}

/// Resolution is admin-only: a signed-in non-admin gets a definitive 403
/// rather than falling through to a 404.
#[patch("/proposals/<_>/state", rank = 2)]
async fn resolve_proposal_non_admin(_token: AuthToken<Voter>) -> Error {
    Error::forbidden("only admins may resolve proposals")
}
