use mongodb::{bson::doc, options::FindOptions};
use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::model::{
    api::{
        auth::{AnyUser, AuthToken},
        pagination::{Paginated, PaginationRequest},
        proposal::{ProposalDescription, ProposalSpec},
    },
    db::proposal::{NewProposal, Proposal, ProposalCore},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![list_proposals, get_proposal, create_proposal]
}

#[get("/proposals?<pagination..>")]
async fn list_proposals(
    pagination: PaginationRequest,
    proposals: Coll<Proposal>,
) -> Result<Json<Paginated<ProposalDescription>>> {
    let options = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .skip(u64::from(pagination.skip()))
        .limit(i64::from(pagination.page_size()))
        .build();

    let page: Vec<ProposalDescription> = proposals
        .find(None, options)
        .await?
        .map_ok(ProposalDescription::from)
        .try_collect()
        .await?;

    let total = proposals.count_documents(None, None).await?;
    Ok(Json(pagination.to_paginated(total, page)))
}

#[get("/proposals/<proposal_id>")]
async fn get_proposal(
    proposal_id: Id,
    proposals: Coll<Proposal>,
) -> Result<Json<ProposalDescription>> {
    let proposal = proposals
        .find_one(proposal_id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found(format!("Proposal {}", proposal_id)))?;
    Ok(Json(proposal.into()))
}

#[post("/proposals", data = "<spec>", format = "json")]
async fn create_proposal(
    token: AuthToken<AnyUser>,
    spec: Json<ProposalSpec>,
    new_proposals: Coll<NewProposal>,
    proposals: Coll<Proposal>,
) -> Result<Json<ProposalDescription>> {
    // Create and insert the proposal. The author is taken from the token,
    // never from the request body.
    let spec = spec.0;
    let proposal = ProposalCore::new(spec.name, spec.description, spec.category, token.id);
    let new_id: Id = new_proposals
        .insert_one(&proposal, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB.
        .into();

    // Retrieve the full proposal information including ID.
    let proposal = proposals
        .find_one(new_id.as_doc(), None)
        .await?
        .unwrap(); // Just inserted.

    Ok(Json(proposal.into()))
}
