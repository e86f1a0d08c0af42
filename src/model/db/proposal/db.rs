use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

use super::base::ProposalCore;

/// A proposal from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub proposal: ProposalCore,
}

impl Deref for Proposal {
    type Target = ProposalCore;

    fn deref(&self) -> &Self::Target {
        &self.proposal
    }
}

impl DerefMut for Proposal {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.proposal
    }
}
