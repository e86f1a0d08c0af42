use std::ops::Deref;

use mongodb::{
    bson::doc, error::Error as DbError, Collection, Database, IndexModel,
};
use rocket::{
    request::{self, FromRequest, Request},
    State,
};

use crate::model::db::proposal::{NewProposal, Proposal};

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

// `Derive(Clone)` would only derive if `T: Clone`, but we don't need that bound.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r, T> FromRequest<'r> for Coll<T>
where
    T: MongoCollection,
{
    type Error = ();

    /// Get the database connection from the managed state and wrap it in a collection.
    ///
    /// Panics iff the [`Database`] is not managed by [`rocket::Rocket`].
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let db = req.guard::<&State<Database>>().await.unwrap();
        request::Outcome::Success(Coll::from_db(db))
    }
}

// Proposal collections
const PROPOSALS: &str = "proposals";
impl MongoCollection for Proposal {
    const NAME: &'static str = PROPOSALS;
}
impl MongoCollection for NewProposal {
    const NAME: &'static str = PROPOSALS;
}

/// Ensure that all the required indexes exist on the given database.
///
/// This operation is idempotent.
pub async fn ensure_indexes_exist(db: &Database) -> Result<(), DbError> {
    debug!("Ensuring collection indexes exist");

    // Proposal listings are always newest-first.
    let created_at_index = IndexModel::builder()
        .keys(doc! {"created_at": -1})
        .build();
    Coll::<Proposal>::from_db(db)
        .create_index(created_at_index, None)
        .await?;

    // Resolution and voting both filter on the current state.
    let state_index = IndexModel::builder().keys(doc! {"state": 1}).build();
    Coll::<Proposal>::from_db(db)
        .create_index(state_index, None)
        .await?;

    Ok(())
}
