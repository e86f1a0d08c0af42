use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use mongodb::error::Error as DbError;
use rocket::{http::Status, response::Responder};
use thiserror::Error;

use crate::model::db::proposal::{TransitionError, VoteError};
use crate::planner::PlannerError;

pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can go wrong while handling a request.
///
/// The domain kinds stay distinguishable all the way to the boundary, where
/// the `Responder` impl maps each one onto a stable status.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Vote(#[from] VoteError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    /// A 404 for the given missing resource.
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::Status(Status::NotFound, format!("{} not found", what))
    }

    /// A 403 with the given explanation.
    pub fn forbidden(why: impl Into<String>) -> Self {
        Self::Status(Status::Forbidden, why.into())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        debug!("{self:?}");
        Err(match self {
            Self::Db(_) => Status::InternalServerError,
            Self::Jwt(err) => match err.into_kind() {
                JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                    Status::Unauthorized
                }
                _ => Status::BadRequest,
            },
            // A closed vote set is a rejection of the caller, not a clash
            // with concurrent state; the duplicate-vote kinds are conflicts.
            Self::Vote(VoteError::NotVotable) => Status::Forbidden,
            Self::Vote(_) => Status::Conflict,
            Self::Transition(_) => Status::Conflict,
            Self::Planner(_) => Status::BadGateway,
            Self::Status(status, _) => status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: Error) -> Status {
        let client = rocket::local::blocking::Client::tracked(rocket::build())
            .expect("valid rocket instance");
        let request = client.get("/");
        match error.respond_to(request.inner()) {
            Err(status) => status,
            Ok(_) => panic!("errors always respond with an error status"),
        }
    }

    #[test]
    fn each_error_kind_keeps_its_own_status() {
        assert_eq!(status_of(VoteError::NotVotable.into()), Status::Forbidden);
        assert_eq!(status_of(VoteError::AlreadyVoted.into()), Status::Conflict);
        assert_eq!(status_of(VoteError::NeverVoted.into()), Status::Conflict);
        assert_eq!(
            status_of(TransitionError::IntoStandby.into()),
            Status::Conflict
        );
        assert_eq!(status_of(Error::not_found("Proposal")), Status::NotFound);
        assert_eq!(
            status_of(Error::forbidden("admins only")),
            Status::Forbidden
        );
    }
}
