use std::marker::PhantomData;

use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use rocket::{
    http::{Cookie, SameSite},
    outcome::{try_outcome, IntoOutcome},
    request::{FromRequest, Outcome},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::model::common::user::UserId;

use super::user::{AnyUser, Rights, User};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// An authentication token representing a specific user with specific rights.
///
/// Tokens are minted by the external auth service; this backend only ever
/// validates them. The type parameter selects which rights the request
/// guard accepts, so a handler taking `AuthToken<Admin>` can only run for
/// an admin caller.
#[derive(Serialize, Deserialize)]
pub struct AuthToken<U> {
    /// The subject: who this token authenticates.
    #[serde(rename = "sub")]
    pub id: UserId,
    #[serde(rename = "rgt")]
    pub rights: Rights,
    #[serde(skip)]
    phantom: PhantomData<U>,
}

impl AuthToken<AnyUser> {
    /// Build a token directly. Normal operation only decodes tokens minted
    /// elsewhere; this exists for tests and local tooling standing in for
    /// the auth service.
    pub fn new(id: UserId, rights: Rights) -> Self {
        Self {
            id,
            rights,
            phantom: PhantomData,
        }
    }
}

impl<U> AuthToken<U>
where
    U: User,
{
    /// Does this token authenticate the user kind `U`?
    pub fn permits(&self) -> bool {
        U::authenticates(self.rights)
    }

    #[allow(clippy::missing_panics_doc)]
    /// Serialize this token into a cookie.
    pub fn into_cookie(self, config: &Config) -> Cookie<'static> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )
        .expect("JWT encoding is infallible with default settings");

        Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish()
    }

    /// Deserialize a token from a cookie.
    pub fn from_cookie(cookie: &Cookie<'static>, config: &Config) -> Result<Self, Error> {
        let token = jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims<U>>| claims.claims.token)?;
        Ok(token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims<U> {
    #[serde(flatten, bound = "")]
    token: AuthToken<U>,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

#[rocket::async_trait]
impl<'r, U> FromRequest<'r> for AuthToken<U>
where
    U: User + Send,
{
    type Error = Error;

    /// Get a token from the cookie and verify that it authenticates the
    /// expected kind of user. The user itself is externally owned, so there
    /// is nothing further to look up.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        // Unwrap is safe as `Config` is always managed.
        let config = req.guard::<&State<Config>>().await.unwrap();

        // Forward to any routes that do not require an authentication token.
        let cookie = try_outcome!(req.cookies().get(AUTH_TOKEN_COOKIE).or_forward(()));

        // Decode the token.
        let token: Self = try_outcome!(Self::from_cookie(cookie, config).or_forward(()));

        // Check it represents the correct rights.
        if !token.permits() {
            return Outcome::Forward(());
        }

        Outcome::Success(token)
    }
}

#[cfg(test)]
mod tests {
    use super::super::user::{Admin, Voter};
    use super::*;

    #[test]
    fn cookie_round_trip_preserves_the_claims() {
        let config = Config::example();
        let token = AuthToken::new(UserId::from("42"), Rights::Voter);
        let cookie = token.into_cookie(&config);

        let decoded: AuthToken<Voter> = AuthToken::from_cookie(&cookie, &config).unwrap();
        assert_eq!(decoded.id, UserId::from("42"));
        assert_eq!(decoded.rights, Rights::Voter);
        assert!(decoded.permits());
    }

    #[test]
    fn rights_select_which_guards_accept_a_token() {
        let config = Config::example();
        let cookie = AuthToken::new(UserId::from("42"), Rights::Voter).into_cookie(&config);

        let as_admin: AuthToken<Admin> = AuthToken::from_cookie(&cookie, &config).unwrap();
        assert!(!as_admin.permits());

        let as_anyone: AuthToken<AnyUser> = AuthToken::from_cookie(&cookie, &config).unwrap();
        assert!(as_anyone.permits());
    }

    #[test]
    fn tampered_cookies_are_rejected() {
        let config = Config::example();
        let cookie = AuthToken::new(UserId::from("42"), Rights::Voter).into_cookie(&config);

        let mut forged = cookie.value().to_string();
        forged.pop();
        let forged = Cookie::new(AUTH_TOKEN_COOKIE, forged);
        assert!(AuthToken::<Voter>::from_cookie(&forged, &config).is_err());
    }
}
