use std::fmt::Display;

use serde_repr::{Deserialize_repr, Serialize_repr};

/// A kind of user the backend recognises. Implementors are marker types
/// that select which token rights a request guard accepts.
pub trait User {
    /// Does a token carrying the given rights authenticate this kind of user?
    fn authenticates(rights: Rights) -> bool;
}

/// Different privilege levels, as stamped into tokens by the auth service.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Voter = 0,
    Admin = 1,
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Voter => "voter",
                Self::Admin => "admin",
            }
        )
    }
}

/// An ordinary signed-in user.
pub struct Voter;

impl User for Voter {
    fn authenticates(rights: Rights) -> bool {
        rights == Rights::Voter
    }
}

/// An administrator.
pub struct Admin;

impl User for Admin {
    fn authenticates(rights: Rights) -> bool {
        rights == Rights::Admin
    }
}

/// Any signed-in user, whatever their privilege level.
pub struct AnyUser;

impl User for AnyUser {
    fn authenticates(_rights: Rights) -> bool {
        true
    }
}
