use serde::{Deserialize, Serialize};

/// Authorization role carried in the token's role claim.
///
/// Claim strings are `"ADMIN"` and `"MEMBER"`; anything else maps to no role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "ADMIN" => Some(Role::Admin),
            "MEMBER" => Some(Role::Member),
            _ => None,
        }
    }

    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }
}

/// A catalog record as the server returns it.
///
/// `borrowed_by` is `Some` only while `available` is false. The client never
/// derives these fields itself; they change only through server responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrowed_by: Option<String>,
}

/// The fields a client may submit when creating or updating a book.
///
/// This is everything but the server-assigned id. New books start available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub available: bool,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
        }
    }
}

/// The persisted authenticated identity: either fully present or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}
