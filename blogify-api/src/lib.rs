#[macro_use]
extern crate serde_derive;

macro_rules! api {
    ($url:expr => $ep:ty) => {
        impl Endpoint for $ep {
            fn endpoint() -> &'static str {
                $url
            }
        }
    };
}

/// A record exposed as a collection of the remote API
pub trait Endpoint {
    fn endpoint() -> &'static str;
}

pub mod comments;
pub mod posts;
pub mod users;

/// A user, as embedded in posts and comments.
///
/// The API sends either the populated object or, when population was skipped,
/// the bare id. A `null` reference (the user was deleted) is represented by
/// wrapping this type in an `Option`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAuthorRef")]
pub struct AuthorRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAuthorRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        name: String,
    },
}

impl From<RawAuthorRef> for AuthorRef {
    fn from(raw: RawAuthorRef) -> Self {
        match raw {
            RawAuthorRef::Id(id) => AuthorRef {
                id,
                name: String::new(),
            },
            RawAuthorRef::Populated { id, name } => AuthorRef { id, name },
        }
    }
}
