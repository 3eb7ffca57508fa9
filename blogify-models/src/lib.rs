#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde_derive;

use std::fmt;
use validator::ValidationErrors;

pub use blogify_api as api;

#[derive(Debug)]
pub enum Error {
    /// The server refused the request, with its explanation when it gave one
    Api(Option<String>),
    Network(reqwest::Error),
    NotFound,
    SerDe,
    Unauthorized,
    Url,
    Validation(ValidationErrors),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::SerDe
        } else {
            Error::Network(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        Error::SerDe
    }
}

impl From<url::ParseError> for Error {
    fn from(_: url::ParseError) -> Self {
        Error::Url
    }
}

impl From<ValidationErrors> for Error {
    fn from(err: ValidationErrors) -> Self {
        Error::Validation(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api(Some(message)) => f.write_str(message),
            Error::Api(None) => f.write_str("The server could not process the request"),
            Error::Network(e) if e.is_timeout() => f.write_str("The server took too long to answer"),
            Error::Network(_) => f.write_str("Could not reach the server"),
            Error::NotFound => f.write_str("Not found"),
            Error::SerDe => f.write_str("Unexpected answer from the server"),
            Error::Unauthorized => f.write_str("You need to be logged in"),
            Error::Url => f.write_str("Invalid API address"),
            Error::Validation(errors) => f.write_str(&validation_message(errors)),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Message to show the user when `action` failed.
    ///
    /// Validation errors and server explanations are shown as is, anything
    /// else falls back to the generic `action` message.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Error::Api(Some(_)) | Error::Validation(_) => self.to_string(),
            _ => action.to_owned(),
        }
    }
}

/// Fields are reported in the order a form shows them
const FIELD_ORDER: &[&str] = &["title", "content", "comment", "name", "email", "password"];

fn validation_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names = fields.keys().copied().collect::<Vec<_>>();
    names.sort_by_key(|name| {
        FIELD_ORDER
            .iter()
            .position(|f| f == name)
            .unwrap_or(FIELD_ORDER.len())
    });
    names
        .into_iter()
        .flat_map(|name| fields[name].iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid form".to_owned())
}

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod client;
pub mod comments;
pub mod config;
pub mod feed;
pub mod likes;
pub mod posts;
pub mod routes;
pub mod session;
pub mod users;

pub use client::ApiClient;
pub use config::CONFIG;
