use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::fmt;

const USER_AGENT_VALUE: &str = concat!("Blogify/", env!("CARGO_PKG_VERSION"));

/// Bearer credential of a session
#[derive(Shrinkwrap, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl ToString) -> Token {
        Token(token.to_string())
    }
}

// never print the credential itself
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Headers sent with every API call
pub fn headers(token: Option<&Token>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {}", token.as_str())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Session token contains invalid characters, ignoring it"),
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_headers() {
        let headers = headers(None);
        assert_eq!(headers[ACCEPT], "application/json");
        assert!(headers[USER_AGENT].to_str().unwrap().starts_with("Blogify/"));
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn bearer_header() {
        let token = Token::new("abc.def");
        assert_eq!(headers(Some(&token))[AUTHORIZATION], "Bearer abc.def");
    }

    #[test]
    fn invalid_token_is_skipped() {
        let token = Token::new("bad\ntoken");
        assert!(headers(Some(&token)).get(AUTHORIZATION).is_none());
    }

    #[test]
    fn token_derefs_to_its_value() {
        let token = Token::new("abc");
        assert_eq!(token.as_str(), "abc");
        assert_eq!(format!("Bearer {}", *token), "Bearer abc");
    }

    #[test]
    fn token_is_not_printed() {
        assert_eq!(format!("{:?}", Token::new("secret")), "Token(***)");
    }
}
