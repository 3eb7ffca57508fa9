use blogify_common::request::Token;
use std::env::var;
use std::time::Duration;
use tracing::warn;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    /// Base URL of the API, without the `/api` prefix
    pub api_url: String,
    /// Credential of the current session, if any
    pub token: Option<Token>,
    pub request_timeout: Duration,
    pub proxy: Option<reqwest::Proxy>,
}

impl Config {
    pub fn new(api_url: &str) -> Config {
        Config {
            api_url: api_url.trim_end_matches('/').to_owned(),
            token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy: None,
        }
    }

    pub fn from_env() -> Config {
        Config {
            api_url: var("API_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
            token: var("BLOGIFY_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(|t| Token::new(t.trim())),
            request_timeout: Duration::from_secs(get_timeout()),
            proxy: get_proxy(),
        }
    }

    pub fn proxy(&self) -> Option<&reqwest::Proxy> {
        self.proxy.as_ref()
    }
}

fn get_timeout() -> u64 {
    match var("REQUEST_TIMEOUT") {
        Ok(secs) => secs.trim().parse::<u64>().unwrap_or_else(|_| {
            warn!(
                "Invalid REQUEST_TIMEOUT {:?}, using {} seconds",
                secs, DEFAULT_TIMEOUT_SECS
            );
            DEFAULT_TIMEOUT_SECS
        }),
        Err(_) => DEFAULT_TIMEOUT_SECS,
    }
}

fn get_proxy() -> Option<reqwest::Proxy> {
    proxy_from(&var("PROXY_URL").ok()?)
}

/// Proxy for every request, if `url` is a usable proxy address
fn proxy_from(url: &str) -> Option<reqwest::Proxy> {
    match reqwest::Proxy::all(url.trim()) {
        Ok(proxy) => Some(proxy),
        Err(e) => {
            warn!("Invalid PROXY_URL, not using a proxy: {}", e);
            None
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}
