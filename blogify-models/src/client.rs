use crate::{config::Config, Error, Result};
use blogify_common::request::{self, Token};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Error body sent by the API along with non-success statuses
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Connection to the remote API, on behalf of a session
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<Token>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<ApiClient> {
        Url::parse(&config.api_url)?;
        let builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.request_timeout);
        let builder = if let Some(proxy) = config.proxy() {
            builder.proxy(proxy.clone())
        } else {
            builder
        };
        Ok(ApiClient {
            client: builder.build()?,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            token: config.token.clone(),
        })
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: Option<Token>) {
        self.token = token;
    }

    /// URL of `route` under the base URL, followed by `ids`.
    ///
    /// Each id is encoded as exactly one path segment.
    pub fn url(&self, route: &str, ids: &[&str]) -> Result<Url> {
        if ids.iter().any(|id| matches!(*id, "" | "." | "..")) {
            return Err(Error::Url);
        }
        let mut url = Url::parse(&format!("{}{}", self.base_url, route))?;
        url.path_segments_mut()
            .map_err(|_| Error::Url)?
            .pop_if_empty()
            .extend(ids);
        Ok(url)
    }

    fn request(&self, method: Method, route: &str, ids: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(route, ids)?;
        debug!("{} {}", method, url);
        Ok(self
            .client
            .request(method, url)
            .headers(request::headers(self.token.as_ref())))
    }

    pub async fn get<T: DeserializeOwned>(&self, route: &str, ids: &[&str]) -> Result<T> {
        let response = send(self.request(Method::GET, route, ids)?).await?;
        response.json().await.map_err(Error::from)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &str,
        ids: &[&str],
        body: &B,
    ) -> Result<T> {
        let response = send(self.request(Method::POST, route, ids)?.json(body)).await?;
        response.json().await.map_err(Error::from)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        route: &str,
        ids: &[&str],
        body: &B,
    ) -> Result<T> {
        let response = send(self.request(Method::PUT, route, ids)?.json(body)).await?;
        response.json().await.map_err(Error::from)
    }

    pub async fn delete(&self, route: &str, ids: &[&str]) -> Result<()> {
        send(self.request(Method::DELETE, route, ids)?).await.map(|_| ())
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        warn!("Request failed: {}", e);
        Error::from(e)
    })?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!("{} answered {}", response.url(), status);
    match status {
        StatusCode::NOT_FOUND => Err(Error::NotFound),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthorized),
        _ => {
            let message = response.json::<ApiMessage>().await.ok().map(|m| m.message);
            Err(Error::Api(message))
        }
    }
}
