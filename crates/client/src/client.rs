//! HTTP client for the upstream addon API.

use crate::error::{ErrorKind, Result};
use crate::models::{Addon, AddonFile, AddonFileKey, SearchCriteria};
use crate::provider::AddonProvider;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::error;

/// Base path of the hosted upstream API.
pub const DEFAULT_BASE_URL: &str = "https://addons-v2.forgesvc.net/api";

/// Header carrying the externally-supplied authentication token. The token
/// is opaque to this crate and forwarded verbatim.
const AUTH_HEADER: &str = "AuthenticationToken";

/// Client for the upstream addon API.
///
/// Maps one-to-one onto the remote endpoints; see [`AddonProvider`] for the
/// operation contract. No retries, no deadlines: callers that need a
/// timeout must wrap calls externally.
#[derive(Debug, Clone)]
pub struct CurseClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl CurseClient {
    /// Create a client against the given base URL.
    ///
    /// A trailing slash on the base URL is ignored. The token, when
    /// present, is attached to every request as an `AuthenticationToken`
    /// header.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| exn::Exn::from(ErrorKind::Transport(err.to_string())))?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url, token })
    }

    /// Create a client against the hosted upstream.
    pub fn upstream(token: Option<String>) -> Result<Self> {
        Self::new(DEFAULT_BASE_URL, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn decorate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }

    /// Dispatch a prepared request and return the response body, raising
    /// on transport failure or a non-success status.
    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = self
            .decorate(request)
            .send()
            .await
            .map_err(|err| exn::Exn::from(ErrorKind::Transport(err.to_string())))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| exn::Exn::from(ErrorKind::Transport(err.to_string())))?;
        if !status.is_success() {
            exn::bail!(ErrorKind::Status { status: status.as_u16(), body });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let body = self.dispatch(self.http.get(url).query(query)).await?;
        serde_json::from_str(&body).map_err(|err| exn::Exn::from(ErrorKind::Decode(err.to_string())))
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        self.dispatch(self.http.get(url)).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, url: &str, request: &B) -> Result<T> {
        let payload =
            serde_json::to_vec(request).map_err(|err| exn::Exn::from(ErrorKind::Encode(err.to_string())))?;
        let body = self
            .dispatch(self.http.post(url).header(reqwest::header::CONTENT_TYPE, "application/json").body(payload))
            .await?;
        serde_json::from_str(&body).map_err(|err| exn::Exn::from(ErrorKind::Decode(err.to_string())))
    }
}

/// Collapse a failed call into absence, keeping the diagnostic context in
/// the log. Not-found and transport failure are indistinguishable to the
/// caller; both read as "no data".
fn absorb<T>(method: &'static str, url: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(method, url, error = ?err, "upstream request failed, treating as absent");
            None
        },
    }
}

#[async_trait]
impl AddonProvider for CurseClient {
    async fn addon(&self, project_id: i32) -> Option<Addon> {
        let url = format!("{}/addon/{}", self.base_url, project_id);
        absorb("GET", &url, self.get_json(&url, &[]).await)
    }

    async fn addons(&self, project_ids: &[i32]) -> Option<Vec<Addon>> {
        let url = format!("{}/addon", self.base_url);
        absorb("POST", &url, self.post_json(&url, project_ids).await)
    }

    async fn description(&self, project_id: i32) -> Option<String> {
        let url = format!("{}/addon/{}/description", self.base_url, project_id);
        // The upstream wraps the description blob in a JSON string.
        absorb("GET", &url, self.get_json(&url, &[]).await)
    }

    async fn file(&self, project_id: i32, file_id: i32) -> Option<AddonFile> {
        let url = format!("{}/addon/{}/file/{}", self.base_url, project_id, file_id);
        absorb("GET", &url, self.get_json(&url, &[]).await)
    }

    async fn files(&self, project_id: i32) -> Option<Vec<AddonFile>> {
        let url = format!("{}/addon/{}/files", self.base_url, project_id);
        absorb("GET", &url, self.get_json(&url, &[]).await)
    }

    async fn files_by_keys(&self, keys: &[AddonFileKey]) -> Option<HashMap<i32, Vec<AddonFile>>> {
        let url = format!("{}/addon/files", self.base_url);
        absorb("POST", &url, self.post_json(&url, keys).await)
    }

    async fn changelog(&self, project_id: i32, file_id: i32) -> Option<String> {
        let url = format!("{}/addon/{}/file/{}/changelog", self.base_url, project_id, file_id);
        absorb("GET", &url, self.get_text(&url).await)
    }

    async fn search(&self, criteria: &SearchCriteria) -> Option<Vec<Addon>> {
        let url = format!("{}/addon/search", self.base_url);
        absorb("GET", &url, self.get_json(&url, &criteria.to_query()).await)
    }
}
