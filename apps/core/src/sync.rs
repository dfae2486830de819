//! Remote bookmark sync: login plus bookmark list/add over HTTP with JSON bodies.

use std::sync::Arc;
use std::thread::JoinHandle;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::model::FavoriteSite;

pub const LOGIN_PATH: &str = "/auth/login";
pub const BOOKMARKS_ADD_PATH: &str = "/api/v1/bookmarks/add";
pub const BOOKMARKS_LIST_PATH: &str = "/api/v1/bookmarks/list";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request task panicked")]
    TaskPanicked,
}

impl SyncError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

impl LoginResponse {
    /// Display name for the session, checked in order: `username`, `name`,
    /// `user.username`, `user.name`, then the name typed at login.
    pub fn resolved_username(&self, typed: &str) -> String {
        let nested = self.user.as_ref();
        [
            self.username.as_deref(),
            self.name.as_deref(),
            nested.and_then(|u| u.username.as_deref()),
            nested.and_then(|u| u.name.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(typed.trim())
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBookmarkRequest {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkDto {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// Servers hand out both `"id": "7"` and `"id": 7`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

impl BookmarkDto {
    /// Entries without a name or URL are dropped. A missing id falls back to
    /// the URL.
    pub fn into_favorite(self) -> Option<FavoriteSite> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| url.clone());
        Some(FavoriteSite {
            id,
            name,
            url,
            keywords: self.keywords.filter(|k| !k.trim().is_empty()),
        })
    }
}

pub trait SyncClient: Send + Sync {
    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, SyncError>;
    fn add_bookmark(
        &self,
        request: &AddBookmarkRequest,
        token: Option<&str>,
    ) -> Result<BookmarkDto, SyncError>;
    fn list_bookmarks(&self, token: &str) -> Result<Vec<BookmarkDto>, SyncError>;
}

pub struct HttpSyncClient {
    client: Client,
    base_url: String,
}

impl HttpSyncClient {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SyncError> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("error").to_string()
            } else {
                body
            };
            return Err(SyncError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>()?)
    }
}

impl SyncClient for HttpSyncClient {
    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, SyncError> {
        tracing::info!(username = %request.username, "login request");
        self.send(self.client.post(self.url(LOGIN_PATH)).json(request))
    }

    fn add_bookmark(
        &self,
        request: &AddBookmarkRequest,
        token: Option<&str>,
    ) -> Result<BookmarkDto, SyncError> {
        let mut builder = self.client.post(self.url(BOOKMARKS_ADD_PATH)).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        self.send(builder)
    }

    /// Elements that do not decode as a bookmark are skipped, not fatal.
    fn list_bookmarks(&self, token: &str) -> Result<Vec<BookmarkDto>, SyncError> {
        let raw: Vec<serde_json::Value> = self.send(
            self.client
                .get(self.url(BOOKMARKS_LIST_PATH))
                .bearer_auth(token),
        )?;
        let list = raw
            .into_iter()
            .enumerate()
            .filter_map(
                |(index, value)| match serde_json::from_value::<BookmarkDto>(value) {
                    Ok(dto) => Some(dto),
                    Err(error) => {
                        tracing::warn!(index, %error, "skipping undecodable bookmark");
                        None
                    }
                },
            )
            .collect();
        Ok(list)
    }
}

/// Identifies one request in a stream of requests of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Hands out increasing tickets; only the newest ticket is current, so
/// results from superseded requests can be discarded.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// A request running on a worker thread.
pub struct PendingRequest<T> {
    pub ticket: RequestTicket,
    handle: JoinHandle<Result<T, SyncError>>,
}

impl<T: Send + 'static> PendingRequest<T> {
    pub fn spawn<F>(ticket: RequestTicket, job: F) -> Self
    where
        F: FnOnce() -> Result<T, SyncError> + Send + 'static,
    {
        Self {
            ticket,
            handle: std::thread::spawn(job),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the request completes.
    pub fn wait(self) -> (RequestTicket, Result<T, SyncError>) {
        let result = self.handle.join().unwrap_or(Err(SyncError::TaskPanicked));
        (self.ticket, result)
    }
}

pub fn spawn_list_bookmarks(
    client: Arc<dyn SyncClient>,
    token: String,
    ticket: RequestTicket,
) -> PendingRequest<Vec<BookmarkDto>> {
    PendingRequest::spawn(ticket, move || client.list_bookmarks(&token))
}

pub fn spawn_login(
    client: Arc<dyn SyncClient>,
    request: LoginRequest,
    ticket: RequestTicket,
) -> PendingRequest<LoginResponse> {
    PendingRequest::spawn(ticket, move || client.login(&request))
}
