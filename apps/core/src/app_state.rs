use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use thiserror::Error;

use crate::config::{self, validate, Config};
use crate::dispatcher::{dispatch, DispatchContext, Transition};
use crate::favorite_store::{self, StoreError};
use crate::favorites::{self, FavoriteDraft, FavoriteStatus};
use crate::host::{apply_effects, HostWindow, Point};
use crate::json_tool::JsonToolError;
use crate::layout::height_for;
use crate::model::{AuthSession, Candidate, FavoriteSite, Project, ViewState};
use crate::overlay_state::{OverlayState, ToggleAction};
use crate::search::filter;
use crate::settings::SettingsDraft;
use crate::sync::{
    spawn_list_bookmarks, spawn_login, BookmarkDto, HttpSyncClient, LoginRequest, LoginResponse,
    PendingRequest, RequestSequencer, RequestTicket, SyncClient, SyncError,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("sync client error: {0}")]
    Sync(#[from] SyncError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("not found: {0}")]
    ItemNotFound(String),
    #[error(transparent)]
    JsonTool(#[from] JsonToolError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Everything the launcher knows about the current session. The query
/// filter and dispatcher only ever see state passed in from here.
pub struct AppState {
    config: Config,
    query: String,
    selected_index: usize,
    view: ViewState,
    candidates: Vec<Candidate>,
    project_root: Option<PathBuf>,
    projects: Vec<Project>,
    favorites: Vec<FavoriteSite>,
    session: Option<AuthSession>,
    favorite_status: Option<FavoriteStatus>,
    login_status: Option<String>,
    overlay: OverlayState,
    store: Option<Connection>,
    sync: Arc<dyn SyncClient>,
    login_requests: RequestSequencer,
    refresh_requests: RequestSequencer,
}

impl AppState {
    /// Opens the on-disk favorites cache and the HTTP sync client from
    /// `config`. A cache that cannot be opened is logged and the session runs
    /// from memory only.
    pub fn open(config: Config) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        let store = match favorite_store::open(&config.favorites_db_path) {
            Ok(conn) => Some(conn),
            Err(error) => {
                tracing::warn!(%error, "favorites cache unavailable; running in memory");
                None
            }
        };
        let sync = Arc::new(HttpSyncClient::new(config.api_base())?);
        Self::with_parts(config, store, sync)
    }

    pub fn with_parts(
        config: Config,
        store: Option<Connection>,
        sync: Arc<dyn SyncClient>,
    ) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;

        let (favorites, session) = match &store {
            Some(db) => (
                favorite_store::load_favorites(db).unwrap_or_else(|error| {
                    tracing::warn!(%error, "failed to load cached favorites");
                    Vec::new()
                }),
                favorite_store::load_session(db).unwrap_or_else(|error| {
                    tracing::warn!(%error, "failed to load cached session");
                    None
                }),
            ),
            None => (Vec::new(), None),
        };

        Ok(Self {
            project_root: config.project_root.clone(),
            config,
            query: String::new(),
            selected_index: 0,
            view: ViewState::Search,
            candidates: Vec::new(),
            projects: Vec::new(),
            favorites,
            session,
            favorite_status: None,
            login_status: None,
            overlay: OverlayState::default(),
            store,
            sync,
            login_requests: RequestSequencer::default(),
            refresh_requests: RequestSequencer::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    pub fn favorites(&self) -> &[FavoriteSite] {
        &self.favorites
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn favorite_status(&self) -> Option<FavoriteStatus> {
        self.favorite_status
    }

    pub fn login_status(&self) -> Option<&str> {
        self.login_status.as_deref()
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn window_height(&self) -> u32 {
        height_for(self.view, self.candidates.len())
    }

    /// Enumerates the configured project root, if any, and applies tray mode.
    pub fn start(&mut self, host: &mut dyn HostWindow) {
        self.overlay.set_tray_mode(self.config.tray_mode, host);
        if let Some(root) = self.project_root.clone() {
            self.load_projects(&root, host);
        }
        if self.is_logged_in() {
            self.refresh_favorites(host);
        }
        host.resize(self.window_height());
    }

    pub fn set_query(&mut self, query: &str, host: &mut dyn HostWindow) {
        self.query = query.to_string();
        self.selected_index = 0;
        self.recompute(host);
    }

    /// Selection keys only apply to the search view.
    pub fn move_selection(&mut self, direction: MoveDirection) {
        if self.view != ViewState::Search || self.candidates.is_empty() {
            return;
        }
        let last = self.candidates.len() - 1;
        self.selected_index = match direction {
            MoveDirection::Up => self.selected_index.saturating_sub(1),
            MoveDirection::Down => (self.selected_index + 1).min(last),
        };
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.candidates.get(self.selected_index)
    }

    /// Dispatches the selected candidate. Returns `None` when nothing is
    /// selectable.
    pub fn submit(&mut self, host: &mut dyn HostWindow) -> Option<Transition> {
        if self.view != ViewState::Search {
            return None;
        }
        let candidate = self.selected()?.clone();
        Some(self.activate(&candidate, host))
    }

    pub fn activate(&mut self, candidate: &Candidate, host: &mut dyn HostWindow) -> Transition {
        let outcome = dispatch(
            candidate,
            &DispatchContext {
                query: &self.query,
                config: &self.config,
            },
        );
        apply_effects(host, &outcome.effects);

        match outcome.transition {
            Transition::Navigate(view) => {
                self.view = view;
                self.selected_index = 0;
                self.candidates.clear();
            }
            Transition::Complete => {
                self.overlay.set_visible(false);
                self.reset_search();
                host.resize(self.window_height());
            }
            Transition::Ignored => {}
        }
        outcome.transition
    }

    pub fn back_to_search(&mut self, host: &mut dyn HostWindow) {
        self.view = ViewState::Search;
        self.reset_search();
        host.resize(self.window_height());
    }

    pub fn on_hotkey(&mut self, has_focus: bool, host: &mut dyn HostWindow) -> ToggleAction {
        let action = self.overlay.on_hotkey(has_focus);
        if action == ToggleAction::Hide {
            host.hide();
            self.reset_search();
            host.resize(self.window_height());
        }
        action
    }

    pub fn on_escape(&mut self, host: &mut dyn HostWindow) -> bool {
        if !self.overlay.on_escape() {
            return false;
        }
        host.hide();
        self.reset_search();
        host.resize(self.window_height());
        true
    }

    pub fn drag_down(&mut self, origin: Point, host: &mut dyn HostWindow) {
        self.overlay.drag_down(origin, host);
    }

    pub fn drag_move(&mut self, point: Point, host: &mut dyn HostWindow) -> bool {
        self.overlay.drag_move(point, host)
    }

    pub fn drag_up(&mut self, host: &mut dyn HostWindow) {
        self.overlay.drag_up(host);
    }

    pub fn set_tray_mode(&mut self, enabled: bool, host: &mut dyn HostWindow) {
        self.config.tray_mode = enabled;
        self.overlay.set_tray_mode(enabled, host);
    }

    /// Applies an edited settings page and writes the config file. A failed
    /// write is logged; the new values stay active for this session.
    pub fn apply_settings(
        &mut self,
        draft: &SettingsDraft,
        host: &mut dyn HostWindow,
    ) -> Result<(), ServiceError> {
        let mut next = self.config.clone();
        draft
            .apply_to(&mut next)
            .map_err(ServiceError::InvalidRequest)?;

        let base_changed = next.api_base() != self.config.api_base();
        let root_changed = next.project_root != self.config.project_root;
        self.config = next;

        if base_changed {
            self.sync = Arc::new(HttpSyncClient::new(self.config.api_base())?);
            tracing::info!(api_base_url = %self.config.api_base(), "sync endpoint changed");
        }
        self.overlay.set_tray_mode(self.config.tray_mode, host);
        if root_changed {
            match self.config.project_root.clone() {
                Some(root) => self.load_projects(&root, host),
                None => {
                    self.project_root = None;
                    self.projects.clear();
                    self.recompute(host);
                }
            }
        }

        if let Err(error) = config::save(&self.config) {
            tracing::warn!(%error, "failed to save config");
        }
        Ok(())
    }

    /// Asks the host for a directory and loads its subdirectories as
    /// projects. Returns false when the picker was dismissed.
    pub fn select_project_root(&mut self, host: &mut dyn HostWindow) -> bool {
        let Some(root) = host.select_directory() else {
            return false;
        };
        self.load_projects(&root, host);
        true
    }

    pub fn load_projects(&mut self, root: &Path, host: &mut dyn HostWindow) {
        self.project_root = Some(root.to_path_buf());
        self.config.project_root = Some(root.to_path_buf());
        self.projects = match host.list_subdirectories(root) {
            Ok(projects) => projects,
            Err(error) => {
                tracing::warn!(root = %root.display(), %error, "failed to read project root");
                Vec::new()
            }
        };
        tracing::info!(count = self.projects.len(), "project list replaced");
        self.recompute(host);
    }

    pub fn login(&mut self, username: &str, password: &str, host: &mut dyn HostWindow) -> bool {
        let pending = self.begin_login(username, password);
        let (ticket, result) = pending.wait();
        self.finish_login(ticket, username, result, host)
    }

    /// Starts a login on a worker thread; pass its result to `finish_login`.
    pub fn begin_login(&mut self, username: &str, password: &str) -> PendingRequest<LoginResponse> {
        let ticket = self.login_requests.begin();
        self.login_status = Some("Logging in...".to_string());
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        spawn_login(Arc::clone(&self.sync), request, ticket)
    }

    /// Applies a login result. Results from a superseded login are dropped
    /// and reported as `false`.
    pub fn finish_login(
        &mut self,
        ticket: RequestTicket,
        typed_username: &str,
        result: Result<LoginResponse, SyncError>,
        host: &mut dyn HostWindow,
    ) -> bool {
        if !self.login_requests.is_current(ticket) {
            tracing::debug!(?ticket, "discarding stale login response");
            return false;
        }

        match result {
            Ok(response) if !response.token.trim().is_empty() => {
                let username = response.resolved_username(typed_username);
                tracing::info!(%username, "logged in");
                self.login_status = Some(format!("Logged in as {username}"));
                self.session = Some(AuthSession {
                    token: response.token,
                    username,
                });
                self.persist_session();
                self.refresh_favorites(host);
                true
            }
            Ok(_) => {
                self.login_status = Some("Login failed: server returned no token".to_string());
                false
            }
            Err(error) => {
                tracing::warn!(%error, "login failed");
                self.login_status = Some(format!("Login failed: {error}"));
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.login_status = Some("Logged out".to_string());
        // Any in-flight login or refresh belongs to the old session.
        self.login_requests.begin();
        self.refresh_requests.begin();
        self.persist_session();
    }

    pub fn refresh_favorites(&mut self, host: &mut dyn HostWindow) -> FavoriteStatus {
        match self.begin_refresh() {
            Some(pending) => {
                let (ticket, result) = pending.wait();
                self.finish_refresh(ticket, result, host);
            }
            None => self.favorite_status = Some(FavoriteStatus::UsingLocal),
        }
        self.favorite_status.unwrap_or(FavoriteStatus::UsingLocal)
    }

    /// Starts a bookmark list request, or returns `None` when logged out.
    pub fn begin_refresh(&mut self) -> Option<PendingRequest<Vec<BookmarkDto>>> {
        let token = self.session.as_ref()?.token.clone();
        let ticket = self.refresh_requests.begin();
        Some(spawn_list_bookmarks(Arc::clone(&self.sync), token, ticket))
    }

    /// Applies a bookmark list result. Returns false for stale results.
    pub fn finish_refresh(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<BookmarkDto>, SyncError>,
        host: &mut dyn HostWindow,
    ) -> bool {
        if !self.refresh_requests.is_current(ticket) {
            tracing::debug!(?ticket, "discarding stale bookmark list");
            return false;
        }

        match result {
            Ok(list) => {
                let server: Vec<FavoriteSite> =
                    list.into_iter().filter_map(BookmarkDto::into_favorite).collect();
                self.favorites = favorites::merge_server_list(&self.favorites, server);
                self.favorite_status = Some(FavoriteStatus::Refreshed);
                self.persist_favorites();
                self.recompute(host);
            }
            Err(error) => {
                tracing::warn!(%error, "bookmark refresh failed");
                self.favorite_status = Some(FavoriteStatus::RefreshFailed);
            }
        }
        true
    }

    pub fn add_favorite(&mut self, draft: &FavoriteDraft, host: &mut dyn HostWindow) -> FavoriteStatus {
        let mut status = favorites::add_favorite(
            &mut self.favorites,
            draft,
            self.session.as_ref(),
            self.sync.as_ref(),
        );
        if status != FavoriteStatus::MissingFields {
            self.persist_favorites();
            self.recompute(host);
        }
        if status == FavoriteStatus::Synced
            && self.refresh_favorites(host) != FavoriteStatus::Refreshed
        {
            status = FavoriteStatus::SyncedRefreshFailed;
        }
        self.favorite_status = Some(status);
        status
    }

    pub fn update_favorite(&mut self, id: &str, draft: &FavoriteDraft, host: &mut dyn HostWindow) -> bool {
        let updated = favorites::update_favorite(&mut self.favorites, id, draft);
        if updated {
            self.persist_favorites();
            self.recompute(host);
        }
        updated
    }

    pub fn delete_favorite(&mut self, id: &str, host: &mut dyn HostWindow) -> bool {
        let deleted = favorites::delete_favorite(&mut self.favorites, id);
        if deleted {
            self.persist_favorites();
            self.recompute(host);
        }
        deleted
    }

    fn reset_search(&mut self) {
        self.query.clear();
        self.selected_index = 0;
        self.candidates.clear();
    }

    fn recompute(&mut self, host: &mut dyn HostWindow) {
        self.candidates = if self.view == ViewState::Search {
            filter(&self.query, &self.projects, &self.favorites)
        } else {
            Vec::new()
        };
        if self.selected_index >= self.candidates.len() {
            self.selected_index = 0;
        }
        host.resize(self.window_height());
    }

    fn persist_favorites(&mut self) {
        let Some(db) = self.store.as_mut() else {
            return;
        };
        if let Err(error) = favorite_store::replace_favorites(db, &self.favorites) {
            tracing::warn!(%error, "failed to persist favorites");
        }
    }

    fn persist_session(&mut self) {
        let Some(db) = self.store.as_ref() else {
            return;
        };
        if let Err(error) = favorite_store::save_session(db, self.session.as_ref()) {
            tracing::warn!(%error, "failed to persist session");
        }
    }
}
