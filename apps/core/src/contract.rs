use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app_state::{AppState, MoveDirection};
use crate::model::{Candidate, FavoriteSite, ViewState};
use crate::settings::SettingsDraft;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonOperation {
    Validate,
    Format,
    Minify,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteFields {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsFields {
    pub hotkey: String,
    pub api_base_url: String,
    #[serde(default)]
    pub tray_mode: bool,
    #[serde(default)]
    pub project_root: Option<PathBuf>,
}

impl From<SettingsFields> for SettingsDraft {
    fn from(value: SettingsFields) -> Self {
        Self {
            hotkey: value.hotkey,
            api_base_url: value.api_base_url,
            tray_mode: value.tray_mode,
            project_root: value.project_root,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreRequest {
    Query { text: String },
    MoveSelection { direction: Direction },
    Submit,
    Back,
    Hotkey {
        #[serde(default)]
        has_focus: bool,
    },
    Escape,
    Login { username: String, password: String },
    Logout,
    AddFavorite(FavoriteFields),
    UpdateFavorite {
        id: String,
        #[serde(flatten)]
        fields: FavoriteFields,
    },
    DeleteFavorite { id: String },
    RefreshFavorites,
    /// Without a path the host's directory picker is used.
    SelectProjectRoot {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    Json { operation: JsonOperation, text: String },
    SaveSettings(SettingsFields),
    State,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StateSnapshot {
    pub view: ViewState,
    pub query: String,
    pub selected_index: usize,
    pub candidates: Vec<Candidate>,
    pub height: u32,
    pub visible: bool,
    pub favorites: Vec<FavoriteSite>,
    pub project_count: usize,
    pub logged_in_as: Option<String>,
    pub favorite_status: Option<String>,
    pub login_status: Option<String>,
    /// Canonical global shortcut; the host (re)registers it when it changes.
    pub hotkey: String,
}

impl From<&AppState> for StateSnapshot {
    fn from(state: &AppState) -> Self {
        Self {
            view: state.view(),
            query: state.query().to_string(),
            selected_index: state.selected_index(),
            candidates: state.candidates().to_vec(),
            height: state.window_height(),
            visible: state.overlay().is_visible(),
            favorites: state.favorites().to_vec(),
            project_count: state.projects().len(),
            logged_in_as: state.session().map(|s| s.username.clone()),
            favorite_status: state.favorite_status().map(|s| s.message().to_string()),
            login_status: state.login_status().map(str::to_string),
            hotkey: state.config().hotkey.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreResponse {
    State(StateSnapshot),
    Json { text: String },
}
