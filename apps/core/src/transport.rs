use serde::{Deserialize, Serialize};

use crate::app_state::{AppState, ServiceError};
use crate::contract::{CoreRequest, CoreResponse, JsonOperation, StateSnapshot};
use crate::favorites::FavoriteDraft;
use crate::host::HostWindow;
use crate::json_tool;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    ItemNotFound,
    InvalidDocument,
    Store,
    Config,
    Sync,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(
    state: &mut AppState,
    host: &mut dyn HostWindow,
    request: CoreRequest,
) -> TransportResponse {
    match execute(state, host, request) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_service_error(error),
        },
    }
}

pub fn handle_json(state: &mut AppState, host: &mut dyn HostWindow, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(state, host, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).unwrap_or_else(|error| {
        tracing::error!(%error, "failed to encode transport response");
        r#"{"status":"err","error":{"code":"invalid_request","message":"response encoding failed"}}"#
            .to_string()
    })
}

fn execute(
    state: &mut AppState,
    host: &mut dyn HostWindow,
    request: CoreRequest,
) -> Result<CoreResponse, ServiceError> {
    match request {
        CoreRequest::Query { text } => state.set_query(&text, host),
        CoreRequest::MoveSelection { direction } => state.move_selection(direction.into()),
        CoreRequest::Submit => {
            state.submit(host);
        }
        CoreRequest::Back => state.back_to_search(host),
        CoreRequest::Hotkey { has_focus } => {
            let action = state.on_hotkey(has_focus, host);
            tracing::debug!(?action, "hotkey toggled overlay");
        }
        CoreRequest::Escape => {
            state.on_escape(host);
        }
        CoreRequest::Login { username, password } => {
            if username.trim().is_empty() || password.is_empty() {
                return Err(ServiceError::InvalidRequest(
                    "username and password are required".to_string(),
                ));
            }
            state.login(&username, &password, host);
        }
        CoreRequest::Logout => state.logout(),
        CoreRequest::AddFavorite(fields) => {
            let draft = FavoriteDraft::new(&fields.name, &fields.url, &fields.keywords);
            state.add_favorite(&draft, host);
        }
        CoreRequest::UpdateFavorite { id, fields } => {
            let draft = FavoriteDraft::new(&fields.name, &fields.url, &fields.keywords);
            if draft.to_request().is_none() {
                return Err(ServiceError::InvalidRequest(
                    "favorite name and url are required".to_string(),
                ));
            }
            if !state.update_favorite(&id, &draft, host) {
                return Err(ServiceError::ItemNotFound(format!("favorite {id}")));
            }
        }
        CoreRequest::DeleteFavorite { id } => {
            if !state.delete_favorite(&id, host) {
                return Err(ServiceError::ItemNotFound(format!("favorite {id}")));
            }
        }
        CoreRequest::RefreshFavorites => {
            state.refresh_favorites(host);
        }
        CoreRequest::SelectProjectRoot { path } => match path {
            Some(path) => state.load_projects(&path, host),
            None => {
                state.select_project_root(host);
            }
        },
        CoreRequest::Json { operation, text } => {
            let text = match operation {
                JsonOperation::Validate => json_tool::validate(&text).map(|()| text)?,
                JsonOperation::Format => json_tool::format(&text)?,
                JsonOperation::Minify => json_tool::minify(&text)?,
            };
            return Ok(CoreResponse::Json { text });
        }
        CoreRequest::SaveSettings(fields) => state.apply_settings(&fields.into(), host)?,
        CoreRequest::State => {}
    }
    Ok(CoreResponse::State(StateSnapshot::from(&*state)))
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    let code = match &error {
        ServiceError::InvalidRequest(_) => ErrorCode::InvalidRequest,
        ServiceError::ItemNotFound(_) => ErrorCode::ItemNotFound,
        ServiceError::JsonTool(_) => ErrorCode::InvalidDocument,
        ServiceError::Store(_) => ErrorCode::Store,
        ServiceError::Config(_) => ErrorCode::Config,
        ServiceError::Sync(_) => ErrorCode::Sync,
    };
    ErrorResponse {
        code,
        message: error.to_string(),
    }
}
