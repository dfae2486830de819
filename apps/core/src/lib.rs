pub mod app_state;
pub mod calc;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod dispatcher;
pub mod favorite_store;
pub mod favorites;
pub mod host;
pub mod json_tool;
pub mod layout;
pub mod logging;
pub mod model;
pub mod overlay_state;
pub mod projects;
pub mod runtime;
pub mod search;
pub mod settings;
pub mod sync;
pub mod transport;
