use crate::model::ViewState;

pub const INPUT_HEIGHT: u32 = 75;
pub const BASE_HEIGHT: u32 = INPUT_HEIGHT;
pub const ITEM_HEIGHT: u32 = 56;
pub const MAX_VISIBLE_ITEMS: usize = 6;
pub const MORE_HEIGHT: u32 = 28;
pub const SETTINGS_HEIGHT: u32 = 520;
pub const FAVORITES_HEIGHT: u32 = 600;

/// Target window height for a view and the number of visible results.
pub fn height_for(view: ViewState, result_count: usize) -> u32 {
    match view {
        // The JSON editor lives inside the settings page.
        ViewState::Settings | ViewState::JsonEditor => SETTINGS_HEIGHT,
        ViewState::Favorites => FAVORITES_HEIGHT,
        ViewState::Search => search_height(result_count),
    }
}

fn search_height(result_count: usize) -> u32 {
    if result_count == 0 {
        return BASE_HEIGHT;
    }
    let visible = result_count.min(MAX_VISIBLE_ITEMS) as u32;
    let more = if result_count > MAX_VISIBLE_ITEMS {
        MORE_HEIGHT
    } else {
        0
    };
    INPUT_HEIGHT + visible * ITEM_HEIGHT + more
}
