use crate::catalog::{
    built_in_candidates, favorite_candidate, favorites_candidate, json_editor_candidate,
    project_candidate, settings_candidate, web_search_candidate,
};
use crate::model::{normalize_for_search, Candidate, FavoriteSite, Project};

pub const SETTINGS_KEYWORDS: &[&str] = &["设置", "setting", "config"];
pub const FAVORITES_KEYWORDS: &[&str] = &["收藏", "favorite", "bookmark"];
pub const JSON_KEYWORD: &str = "json";

/// Which synthetic navigation entries a normalized query asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryIntent {
    pub settings: bool,
    pub favorites: bool,
    pub json: bool,
}

impl QueryIntent {
    pub fn detect(normalized_query: &str) -> Self {
        let contains_any =
            |keywords: &[&str]| keywords.iter().any(|kw| normalized_query.contains(kw));
        Self {
            settings: contains_any(SETTINGS_KEYWORDS),
            favorites: contains_any(FAVORITES_KEYWORDS),
            json: normalized_query.contains(JSON_KEYWORD),
        }
    }
}

/// Resolves a raw query into the ordered candidate list.
///
/// Substring matches come first in catalog order (built-ins, projects,
/// favorites), followed by the settings/favorites/json navigation entries
/// and a trailing web search carrying `query` verbatim. An empty or
/// whitespace-only query yields no candidates.
pub fn filter(query: &str, projects: &[Project], favorites: &[FavoriteSite]) -> Vec<Candidate> {
    let normalized = normalize_for_search(query);
    if normalized.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let intent = QueryIntent::detect(&normalized);

    let mut catalog = built_in_candidates();
    catalog.extend(projects.iter().map(project_candidate));
    // Browsing favorites by keyword should not list every site as well.
    if !intent.favorites {
        catalog.extend(favorites.iter().filter_map(favorite_candidate));
    }

    let mut out: Vec<Candidate> = catalog
        .into_iter()
        .filter(|candidate| candidate.matches_all(&tokens))
        .collect();

    if intent.settings {
        out.push(settings_candidate());
    }
    if intent.favorites {
        out.push(favorites_candidate());
    }
    if intent.json {
        out.push(json_editor_candidate());
    }
    out.push(web_search_candidate(query));
    out
}
