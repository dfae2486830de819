use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{AuthSession, FavoriteSite};
use crate::sync::{AddBookmarkRequest, SyncClient};

pub const LOCAL_ID_PREFIX: &str = "local-";

/// Form input for adding or editing a favorite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteDraft {
    pub name: String,
    pub url: String,
    pub keywords: String,
}

impl FavoriteDraft {
    pub fn new(name: &str, url: &str, keywords: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            keywords: keywords.to_string(),
        }
    }

    /// Trimmed payload, or `None` when name or URL is blank.
    pub fn to_request(&self) -> Option<AddBookmarkRequest> {
        let name = self.name.trim();
        let url = self.url.trim();
        if name.is_empty() || url.is_empty() {
            return None;
        }
        let keywords = Some(self.keywords.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        Some(AddBookmarkRequest {
            name: name.to_string(),
            url: url.to_string(),
            keywords,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStatus {
    MissingFields,
    SavedLocally,
    Synced,
    SyncedRefreshFailed,
    RemoteFailedSavedLocally,
    UsingLocal,
    Refreshed,
    RefreshFailed,
}

impl FavoriteStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "Please enter a site name and address.",
            Self::SavedLocally => "Not logged in; saved locally.",
            Self::Synced => "Added and synced; refreshed from server.",
            Self::SyncedRefreshFailed => "Added and synced; refresh from server failed.",
            Self::RemoteFailedSavedLocally => "Server request failed; saved locally for now.",
            Self::UsingLocal => "Not logged in; using local favorites.",
            Self::Refreshed => "Favorites loaded from server.",
            Self::RefreshFailed => "Failed to fetch favorites; using local cache.",
        }
    }
}

impl std::fmt::Display for FavoriteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// A timestamp-based id that does not collide with any id in `sites`.
pub fn local_id(sites: &[FavoriteSite]) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mut candidate = nanos;
    loop {
        let id = format!("{LOCAL_ID_PREFIX}{candidate}");
        if !sites.iter().any(|site| site.id == id) {
            return id;
        }
        candidate += 1;
    }
}

pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// Adds a favorite. Logged out, it is stored locally only; logged in, the
/// server is tried first and a failure still keeps the entry locally.
/// `Synced` means the caller should follow up with a refresh.
pub fn add_favorite(
    sites: &mut Vec<FavoriteSite>,
    draft: &FavoriteDraft,
    session: Option<&AuthSession>,
    client: &dyn SyncClient,
) -> FavoriteStatus {
    let Some(request) = draft.to_request() else {
        return FavoriteStatus::MissingFields;
    };

    let Some(session) = session else {
        let site = local_site(sites, &request);
        sites.push(site);
        return FavoriteStatus::SavedLocally;
    };

    match client.add_bookmark(&request, Some(&session.token)) {
        Ok(created) => {
            let id = created
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| local_id(sites));
            sites.push(FavoriteSite {
                id,
                name: created.name.filter(|n| !n.is_empty()).unwrap_or(request.name),
                url: created.url.filter(|u| !u.is_empty()).unwrap_or(request.url),
                keywords: created.keywords.or(request.keywords),
            });
            FavoriteStatus::Synced
        }
        Err(error) => {
            tracing::warn!(%error, "bookmark add failed; keeping local copy");
            let site = local_site(sites, &request);
            sites.push(site);
            FavoriteStatus::RemoteFailedSavedLocally
        }
    }
}

fn local_site(sites: &[FavoriteSite], request: &AddBookmarkRequest) -> FavoriteSite {
    FavoriteSite {
        id: local_id(sites),
        name: request.name.clone(),
        url: request.url.clone(),
        keywords: request.keywords.clone(),
    }
}

/// Edits the favorite with `id`. Returns false when the id is unknown or the
/// draft is missing a name or URL.
pub fn update_favorite(sites: &mut [FavoriteSite], id: &str, draft: &FavoriteDraft) -> bool {
    let Some(request) = draft.to_request() else {
        return false;
    };
    let Some(site) = sites.iter_mut().find(|site| site.id == id) else {
        return false;
    };
    site.name = request.name;
    site.url = request.url;
    site.keywords = request.keywords;
    true
}

pub fn delete_favorite(sites: &mut Vec<FavoriteSite>, id: &str) -> bool {
    let before = sites.len();
    sites.retain(|site| site.id != id);
    sites.len() != before
}

/// Server entries replace the collection (first occurrence of a URL wins);
/// locally created entries whose URL the server lacks are kept after them.
pub fn merge_server_list(local: &[FavoriteSite], server: Vec<FavoriteSite>) -> Vec<FavoriteSite> {
    let mut seen_urls = HashSet::new();
    let mut merged: Vec<FavoriteSite> = server
        .into_iter()
        .filter(|site| seen_urls.insert(site.url.trim().to_string()))
        .collect();

    for site in local {
        if is_local_id(&site.id) && seen_urls.insert(site.url.trim().to_string()) {
            merged.push(site.clone());
        }
    }
    merged
}
