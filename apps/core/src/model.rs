use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Action,
    Calculation,
    WebSearch,
    PageNavigation,
    Project,
    Favorite,
}

/// Discriminator selecting the dispatch branch for a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ActionTag {
    Terminal,
    Calc,
    Google,
    Settings,
    Favorites,
    JsonEditor,
    OpenProject,
    OpenFavorite,
    /// Application entries that fall back to a web search for their title.
    OpenApp(String),
}

impl ActionTag {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Terminal => "terminal",
            Self::Calc => "calc",
            Self::Google => "google",
            Self::Settings => "settings",
            Self::Favorites => "favorites",
            Self::JsonEditor => "json-editor",
            Self::OpenProject => "open-project",
            Self::OpenFavorite => "open-favorite",
            Self::OpenApp(app) => app,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "terminal" => Self::Terminal,
            "calc" => Self::Calc,
            "google" => Self::Google,
            "settings" => Self::Settings,
            "favorites" => Self::Favorites,
            "json-editor" => Self::JsonEditor,
            "open-project" => Self::OpenProject,
            "open-favorite" => Self::OpenFavorite,
            other => Self::OpenApp(other.to_string()),
        }
    }
}

impl From<String> for ActionTag {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ActionTag> for String {
    fn from(value: ActionTag) -> Self {
        value.as_str().to_string()
    }
}

/// One matchable, actionable search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub action: ActionTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_id: Option<String>,
    #[serde(skip)]
    match_text: String,
}

impl Candidate {
    /// `description` only feeds matching; it is never displayed.
    pub fn new(
        kind: CandidateKind,
        icon: &str,
        title: &str,
        description: &str,
        subtitle: &str,
        action: ActionTag,
    ) -> Self {
        let match_text = format!("{title} {description}").to_lowercase();
        Self {
            kind,
            icon: icon.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            action,
            query_text: None,
            project_path: None,
            url: None,
            favorite_id: None,
            match_text,
        }
    }

    pub fn with_query_text(mut self, query: &str) -> Self {
        self.query_text = Some(query.to_string());
        self
    }

    pub fn with_project_path(mut self, path: &str) -> Self {
        self.project_path = Some(path.to_string());
        self
    }

    pub fn with_favorite(mut self, id: &str, url: &str) -> Self {
        self.favorite_id = Some(id.to_string());
        self.url = Some(url.to_string());
        self
    }

    pub fn match_text(&self) -> &str {
        &self.match_text
    }

    /// True when every token is a substring of the lowercased match text.
    pub fn matches_all(&self, tokens: &[&str]) -> bool {
        tokens.iter().all(|token| self.match_text.contains(token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub path: String,
}

impl Project {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSite {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl FavoriteSite {
    pub fn new(id: &str, name: &str, url: &str, keywords: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            keywords: keywords.map(str::to_string),
        }
    }

    /// Entries without a name or URL cannot be matched or opened.
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Search,
    Settings,
    Favorites,
    JsonEditor,
}

impl ViewState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Settings => "settings",
            Self::Favorites => "favorites",
            Self::JsonEditor => "json_editor",
        }
    }
}

pub fn normalize_for_search(input: &str) -> String {
    input.trim().to_lowercase()
}
