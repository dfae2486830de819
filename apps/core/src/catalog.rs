use crate::config::{Config, WebSearchProvider};
use crate::model::{ActionTag, Candidate, CandidateKind, FavoriteSite, Project};

#[derive(Debug, Clone, Copy)]
pub struct BuiltInAction {
    pub kind: CandidateKind,
    pub tag: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub keywords: &'static str,
}

pub fn built_in_actions() -> &'static [BuiltInAction] {
    &[
        BuiltInAction {
            kind: CandidateKind::Action,
            tag: "terminal",
            icon: "🖥️",
            title: "Open Terminal",
            subtitle: "Open the system terminal",
            keywords: "terminal shell console 终端",
        },
        BuiltInAction {
            kind: CandidateKind::Action,
            tag: "photoshop",
            icon: "🎨",
            title: "Open Photoshop",
            subtitle: "Launch Adobe Photoshop",
            keywords: "ps photoshop image editor 图像",
        },
        BuiltInAction {
            kind: CandidateKind::Action,
            tag: "notepad",
            icon: "📝",
            title: "Open Notepad",
            subtitle: "Open a plain text editor",
            keywords: "notepad text editor 记事本",
        },
        BuiltInAction {
            kind: CandidateKind::Action,
            tag: "safari",
            icon: "🌏",
            title: "Open Safari",
            subtitle: "Launch the Safari browser",
            keywords: "safari browser web 浏览器",
        },
        BuiltInAction {
            kind: CandidateKind::Calculation,
            tag: "calc",
            icon: "🧮",
            title: "Calculator",
            subtitle: "Evaluate the typed expression and copy the result",
            keywords: "calc calculate math expression 计算",
        },
    ]
}

pub fn built_in_candidates() -> Vec<Candidate> {
    built_in_actions()
        .iter()
        .map(|action| {
            Candidate::new(
                action.kind,
                action.icon,
                action.title,
                action.keywords,
                action.subtitle,
                ActionTag::parse(action.tag),
            )
        })
        .collect()
}

pub fn project_candidate(project: &Project) -> Candidate {
    Candidate::new(
        CandidateKind::Project,
        "📁",
        &project.name,
        &format!("project {}", project.name),
        &project.path,
        ActionTag::OpenProject,
    )
    .with_project_path(&project.path)
}

/// Returns `None` for entries that cannot be matched or opened.
pub fn favorite_candidate(site: &FavoriteSite) -> Option<Candidate> {
    if !site.is_well_formed() {
        return None;
    }

    let description = match site.keywords.as_deref().map(str::trim) {
        Some(keywords) if !keywords.is_empty() => format!("favorite {keywords}"),
        _ => format!("favorite site {}", site.name),
    };

    Some(
        Candidate::new(
            CandidateKind::Favorite,
            "🔖",
            &site.name,
            &description,
            &site.url,
            ActionTag::OpenFavorite,
        )
        .with_favorite(&site.id, &site.url),
    )
}

pub fn settings_candidate() -> Candidate {
    Candidate::new(
        CandidateKind::PageNavigation,
        "⚙️",
        "Open Settings",
        "settings preferences config 设置",
        "Open the application settings page",
        ActionTag::Settings,
    )
}

pub fn favorites_candidate() -> Candidate {
    Candidate::new(
        CandidateKind::PageNavigation,
        "🔖",
        "Open Favorites",
        "favorite bookmark 收藏 书签",
        "Manage favorite sites",
        ActionTag::Favorites,
    )
}

pub fn json_editor_candidate() -> Candidate {
    Candidate::new(
        CandidateKind::PageNavigation,
        "🧩",
        "Open JSON Editor",
        "json editor",
        "Validate and format JSON",
        ActionTag::JsonEditor,
    )
}

/// `query` is carried verbatim; it is not trimmed or lowercased.
pub fn web_search_candidate(query: &str) -> Candidate {
    Candidate::new(
        CandidateKind::WebSearch,
        "🔍",
        &format!("Search Google for \"{query}\""),
        "google web search",
        "Open the search in the default browser",
        ActionTag::Google,
    )
    .with_query_text(query)
}

pub fn web_search_url(cfg: &Config, query: &str) -> Option<String> {
    let encoded = urlencoding::encode(query);
    let url = match cfg.web_search_provider {
        WebSearchProvider::Google => format!("https://www.google.com/search?q={encoded}"),
        WebSearchProvider::Duckduckgo => format!("https://duckduckgo.com/?q={encoded}"),
        WebSearchProvider::Bing => format!("https://www.bing.com/search?q={encoded}"),
        WebSearchProvider::Custom => {
            let template = cfg.web_search_custom_template.trim();
            if template.is_empty() || !template.contains("{query}") {
                return None;
            }
            template.replace("{query}", &encoded)
        }
    };
    Some(url)
}
