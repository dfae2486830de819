use quicklaunch_core::model::{ActionTag, CandidateKind, FavoriteSite, Project};
use quicklaunch_core::search::filter;

fn projects() -> Vec<Project> {
    vec![
        Project::new("billing-api", "/code/billing-api"),
        Project::new("web-shop", "/code/web-shop"),
    ]
}

fn favorites() -> Vec<FavoriteSite> {
    vec![
        FavoriteSite::new("1", "Rust Docs", "https://docs.rs", Some("rust crates")),
        FavoriteSite::new("2", "Broken", "", None),
    ]
}

#[test]
fn blank_query_returns_no_candidates() {
    assert!(filter("", &projects(), &favorites()).is_empty());
    assert!(filter(" \t ", &projects(), &favorites()).is_empty());
}

#[test]
fn web_search_entry_is_always_last_and_keeps_raw_query() {
    for query in ["billing", "zzz nothing", "  Mixed Case  "] {
        let results = filter(query, &projects(), &favorites());
        let last = results.last().unwrap();
        assert_eq!(last.kind, CandidateKind::WebSearch);
        assert_eq!(last.action, ActionTag::Google);
        assert_eq!(last.query_text.as_deref(), Some(query));
    }
}

#[test]
fn every_token_must_match() {
    let results = filter("billing API", &projects(), &favorites());
    let titles: Vec<&str> = results.iter().map(|c| c.title.as_str()).collect();
    assert!(titles.contains(&"billing-api"));
    assert!(!titles.contains(&"web-shop"));

    let narrowed = filter("billing shop", &projects(), &favorites());
    assert_eq!(narrowed.len(), 1);
}

#[test]
fn projects_carry_their_path() {
    let results = filter("shop", &projects(), &favorites());
    let project = results
        .iter()
        .find(|c| c.kind == CandidateKind::Project)
        .unwrap();
    assert_eq!(project.project_path.as_deref(), Some("/code/web-shop"));
    assert_eq!(project.action, ActionTag::OpenProject);
}

#[test]
fn favorites_match_on_keywords_and_skip_malformed_entries() {
    let results = filter("crates", &projects(), &favorites());
    let favorite = results
        .iter()
        .find(|c| c.kind == CandidateKind::Favorite)
        .unwrap();
    assert_eq!(favorite.url.as_deref(), Some("https://docs.rs"));
    assert_eq!(favorite.favorite_id.as_deref(), Some("1"));

    let broken = filter("broken", &projects(), &favorites());
    assert!(broken.iter().all(|c| c.kind != CandidateKind::Favorite));
}

#[test]
fn settings_keyword_appends_navigation_entry_before_web_search() {
    let results = filter("config", &projects(), &favorites());
    let n = results.len();
    assert!(n >= 2);
    assert_eq!(results[n - 2].action, ActionTag::Settings);
    assert_eq!(results[n - 1].action, ActionTag::Google);
}

#[test]
fn favorites_keyword_replaces_site_entries_with_navigation() {
    let docs = vec![FavoriteSite::new(
        "1",
        "Bookmark Manager",
        "https://bm.example",
        Some("bookmark"),
    )];
    let results = filter("bookmark", &[], &docs);
    assert!(results.iter().all(|c| c.kind != CandidateKind::Favorite));
    assert!(results.iter().any(|c| c.action == ActionTag::Favorites));
}

#[test]
fn synthetic_entries_follow_fixed_order() {
    let results = filter("setting favorite json", &[], &[]);
    let tags: Vec<&ActionTag> = results.iter().map(|c| &c.action).collect();
    assert_eq!(
        tags,
        vec![
            &ActionTag::Settings,
            &ActionTag::Favorites,
            &ActionTag::JsonEditor,
            &ActionTag::Google,
        ]
    );
}
