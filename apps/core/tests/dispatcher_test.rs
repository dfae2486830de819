use quicklaunch_core::catalog::{built_in_candidates, project_candidate, settings_candidate};
use quicklaunch_core::config::{Config, WebSearchProvider};
use quicklaunch_core::dispatcher::{dispatch, DispatchContext, Transition};
use quicklaunch_core::host::Effect;
use quicklaunch_core::layout::SETTINGS_HEIGHT;
use quicklaunch_core::model::{ActionTag, Candidate, CandidateKind, Project, ViewState};

fn calc() -> Candidate {
    built_in_candidates()
        .into_iter()
        .find(|c| c.action == ActionTag::Calc)
        .unwrap()
}

fn run(candidate: &Candidate, query: &str) -> (Vec<Effect>, Transition) {
    let cfg = Config::default();
    let outcome = dispatch(candidate, &DispatchContext { query, config: &cfg });
    (outcome.effects, outcome.transition)
}

#[test]
fn invalid_expression_still_completes_without_clipboard() {
    let (effects, transition) = run(&calc(), "2+");
    assert_eq!(effects, vec![Effect::Hide]);
    assert_eq!(transition, Transition::Complete);
}

#[test]
fn division_by_zero_is_discarded() {
    let (effects, _) = run(&calc(), "1/0");
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::WriteClipboard(_))));
}

#[test]
fn expression_is_taken_from_noisy_query() {
    let (effects, _) = run(&calc(), "calc (1+2)*3 please");
    assert_eq!(effects[0], Effect::WriteClipboard("9".to_string()));
}

#[test]
fn favorite_without_url_only_hides() {
    let candidate = Candidate::new(
        CandidateKind::Favorite,
        "🔖",
        "Orphan",
        "favorite",
        "",
        ActionTag::OpenFavorite,
    );
    let (effects, transition) = run(&candidate, "orphan");
    assert_eq!(effects, vec![Effect::Hide]);
    assert_eq!(transition, Transition::Complete);
}

#[test]
fn project_opens_in_editor() {
    let candidate = project_candidate(&Project::new("shop", "/code/shop"));
    let (effects, _) = run(&candidate, "shop");
    assert_eq!(
        effects,
        vec![Effect::OpenInEditor("/code/shop".to_string()), Effect::Hide]
    );
}

#[test]
fn settings_navigates_without_hiding() {
    let (effects, transition) = run(&settings_candidate(), "settings");
    assert_eq!(transition, Transition::Navigate(ViewState::Settings));
    assert_eq!(effects, vec![Effect::Resize(SETTINGS_HEIGHT)]);
}

#[test]
fn web_search_uses_configured_provider() {
    let cfg = Config {
        web_search_provider: WebSearchProvider::Duckduckgo,
        ..Default::default()
    };
    let candidate = quicklaunch_core::catalog::web_search_candidate("a&b");
    let outcome = dispatch(
        &candidate,
        &DispatchContext {
            query: "a&b",
            config: &cfg,
        },
    );
    match &outcome.effects[0] {
        Effect::OpenExternal(url) => {
            assert!(url.starts_with("https://duckduckgo.com/"));
            assert!(url.ends_with("a%26b"));
        }
        other => panic!("expected browser open, got {other:?}"),
    }
}
