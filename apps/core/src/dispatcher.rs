use crate::calc::{evaluate, format_result, sanitize_expression};
use crate::catalog::web_search_url;
use crate::config::Config;
use crate::host::Effect;
use crate::layout::height_for;
use crate::model::{ActionTag, Candidate, ViewState};

pub struct DispatchContext<'a> {
    /// Raw query text as currently typed.
    pub query: &'a str,
    pub config: &'a Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Switch to a page; the window stays open and the query is kept.
    Navigate(ViewState),
    /// Interaction finished: clear query, reset selection, hide the window.
    Complete,
    /// Nothing to do; state is left exactly as it was.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub effects: Vec<Effect>,
    pub transition: Transition,
}

impl Dispatch {
    fn navigate(view: ViewState) -> Self {
        Self {
            effects: vec![Effect::Resize(height_for(view, 0))],
            transition: Transition::Navigate(view),
        }
    }

    fn complete(primary: Option<Effect>) -> Self {
        let mut effects: Vec<Effect> = primary.into_iter().collect();
        effects.push(Effect::Hide);
        Self {
            effects,
            transition: Transition::Complete,
        }
    }

    fn ignored() -> Self {
        Self {
            effects: Vec::new(),
            transition: Transition::Ignored,
        }
    }
}

/// Maps the selected candidate to the effects it should produce.
///
/// Missing payload fields never abort the interaction: the branch simply
/// skips its primary effect and still completes.
pub fn dispatch(candidate: &Candidate, ctx: &DispatchContext<'_>) -> Dispatch {
    tracing::debug!(action = candidate.action.as_str(), "dispatching candidate");
    match &candidate.action {
        ActionTag::Settings => Dispatch::navigate(ViewState::Settings),
        ActionTag::Favorites => Dispatch::navigate(ViewState::Favorites),
        ActionTag::JsonEditor => Dispatch::navigate(ViewState::JsonEditor),
        ActionTag::OpenFavorite => {
            let open = non_empty(candidate.url.as_deref())
                .map(|url| Effect::OpenExternal(url.to_string()));
            if open.is_none() {
                tracing::debug!("favorite candidate has no url");
            }
            Dispatch::complete(open)
        }
        ActionTag::OpenProject => {
            let open = non_empty(candidate.project_path.as_deref())
                .map(|path| Effect::OpenInEditor(path.to_string()));
            if open.is_none() {
                tracing::debug!("project candidate has no path");
            }
            Dispatch::complete(open)
        }
        ActionTag::Terminal => Dispatch::complete(Some(Effect::OpenTerminal)),
        ActionTag::Calc => dispatch_calc(ctx.query),
        ActionTag::Google => {
            let query = candidate.query_text.as_deref().unwrap_or(ctx.query);
            Dispatch::complete(web_search_url(ctx.config, query).map(Effect::OpenExternal))
        }
        ActionTag::OpenApp(_) => Dispatch::complete(
            web_search_url(ctx.config, &candidate.title).map(Effect::OpenExternal),
        ),
    }
}

fn dispatch_calc(query: &str) -> Dispatch {
    let expression = sanitize_expression(query.trim());
    if expression.is_empty() {
        return Dispatch::ignored();
    }

    match evaluate(&expression) {
        Ok(value) => Dispatch::complete(Some(Effect::WriteClipboard(format_result(value)))),
        Err(error) => {
            tracing::debug!(%expression, %error, "calculation discarded");
            Dispatch::complete(None)
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
