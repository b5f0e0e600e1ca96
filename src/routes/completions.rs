use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::constants::{LIMIT_ACTIONS, LIMIT_AMOUNT_SUGGESTIONS, SUBCOMMANDS};
use crate::error::Result;
use crate::routes::validate_user_id;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CompletionParams {
    /// Comma-separated arguments typed so far; the last one is being completed
    #[serde(default)]
    pub args: String,
}

fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}

fn filter_prefix<'a>(candidates: impl IntoIterator<Item = &'a str>, prefix: &str) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|c| starts_with_ignore_case(c, prefix))
        .map(str::to_string)
        .collect()
}

/// Suggestions for the last element of `args` given the user's home names
pub fn complete(args: &[&str], names: &[String]) -> Vec<String> {
    match args {
        [prefix] => filter_prefix(
            SUBCOMMANDS
                .iter()
                .copied()
                .chain(names.iter().map(String::as_str)),
            prefix,
        ),
        [sub, prefix] if sub.eq_ignore_ascii_case("tp") || sub.eq_ignore_ascii_case("delete") => {
            filter_prefix(names.iter().map(String::as_str), prefix)
        }
        [sub, prefix] if sub.eq_ignore_ascii_case("limit") => {
            filter_prefix(LIMIT_ACTIONS.iter().copied(), prefix)
        }
        [sub, action, _, prefix]
            if sub.eq_ignore_ascii_case("limit")
                && LIMIT_ACTIONS.iter().any(|a| action.eq_ignore_ascii_case(a)) =>
        {
            filter_prefix(LIMIT_AMOUNT_SUGGESTIONS.iter().copied(), prefix)
        }
        _ => Vec::new(),
    }
}

/// Tab completion for the home commands
pub async fn completions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<CompletionParams>,
) -> Result<Json<Vec<String>>> {
    validate_user_id(&user_id)?;

    let args: Vec<&str> = params.args.split(',').collect();
    let names = state.store.list_names(&user_id).await;

    Ok(Json(complete(&args, &names)))
}
