use crate::{
    data::{Entity, SearchEndpoint, SearchMode},
    error::{RegistrarResult, UnsupportedSearchSnafu, ValidationSnafu},
    maud_conveniences::{Notice, subtitle, table, title},
    routes::failure_notice,
    state::RegistrarState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub mode: SearchMode,
    #[serde(default)]
    pub term: String,
}

fn search_form<E: Entity>(search: &SearchEndpoint) -> Markup {
    let (ty, maxlength, class) = search.input.attributes();
    let input_id = format!("search-{}", search.mode.form_value());

    html! {
        form hx-post={"/" (E::SLUG) "/search"} hx-target="#search-results" hx-sync="closest section:replace" hx-disabled-elt="find button" class="flex flex-row items-end space-x-2" {
            input type="hidden" name="mode" value=(search.mode.form_value());
            @if search.mode == SearchMode::All {
                button type="submit" class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 font-bold py-2 px-4 rounded" {
                    "List all " (E::plural_lower())
                }
            } @else {
                div class="flex-1" {
                    label for=(input_id) class="block text-sm font-bold mb-2 text-gray-300" {
                        "By " (search.mode.label())
                    }
                    input type=(ty) id=(input_id) name="term" maxlength=[maxlength] class=(class);
                }
                button type="submit" class="bg-blue-500 hover:bg-blue-700 disabled:opacity-50 font-bold py-2 px-4 rounded" {
                    "Search"
                }
            }
            span class="htmx-indicator italic text-gray-400" {"Loading..."}
        }
    }
}

/// Newer searches abort older in-flight ones through the shared `hx-sync`
/// scope, so only the latest response lands in `#search-results`.
pub fn search_panel<E: Entity>() -> Markup {
    html! {
        div id="panel" {
            section class="flex flex-col space-y-4" {
                (title(format!("Search {}", E::PLURAL)))
                @for search in E::SEARCHES {
                    (search_form::<E>(search))
                }
                div id="search-results" class="mt-4" {}
            }
        }
    }
}

pub fn empty_message<E: Entity>(mode: SearchMode, term: Option<&str>) -> String {
    match (mode, term) {
        (SearchMode::All, _) | (_, None) => format!("No {} found.", E::plural_lower()),
        (SearchMode::ById, Some(id)) => format!("{} with ID {id} not found.", E::SINGULAR),
        (mode, Some(term)) => format!(
            "No {} found for {} \"{term}\".",
            E::plural_lower(),
            mode.label()
        ),
    }
}

fn results<E: Entity>(mode: SearchMode, term: Option<&str>, found: &[E]) -> Markup {
    if found.is_empty() {
        return html! { (Notice::Info(empty_message::<E>(mode, term))) };
    }

    let heading = if found.len() == 1 {
        format!("1 {}", E::singular_lower())
    } else {
        format!("{} {}", found.len(), E::plural_lower())
    };
    table(
        subtitle(heading),
        E::COLUMNS,
        found.iter().map(E::row).collect(),
    )
}

async fn search<E: Entity>(
    state: &RegistrarState,
    search: &SearchEndpoint,
    raw_term: &str,
) -> RegistrarResult<(Option<String>, Vec<E>)> {
    let term = search.mode.prepare_term(raw_term).context(ValidationSnafu)?;
    let found = state
        .api()
        .list::<E>(search.endpoint, term.as_deref())
        .await?;
    Ok((term, found))
}

pub async fn post_search<E: Entity>(
    State(state): State<RegistrarState>,
    Form(SearchForm { mode, term }): Form<SearchForm>,
) -> RegistrarResult<Markup> {
    let endpoint = E::search_endpoint(mode).context(UnsupportedSearchSnafu {
        entity: E::PLURAL,
        mode,
    })?;

    Ok(match search::<E>(&state, endpoint, &term).await {
        Ok((term, found)) => results::<E>(mode, term.as_deref(), &found),
        Err(e) => html! {
            (failure_notice(&e, &format!("Error searching {}.", E::plural_lower())))
        },
    })
}
