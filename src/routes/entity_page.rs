use crate::{
    data::Entity,
    error::{RegistrarResult, UnknownTabSnafu},
    maud_conveniences::supertitle,
    routes::{create::create_panel, delete::delete_panel, search::search_panel, update::update_panel},
    state::RegistrarState,
};
use axum::extract::{Path, State};
use maud::{Markup, html};
use snafu::OptionExt;

/// Which panel of an entity page is showing. Switching always starts the
/// chosen panel from scratch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Create,
    Update,
    Delete,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Search, Self::Create, Self::Update, Self::Delete];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }

    pub fn blank_panel<E: Entity>(self) -> Markup {
        match self {
            Self::Search => search_panel::<E>(),
            Self::Create => create_panel::<E>(None, None),
            Self::Update => update_panel::<E>(None, None),
            Self::Delete => delete_panel::<E>(None, None),
        }
    }
}

pub fn tab_bar<E: Entity>(active: Tab, out_of_band: bool) -> Markup {
    html! {
        div id="tab-bar" hx-swap-oob=[out_of_band.then_some("true")] class="flex flex-row space-x-2 mb-6 border-b border-gray-600" {
            @for tab in Tab::ALL {
                @let (selected, class) = if tab == active {
                    ("true", "px-4 py-2 font-semibold border-b-2 border-blue-400 text-blue-300")
                } else {
                    ("false", "px-4 py-2 text-gray-300 hover:text-white")
                };
                button type="button" hx-get={"/" (E::SLUG) "/panel/" (tab.slug())} hx-target="#panel" hx-swap="outerHTML" aria-selected=(selected) class=(class) {
                    (tab.label())
                }
            }
        }
    }
}

pub async fn get_entity_page<E: Entity>(State(state): State<RegistrarState>) -> Markup {
    let tab = Tab::default();

    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full" {
            (supertitle(E::PLURAL))
            (tab_bar::<E>(tab, false))
            (tab.blank_panel::<E>())
        }
    })
}

pub async fn get_panel<E: Entity>(Path(tab): Path<String>) -> RegistrarResult<Markup> {
    let tab = Tab::from_slug(&tab).context(UnknownTabSnafu { tab })?;

    Ok(html! {
        (tab.blank_panel::<E>())
        (tab_bar::<E>(tab, true))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        routes::router,
        test_support::{StubApi, send_form},
    };
    use axum::http::{Method, StatusCode};

    #[test]
    fn tabs_default_to_search() {
        assert_eq!(Tab::default(), Tab::Search);
        assert_eq!(Tab::from_slug("delete"), Some(Tab::Delete));
        assert_eq!(Tab::from_slug("Delete"), None);
    }

    #[tokio::test]
    async fn page_opens_on_the_search_panel() {
        let app = router(StubApi::default().state().await);
        let (status, body) = send_form(&app, Method::GET, "/courses", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Search Courses"));
        assert!(!body.contains("New Course"));
        assert!(body.contains(
            r##"hx-get="/courses/panel/search" hx-target="#panel" hx-swap="outerHTML" aria-selected="true""##
        ));
    }

    #[tokio::test]
    async fn switching_tabs_sends_fresh_panel_and_out_of_band_bar() {
        let app = router(StubApi::default().state().await);
        let (status, body) = send_form(&app, Method::GET, "/courses/panel/create", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("New Course"));
        assert!(body.contains(r#"id="tab-bar" hx-swap-oob="true""#));
        assert!(body.contains(
            r##"hx-get="/courses/panel/create" hx-target="#panel" hx-swap="outerHTML" aria-selected="true""##
        ));
        assert!(body.contains(
            r##"hx-get="/courses/panel/search" hx-target="#panel" hx-swap="outerHTML" aria-selected="false""##
        ));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn unknown_tab_is_not_found() {
        let app = router(StubApi::default().state().await);
        let (status, _) = send_form(&app, Method::GET, "/addresses/panel/export", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
