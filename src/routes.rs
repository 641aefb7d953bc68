use crate::{
    data::{Entity, address::Address, course::Course, student::Student},
    error::RegistrarError,
    maud_conveniences::Notice,
    routes::{
        create::post_create,
        delete::post_delete,
        enrol::{get_enrol, post_enrol},
        entity_page::{get_entity_page, get_panel},
        index::get_index_route,
        search::post_search,
        student_details::{get_student_details, post_student_details},
        update::post_update,
    },
    state::RegistrarState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod create;
pub mod delete;
pub mod enrol;
pub mod entity_page;
pub mod index;
pub mod search;
pub mod student_details;
pub mod update;

pub fn router(state: RegistrarState) -> Router {
    let app = Router::new()
        .route("/", get(get_index_route))
        .route("/students/enrol", get(get_enrol).post(post_enrol))
        .route(
            "/students/details",
            get(get_student_details).post(post_student_details),
        );

    let app = with_entity::<Student>(app);
    let app = with_entity::<Course>(app);
    let app = with_entity::<Address>(app);

    app.layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Mounts the tab page and the four panel endpoints under `/{E::SLUG}`.
fn with_entity<E: Entity>(router: Router<RegistrarState>) -> Router<RegistrarState> {
    let slug = E::SLUG;
    router
        .route(&format!("/{slug}"), get(get_entity_page::<E>))
        .route(&format!("/{slug}/panel/{{tab}}"), get(get_panel::<E>))
        .route(&format!("/{slug}/search"), post(post_search::<E>))
        .route(&format!("/{slug}/create"), post(post_create::<E>))
        .route(&format!("/{slug}/update"), post(post_update::<E>))
        .route(&format!("/{slug}/delete"), post(post_delete::<E>))
}

/// Inline notice for a failed panel submission.
pub fn failure_notice(e: &RegistrarError, fallback: &str) -> Notice {
    if e.is_local() {
        debug!(%e, "Rejected before contacting the records API");
    } else {
        warn!(?e, "Records API call failed");
    }
    Notice::Error(e.user_message(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubApi, send_form};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn every_page_renders_inside_the_shell() {
        let stub = StubApi::default();
        let app = router(stub.state().await);

        for uri in ["/", "/students", "/courses", "/addresses", "/students/details"] {
            let (status, body) = send_form(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.contains("<nav"), "{uri}");
            assert!(body.contains(r#"href="/students/enrol""#), "{uri}");
        }
        assert!(stub.calls().is_empty());
    }
}
