use crate::{
    api::Confirmation,
    data::{Entity, form_input::FormInput, payload::parse_id},
    error::{RegistrarResult, ValidationSnafu},
    maud_conveniences::{Notice, danger_submit_button, simple_form_element, title},
    routes::failure_notice,
    state::RegistrarState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use snafu::ResultExt;

pub fn delete_panel<E: Entity>(notice: Option<Notice>, id: Option<&str>) -> Markup {
    html! {
        div id="panel" {
            (title(format!("Delete {}", E::SINGULAR)))
            @if let Some(notice) = notice {
                (notice)
            }
            form hx-post={"/" (E::SLUG) "/delete"} hx-target="#panel" hx-swap="outerHTML" hx-disabled-elt="find button" class="max-w-lg" {
                (simple_form_element("id", &format!("{} ID", E::SINGULAR), false, Some("number"), id))
                (danger_submit_button(&format!("Delete {}", E::singular_lower())))
            }
        }
    }
}

async fn delete<E: Entity>(
    state: &RegistrarState,
    input: &FormInput,
) -> RegistrarResult<Confirmation> {
    let id = parse_id(input.get("id")).context(ValidationSnafu)?;
    state.api().delete(E::DELETE_ENDPOINT, id).await
}

pub async fn post_delete<E: Entity>(
    State(state): State<RegistrarState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Markup {
    let input = FormInput::from(pairs);

    match delete::<E>(&state, &input).await {
        Ok(Confirmation { message }) => {
            let message =
                message.unwrap_or_else(|| format!("{} deleted successfully.", E::SINGULAR));
            delete_panel::<E>(Some(Notice::Success(message)), None)
        }
        Err(e) => {
            let notice = failure_notice(&e, &format!("Error deleting {}.", E::singular_lower()));
            delete_panel::<E>(Some(notice), input.non_blank("id"))
        }
    }
}
