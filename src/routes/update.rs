use crate::{
    api::Confirmation,
    data::{
        Entity, FieldFlags,
        form_input::FormInput,
        payload::{parse_id, update_payload},
    },
    error::{RegistrarResult, ValidationSnafu},
    maud_conveniences::{Notice, form_submit_button, simple_form_element, title},
    routes::failure_notice,
    state::RegistrarState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde_json::Value;
use snafu::ResultExt;

pub fn update_panel<E: Entity>(notice: Option<Notice>, input: Option<&FormInput>) -> Markup {
    let value = |name| input.and_then(|input| input.non_blank(name));

    html! {
        div id="panel" {
            (title(format!("Update {}", E::SINGULAR)))
            @if let Some(notice) = notice {
                (notice)
            }
            p class="text-sm text-gray-400 mb-4" {"Only the fields you fill in are changed."}
            form hx-post={"/" (E::SLUG) "/update"} hx-target="#panel" hx-swap="outerHTML" hx-disabled-elt="find button" class="max-w-lg" {
                (simple_form_element("id", &format!("{} ID", E::SINGULAR), false, Some("number"), value("id")))
                @for field in E::FIELDS.iter().filter(|field| field.flags.contains(FieldFlags::ON_UPDATE)) {
                    (field.render_input("", field.label, false, value(field.name)))
                }
                (form_submit_button(Some(&format!("Update {}", E::singular_lower()))))
            }
        }
    }
}

async fn update<E: Entity>(
    state: &RegistrarState,
    input: &FormInput,
) -> RegistrarResult<Confirmation> {
    let id = parse_id(input.get("id")).context(ValidationSnafu)?;
    let payload = update_payload(E::FIELDS, input).context(ValidationSnafu)?;
    state
        .api()
        .update(E::UPDATE_ENDPOINT, id, &Value::Object(payload))
        .await
}

pub async fn post_update<E: Entity>(
    State(state): State<RegistrarState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Markup {
    let input = FormInput::from(pairs);

    match update::<E>(&state, &input).await {
        Ok(Confirmation { message }) => {
            let message =
                message.unwrap_or_else(|| format!("{} updated successfully.", E::SINGULAR));
            update_panel::<E>(Some(Notice::Success(message)), None)
        }
        Err(e) => {
            let notice = failure_notice(&e, &format!("Error updating {}.", E::singular_lower()));
            update_panel::<E>(Some(notice), Some(&input))
        }
    }
}
