use crate::{
    data::student_detail::StudentDetail,
    error::{BlankNameSnafu, RegistrarResult, ValidationError, ValidationSnafu},
    maud_conveniences::{Notice, form_submit_button, simple_form_element, supertitle},
    routes::failure_notice,
    state::RegistrarState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::{ResultExt, ensure};

const DETAIL_ENDPOINT: &str = "aluno-detalhe-por-nome";

#[derive(Debug, Deserialize)]
pub struct DetailSearch {
    #[serde(default)]
    name: String,
}

pub async fn get_student_details(State(state): State<RegistrarState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full" {
            (supertitle("Student Details"))
            section {
                form hx-post="/students/details" hx-target="#detail-results" hx-sync="closest section:replace" hx-disabled-elt="find button" class="max-w-lg" {
                    (simple_form_element("name", "Student name", false, None, None))
                    (form_submit_button(Some("Look up")))
                }
                div id="detail-results" class="mt-6" {}
            }
        }
    })
}

fn name_term(raw: &str) -> Result<&str, ValidationError> {
    let name = raw.trim();
    ensure!(!name.is_empty(), BlankNameSnafu);
    Ok(name)
}

async fn find_details(state: &RegistrarState, raw: &str) -> RegistrarResult<Vec<StudentDetail>> {
    let name = name_term(raw).context(ValidationSnafu)?;
    state.api().list(DETAIL_ENDPOINT, Some(name)).await
}

pub async fn post_student_details(
    State(state): State<RegistrarState>,
    Form(DetailSearch { name }): Form<DetailSearch>,
) -> Markup {
    match find_details(&state, &name).await {
        Ok(found) if found.is_empty() => html! {
            (Notice::Info("No students found with that name.".to_string()))
        },
        Ok(found) => html! {
            @for detail in &found {
                (detail)
            }
        },
        Err(e) => html! {
            (failure_notice(&e, "Error contacting the API."))
        },
    }
}
