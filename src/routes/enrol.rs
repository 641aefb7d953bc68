use crate::{
    api::Created,
    data::{
        Entity,
        address::ADDRESS_FIELDS,
        course::ALL_COURSES_ENDPOINT,
        enrolment::{
            ADDRESS_PREFIX, COURSE_FIELD, COURSE_OPTION_FIELD, CourseOption, CourseSelection,
            enrolment_payload,
        },
        form_input::FormInput,
        student::{STUDENT_FIELDS, Student},
    },
    error::{RegistrarResult, ValidationSnafu},
    maud_conveniences::{Notice, form_submit_button, subtitle, supertitle},
    routes::failure_notice,
    state::RegistrarState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde_json::Value;
use snafu::ResultExt;

/// Form field naming the course whose chip was clicked.
const TOGGLE_FIELD: &str = "toggle";
const CHIP: &str = "rounded px-3 py-2 text-left bg-gray-700 hover:bg-gray-600";
const SELECTED_CHIP: &str = "rounded px-3 py-2 text-left bg-blue-600 hover:bg-blue-700 font-semibold";

fn enrol_panel(
    notice: Option<Notice>,
    options: &[CourseOption],
    input: Option<&FormInput>,
    selection: &CourseSelection,
) -> Markup {
    let address_input = input.map(|input| input.scoped(ADDRESS_PREFIX));

    html! {
        div id="enrol-panel" {
            @if let Some(notice) = notice {
                (notice)
            }
            form hx-post="/students/enrol" hx-target="#enrol-panel" hx-swap="outerHTML" hx-disabled-elt="find button" {
                div class="grid grid-cols-1 md:grid-cols-2 gap-8" {
                    fieldset {
                        (subtitle("Student"))
                        @for field in &STUDENT_FIELDS {
                            (field.render_input("", field.label, field.is_required(), input.and_then(|input| input.non_blank(field.name))))
                        }
                    }
                    fieldset {
                        (subtitle("Address"))
                        @for field in &ADDRESS_FIELDS {
                            (field.render_input(ADDRESS_PREFIX, field.label, field.is_required(), address_input.as_ref().and_then(|input| input.non_blank(field.name))))
                        }
                    }
                }
                fieldset class="mb-6" {
                    (subtitle("Courses"))
                    @if options.is_empty() {
                        p class="italic text-gray-400" {"No courses to choose from."}
                    }
                    div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-2" {
                        @for option in options {
                            @let selected = selection.contains(option.id);
                            input type="hidden" name=(COURSE_OPTION_FIELD) value=(option.encode());
                            @if selected {
                                input type="hidden" name=(COURSE_FIELD) value=(option.id);
                            }
                            button type="button" hx-post="/students/enrol" hx-include="closest form" hx-vals={"{\"" (TOGGLE_FIELD) "\": \"" (option.id) "\"}"} hx-target="#enrol-panel" hx-swap="outerHTML" aria-pressed=(if selected {"true"} else {"false"}) class=(if selected {SELECTED_CHIP} else {CHIP}) {
                                (option.name)
                            }
                        }
                    }
                }
                (form_submit_button(Some("Enrol student")))
            }
        }
    }
}

pub async fn get_enrol(State(state): State<RegistrarState>) -> Markup {
    let (notice, options) = match state
        .api()
        .list::<CourseOption>(ALL_COURSES_ENDPOINT, None)
        .await
    {
        Ok(options) => (None, options),
        Err(e) => {
            warn!(?e, "Unable to load course list");
            (
                Some(Notice::Error("Error loading course list.".to_string())),
                vec![],
            )
        }
    };

    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full" {
            (supertitle("Enrol Student"))
            (enrol_panel(notice, &options, None, &CourseSelection::default()))
        }
    })
}

async fn enrol(
    state: &RegistrarState,
    input: &FormInput,
    selection: &CourseSelection,
) -> RegistrarResult<Created> {
    let payload = enrolment_payload(input, selection).context(ValidationSnafu)?;
    state
        .api()
        .create(Student::CREATE_ENDPOINT, &Value::Object(payload))
        .await
}

pub async fn post_enrol(
    State(state): State<RegistrarState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Markup {
    let input = FormInput::from(pairs);
    let options = CourseOption::from_form(&input);
    let mut selection = CourseSelection::from_form(&input, &options);

    //a chip click only flips that course, nothing is submitted
    if let Some(raw) = input.non_blank(TOGGLE_FIELD) {
        if let Some(option) = options.iter().find(|option| option.id.to_string() == raw) {
            selection.toggle(option.id);
        }
        return enrol_panel(None, &options, Some(&input), &selection);
    }

    match enrol(&state, &input, &selection).await {
        Ok(Created { id, message }) => {
            info!(id, courses = ?selection.ids(), "Enrolled student");
            let message =
                message.unwrap_or_else(|| format!("Student created successfully! (ID: {id})"));
            enrol_panel(
                Some(Notice::Success(message)),
                &options,
                None,
                &CourseSelection::default(),
            )
        }
        Err(e) => enrol_panel(
            Some(failure_notice(&e, "Unknown error while enrolling student.")),
            &options,
            Some(&input),
            &selection,
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        routes::router,
        test_support::{StubApi, send_form},
    };
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    const FILLED: &str = "matricula=2024001&nome=Ana+Souza&email=&nome_mae=\
        &endereco_info.cep=50000-000&endereco_info.endereco=Rua+da+Aurora&endereco_info.bairro=\
        &endereco_info.cidade=Recife&endereco_info.estado=pe\
        &course_option=1%3AAlgoritmos&course_option=4%3ARedes";

    #[tokio::test]
    async fn page_lists_courses_from_the_api() {
        let stub = StubApi::default().respond(
            Method::GET,
            "disciplinas",
            StatusCode::OK,
            json!([{"id": 1, "disciplina": "Algoritmos"}, {"id": 4, "disciplina": "Redes"}]),
        );
        let app = router(stub.state().await);

        let (status, body) = send_form(&app, Method::GET, "/students/enrol", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Algoritmos"));
        assert!(body.contains(r#"name="course_option" value="4:Redes""#));
        assert_eq!(stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_course_load_still_renders_the_form() {
        let stub = StubApi::default().respond(
            Method::GET,
            "disciplinas",
            StatusCode::SERVICE_UNAVAILABLE,
            json!({}),
        );
        let app = router(stub.state().await);

        let (status, body) = send_form(&app, Method::GET, "/students/enrol", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error loading course list."));
        assert!(body.contains("No courses to choose from."));
    }

    #[tokio::test]
    async fn no_course_selected_makes_no_call() {
        let stub = StubApi::default();
        let app = router(stub.state().await);

        let (status, body) = send_form(&app, Method::POST, "/students/enrol", Some(FILLED)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Select at least one course."));
        assert!(body.contains(r#"value="Ana Souza""#));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn one_combined_payload_is_posted() {
        let stub = StubApi::default().respond(
            Method::POST,
            "inserir-aluno/",
            StatusCode::CREATED,
            json!({"id_criado": 31, "mensagem": "Aluno cadastrado com sucesso"}),
        );
        let app = router(stub.state().await);

        let form = format!("{FILLED}&disciplinas_ids=4&disciplinas_ids=1");
        let (_, body) = send_form(&app, Method::POST, "/students/enrol", Some(&form)).await;

        assert!(body.contains("Aluno cadastrado com sucesso"));
        assert!(!body.contains(r#"value="Ana Souza""#));
        // the course list survives a successful submit
        assert!(body.contains("Redes"));

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body,
            Some(json!({
                "matricula": "2024001",
                "nome": "Ana Souza",
                "email": null,
                "nome_mae": null,
                "endereco_info": {
                    "cep": "50000-000",
                    "endereco": "Rua da Aurora",
                    "bairro": null,
                    "cidade": "Recife",
                    "estado": "PE",
                },
                "disciplinas_ids": [1, 4],
            }))
        );
    }

    #[tokio::test]
    async fn failure_keeps_values_and_ticks() {
        let stub = StubApi::default().respond(
            Method::POST,
            "inserir-aluno/",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"erro": "?"}),
        );
        let app = router(stub.state().await);

        let form = format!("{FILLED}&disciplinas_ids=4");
        let (_, body) = send_form(&app, Method::POST, "/students/enrol", Some(&form)).await;

        assert!(body.contains("Unknown error while enrolling student."));
        assert!(body.contains(r#"value="Recife""#));
        assert!(body.contains(r#"name="disciplinas_ids" value="4""#));
        assert!(!body.contains(r#"name="disciplinas_ids" value="1""#));
    }

    #[tokio::test]
    async fn clicking_a_course_flips_it_without_submitting() {
        let stub = StubApi::default();
        let app = router(stub.state().await);

        let form = format!("{FILLED}&disciplinas_ids=1&toggle=4");
        let (status, body) = send_form(&app, Method::POST, "/students/enrol", Some(&form)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"name="disciplinas_ids" value="1""#));
        assert!(body.contains(r#"name="disciplinas_ids" value="4""#));
        assert!(body.contains(r#"value="Ana Souza""#));

        let form = format!("{FILLED}&disciplinas_ids=1&disciplinas_ids=4&toggle=1");
        let (_, body) = send_form(&app, Method::POST, "/students/enrol", Some(&form)).await;
        assert!(!body.contains(r#"name="disciplinas_ids" value="1""#));
        assert!(body.contains(r#"name="disciplinas_ids" value="4""#));

        // unknown courses cannot be ticked
        let form = format!("{FILLED}&toggle=99");
        let (_, body) = send_form(&app, Method::POST, "/students/enrol", Some(&form)).await;
        assert!(!body.contains(r#"name="disciplinas_ids""#));

        assert!(stub.calls().is_empty());
    }
}
