use crate::{
    api::Created,
    data::{Entity, FieldFlags, form_input::FormInput, payload::create_payload},
    error::{RegistrarResult, ValidationSnafu},
    maud_conveniences::{Notice, form_submit_button, title},
    routes::failure_notice,
    state::RegistrarState,
};
use axum::{Form, extract::State};
use maud::{Markup, html};
use serde_json::Value;
use snafu::ResultExt;

/// `input` refills the form after a failure; `None` gives a blank form.
pub fn create_panel<E: Entity>(notice: Option<Notice>, input: Option<&FormInput>) -> Markup {
    html! {
        div id="panel" {
            (title(format!("New {}", E::SINGULAR)))
            @if let Some(notice) = notice {
                (notice)
            }
            form hx-post={"/" (E::SLUG) "/create"} hx-target="#panel" hx-swap="outerHTML" hx-disabled-elt="find button" class="max-w-lg" {
                @for field in E::FIELDS.iter().filter(|field| field.flags.contains(FieldFlags::ON_CREATE)) {
                    @let label = if field.is_required() {
                        field.label.to_string()
                    } else {
                        format!("{} (optional)", field.label)
                    };
                    (field.render_input("", &label, field.is_required(), input.and_then(|input| input.non_blank(field.name))))
                }
                (form_submit_button(Some(&format!("Create {}", E::singular_lower()))))
            }
        }
    }
}

async fn create<E: Entity>(state: &RegistrarState, input: &FormInput) -> RegistrarResult<Created> {
    let payload = create_payload(E::FIELDS, input).context(ValidationSnafu)?;
    state
        .api()
        .create(E::CREATE_ENDPOINT, &Value::Object(payload))
        .await
}

pub async fn post_create<E: Entity>(
    State(state): State<RegistrarState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Markup {
    let input = FormInput::from(pairs);

    match create::<E>(&state, &input).await {
        Ok(Created { id, .. }) => {
            info!(entity = E::SINGULAR, id, "Created record");
            create_panel::<E>(
                Some(Notice::Success(format!(
                    "{} created successfully! (ID: {id})",
                    E::SINGULAR
                ))),
                None,
            )
        }
        Err(e) => {
            let notice = failure_notice(&e, &format!("Error creating {}.", E::singular_lower()));
            create_panel::<E>(Some(notice), Some(&input))
        }
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

    #[tokio::test]
    async fn course_is_created_with_numbers_and_form_is_cleared() {
        let stub = StubApi::default().respond(
            Method::POST,
            "inserir-disciplina/",
            StatusCode::CREATED,
            json!({"id_criado": 12, "mensagem": "Disciplina cadastrada"}),
        );
        let app = router(stub.state().await);

        let (status, body) = send_form(
            &app,
            Method::POST,
            "/courses/create",
            Some("disciplina=Algoritmos&carga=60&semestre=3"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Course created successfully! (ID: 12)"));
        assert!(!body.contains(r#"value="Algoritmos""#));

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "inserir-disciplina/");
        assert_eq!(
            calls[0].body,
            Some(json!({"disciplina": "Algoritmos", "carga": 60, "semestre": 3}))
        );
    }

    #[tokio::test]
    async fn missing_fields_are_listed_without_calling_the_api() {
        let stub = StubApi::default();
        let app = router(stub.state().await);

        let (status, body) = send_form(
            &app,
            Method::POST,
            "/addresses/create",
            Some("cep=&endereco=Rua+Nova&bairro=&cidade=&estado=sp"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Please fill in the required fields: Postal Code, City."));
        assert!(body.contains(r#"value="Rua Nova""#));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_number_is_caught_locally() {
        let stub = StubApi::default();
        let app = router(stub.state().await);

        let (_, body) = send_form(
            &app,
            Method::POST,
            "/courses/create",
            Some("disciplina=Redes&carga=lots&semestre=2"),
        )
        .await;

        assert!(body.contains("Credit Hours must be a whole number"));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn server_refusal_keeps_the_typed_values() {
        let stub = StubApi::default().respond(
            Method::POST,
            "inserir-aluno/",
            StatusCode::BAD_REQUEST,
            json!({"mensagem": "Matrícula já cadastrada"}),
        );
        let app = router(stub.state().await);

        let (status, body) = send_form(
            &app,
            Method::POST,
            "/students/create",
            Some("matricula=2024001&nome=Ana&email=&nome_mae=&endereco_id="),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Matrícula já cadastrada"));
        assert!(body.contains(r#"value="2024001""#));
        assert_eq!(
            stub.calls()[0].body,
            Some(json!({
                "matricula": "2024001",
                "nome": "Ana",
                "email": null,
                "nome_mae": null,
                "endereco_id": null,
            }))
        );
    }

    #[tokio::test]
    async fn server_error_without_message_uses_the_fallback() {
        let stub = StubApi::default().respond(
            Method::POST,
            "inserir-endereco/",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({}),
        );
        let app = router(stub.state().await);

        let (_, body) = send_form(
            &app,
            Method::POST,
            "/addresses/create",
            Some("cep=01000-000&endereco=Av.+Paulista&cidade=S%C3%A3o+Paulo&estado=SP"),
        )
        .await;

        assert!(body.contains("Error creating address."));
    }
}
