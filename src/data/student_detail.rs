use crate::{
    data::course::ordinal,
    maud_conveniences::{dash_if_none, subtitle, table},
};
use maud::{Markup, Render, html};
use serde::Deserialize;

/// A student joined with its address and enrolments.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentDetail {
    pub id: i64,
    #[serde(rename = "matricula", default)]
    pub registration: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "nome_mae", default)]
    pub mother_name: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<EmbeddedAddress>,
    #[serde(rename = "matriculas", default)]
    pub enrolments: Vec<Enrolment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedAddress {
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "endereco")]
    pub street: String,
    #[serde(rename = "bairro", default)]
    pub neighbourhood: Option<String>,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Enrolment {
    #[serde(rename = "disciplina_nome")]
    pub course_name: String,
    #[serde(rename = "carga", default)]
    pub credit_hours: Option<i64>,
    #[serde(rename = "semestre", default)]
    pub semester: Option<i64>,
    #[serde(rename = "nota", default)]
    pub grade: Option<f64>,
}

impl Render for EmbeddedAddress {
    fn render(&self) -> Markup {
        html! {
            p class="text-gray-200" {
                (self.street)
                @if let Some(neighbourhood) = &self.neighbourhood {
                    ", " (neighbourhood)
                }
            }
            p class="text-gray-200" {
                (self.city) " - " (self.state) ", " (self.postal_code)
            }
        }
    }
}

impl Render for StudentDetail {
    fn render(&self) -> Markup {
        let rows = self
            .enrolments
            .iter()
            .map(|enrolment| {
                vec![
                    html! {(enrolment.course_name)},
                    dash_if_none(enrolment.credit_hours.map(|hours| format!("{hours}h"))),
                    dash_if_none(enrolment.grade.map(|grade| format!("{grade:.1}"))),
                    dash_if_none(enrolment.semester.map(ordinal)),
                ]
            })
            .collect();

        html! {
            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 p-4 mb-6 w-full" {
                h2 class="text-2xl font-semibold mb-2" {
                    (self.name)
                    span class="ml-2 text-sm text-gray-400" {"#" (self.id)}
                }
                p class="text-gray-200 font-semibold" {
                    "Registration: "
                    span class="font-medium" {(dash_if_none(self.registration.as_deref()))}
                }
                p class="text-gray-200 font-semibold" {
                    "E-mail: "
                    span class="font-medium" {(dash_if_none(self.email.as_deref()))}
                }
                p class="text-gray-200 font-semibold" {
                    "Mother's Name: "
                    span class="font-medium" {(dash_if_none(self.mother_name.as_deref()))}
                }
                div class="my-4" {
                    (subtitle("Address"))
                    @if let Some(address) = &self.address {
                        (address)
                    } @else {
                        p class="italic text-gray-400" {"No address on file."}
                    }
                }
                @if self.enrolments.is_empty() {
                    p class="italic text-gray-400" {"Not enrolled in any course."}
                } @else {
                    (table(subtitle("Enrolments"), &["Course", "Credit Hours", "Grade", "Semester"], rows))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_shows_address_and_enrolments() {
        let detail: StudentDetail = serde_json::from_value(json!({
            "id": 1,
            "matricula": "2024001",
            "nome": "Ana Souza",
            "email": "ana@school.example",
            "endereco": {
                "cep": "50000-000",
                "endereco": "Rua da Aurora, 10",
                "cidade": "Recife",
                "estado": "PE"
            },
            "matriculas": [
                {"disciplina_nome": "Algoritmos", "carga": 60, "semestre": 1, "nota": 8.5},
                {"disciplina_nome": "Redes", "carga": 40, "semestre": 2, "nota": null}
            ]
        }))
        .unwrap();

        let card = detail.render().into_string();
        assert!(card.contains("Ana Souza"));
        assert!(card.contains("Rua da Aurora, 10"));
        assert!(card.contains("8.5"));
        assert!(card.contains("60h"));
        assert!(card.contains("2º"));
        assert!(!card.contains("No address on file."));
    }

    #[test]
    fn missing_address_is_called_out() {
        let detail: StudentDetail = serde_json::from_value(json!({
            "id": 2,
            "nome": "Bruno",
        }))
        .unwrap();

        let card = detail.render().into_string();
        assert!(card.contains("No address on file."));
        assert!(card.contains("Not enrolled in any course."));
    }
}
