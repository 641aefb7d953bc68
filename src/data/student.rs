use crate::{
    data::{Entity, FieldSpec, InputKind, SearchEndpoint, SearchMode},
    maud_conveniences::dash_if_none,
};
use maud::{Markup, html};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(rename = "matricula", default)]
    pub registration: Option<String>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "nome_mae", default)]
    pub mother_name: Option<String>,
    #[serde(rename = "endereco_id", default)]
    pub address_id: Option<i64>,
}

/// The plain student fields the enrolment form shares with the create panel.
pub const STUDENT_FIELDS: [FieldSpec; 4] = [
    FieldSpec::text("matricula", "Registration").required(),
    FieldSpec::text("nome", "Name").required(),
    FieldSpec::email("email", "E-mail"),
    FieldSpec::text("nome_mae", "Mother's Name"),
];

impl Entity for Student {
    const SLUG: &'static str = "students";
    const SINGULAR: &'static str = "Student";
    const PLURAL: &'static str = "Students";

    const FIELDS: &'static [FieldSpec] = &[
        STUDENT_FIELDS[0],
        STUDENT_FIELDS[1],
        STUDENT_FIELDS[2],
        STUDENT_FIELDS[3],
        FieldSpec::number("endereco_id", "Address ID"),
    ];
    const SEARCHES: &'static [SearchEndpoint] = &[
        SearchEndpoint {
            mode: SearchMode::All,
            endpoint: "consultar-alunos",
            input: InputKind::Text,
        },
        SearchEndpoint {
            mode: SearchMode::ById,
            endpoint: "aluno-por-id",
            input: InputKind::Number,
        },
        SearchEndpoint {
            mode: SearchMode::ByName,
            endpoint: "alunos-por-nome",
            input: InputKind::Text,
        },
    ];
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Registration",
        "Name",
        "E-mail",
        "Mother's Name",
        "Address ID",
    ];

    const CREATE_ENDPOINT: &'static str = "inserir-aluno/";
    const UPDATE_ENDPOINT: &'static str = "atualizar-aluno";
    const DELETE_ENDPOINT: &'static str = "deletar-alunos";

    fn row(&self) -> Vec<Markup> {
        vec![
            html! {(self.id)},
            dash_if_none(self.registration.as_deref()),
            dash_if_none(self.name.as_deref()),
            dash_if_none(self.email.as_deref()),
            dash_if_none(self.mother_name.as_deref()),
            dash_if_none(self.address_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_sparse_records() {
        let student: Student = serde_json::from_value(json!({
            "id": 4,
            "matricula": "2024004",
            "nome": "Davi",
        }))
        .unwrap();
        assert_eq!(student.id, 4);
        assert_eq!(student.email, None);
        assert_eq!(student.address_id, None);

        let row = student.row();
        assert_eq!(row.len(), Student::COLUMNS.len());
        assert_eq!(row[2].0, "Davi");
        assert!(row[3].0.contains('-'));
    }
}
