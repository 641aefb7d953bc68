use crate::{
    data::{Entity, FieldSpec, InputKind, SearchEndpoint, SearchMode},
    maud_conveniences::dash_if_none,
};
use maud::{Markup, html};
use serde::Deserialize;

/// The listing of every course only carries id and name, so hours and
/// semester can be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: i64,
    #[serde(rename = "disciplina")]
    pub name: String,
    #[serde(rename = "carga", default)]
    pub credit_hours: Option<i64>,
    #[serde(rename = "semestre", default)]
    pub semester: Option<i64>,
}

pub const ALL_COURSES_ENDPOINT: &str = "disciplinas";

pub fn ordinal(semester: i64) -> String {
    format!("{semester}º")
}

impl Entity for Course {
    const SLUG: &'static str = "courses";
    const SINGULAR: &'static str = "Course";
    const PLURAL: &'static str = "Courses";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("disciplina", "Course Name").required(),
        FieldSpec::number("carga", "Credit Hours").required(),
        FieldSpec::number("semestre", "Semester").required(),
    ];
    const SEARCHES: &'static [SearchEndpoint] = &[
        SearchEndpoint {
            mode: SearchMode::All,
            endpoint: ALL_COURSES_ENDPOINT,
            input: InputKind::Text,
        },
        SearchEndpoint {
            mode: SearchMode::ById,
            endpoint: "disciplina-por-id",
            input: InputKind::Number,
        },
        SearchEndpoint {
            mode: SearchMode::BySemester,
            endpoint: "disciplina-por-semestre",
            input: InputKind::Number,
        },
    ];
    const COLUMNS: &'static [&'static str] = &["ID", "Course", "Credit Hours", "Semester"];

    const CREATE_ENDPOINT: &'static str = "inserir-disciplina/";
    const UPDATE_ENDPOINT: &'static str = "atualizar-disciplina";
    const DELETE_ENDPOINT: &'static str = "deletar-disciplina";

    fn row(&self) -> Vec<Markup> {
        vec![
            html! {(self.id)},
            html! {(self.name)},
            dash_if_none(self.credit_hours.map(|hours| format!("{hours}h"))),
            dash_if_none(self.semester.map(ordinal)),
        ]
    }
}
