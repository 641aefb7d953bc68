//! Creating a student together with their address and first courses in one go.

use crate::{
    data::{
        address::ADDRESS_FIELDS,
        form_input::FormInput,
        payload::{Payload, create_payload, missing_required},
        student::STUDENT_FIELDS,
    },
    error::{MissingFieldsSnafu, NoCoursesSelectedSnafu, ValidationError},
};
use serde::Deserialize;
use serde_json::Value;
use snafu::ensure;
use std::collections::BTreeSet;

/// Form-field prefix of the nested address inputs.
pub const ADDRESS_PREFIX: &str = "endereco_info.";
pub const COURSE_FIELD: &str = "disciplinas_ids";
/// Hidden field carrying the loaded course list between submissions.
pub const COURSE_OPTION_FIELD: &str = "course_option";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseOption {
    pub id: i64,
    #[serde(rename = "disciplina")]
    pub name: String,
}

impl CourseOption {
    pub fn encode(&self) -> String {
        format!("{}:{}", self.id, self.name)
    }

    pub fn decode(raw: &str) -> Option<Self> {
        let (id, name) = raw.split_once(':')?;
        Some(Self {
            id: id.trim().parse().ok()?,
            name: name.to_string(),
        })
    }

    /// The options echoed back by a previous render of the form.
    pub fn from_form(input: &FormInput) -> Vec<Self> {
        input
            .all(COURSE_OPTION_FIELD)
            .filter_map(Self::decode)
            .collect()
    }
}

/// Course ids picked on the enrolment form. A set, so an id is either in or
/// out and flipping it twice changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSelection(BTreeSet<i64>);

impl CourseSelection {
    pub fn select(&mut self, id: i64) {
        self.0.insert(id);
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    /// Ticked ids from the submitted form, ignoring any not among `options`.
    pub fn from_form(input: &FormInput, options: &[CourseOption]) -> Self {
        let mut selection = Self::default();
        for id in input.all(COURSE_FIELD).filter_map(|raw| raw.parse::<i64>().ok()) {
            if options.iter().any(|option| option.id == id) {
                selection.select(id);
            }
        }
        selection
    }
}

/// Builds `{student fields.., endereco_info: {..}, disciplinas_ids: [..]}`.
pub fn enrolment_payload(
    input: &FormInput,
    selection: &CourseSelection,
) -> Result<Payload, ValidationError> {
    let address_input = input.scoped(ADDRESS_PREFIX);

    let mut missing = missing_required(&STUDENT_FIELDS, input);
    missing.extend(missing_required(&ADDRESS_FIELDS, &address_input));
    ensure!(missing.is_empty(), MissingFieldsSnafu { fields: missing });
    ensure!(!selection.is_empty(), NoCoursesSelectedSnafu);

    let mut payload = create_payload(&STUDENT_FIELDS, input)?;
    payload.insert(
        "endereco_info".to_string(),
        Value::Object(create_payload(&ADDRESS_FIELDS, &address_input)?),
    );
    payload.insert(COURSE_FIELD.to_string(), Value::from(selection.ids()));

    Ok(payload)
}
