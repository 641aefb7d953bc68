use crate::{
    error::{BlankSearchTermSnafu, InvalidIdSnafu, InvalidNumberSnafu, ValidationError},
    maud_conveniences::INPUT_CLASSES,
};
use bitflags::bitflags;
use maud::{Markup, html};
use serde::{Deserialize, de::DeserializeOwned};
use snafu::{ResultExt, ensure};

pub mod address;
pub mod course;
pub mod enrolment;
pub mod form_input;
pub mod payload;
pub mod student;
pub mod student_detail;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct FieldFlags: u8 {
        const ON_CREATE = 0b0000_0001;
        const ON_UPDATE = 0b0000_0010;
        const REQUIRED =  0b0000_0100;
        const NUMERIC =   0b0000_1000;
        const UPPERCASE = 0b0001_0000;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Email,
    StateCode,
}

impl InputKind {
    /// `type`, `maxlength` and `class` of the matching `<input>`.
    pub fn attributes(self) -> (&'static str, Option<u8>, String) {
        match self {
            Self::Text => ("text", None, INPUT_CLASSES.to_string()),
            Self::Number => ("number", None, INPUT_CLASSES.to_string()),
            Self::Email => ("email", None, INPUT_CLASSES.to_string()),
            Self::StateCode => ("text", Some(2), format!("{INPUT_CLASSES} uppercase")),
        }
    }
}

/// One editable field of an entity, as the records API names it.
#[derive(Debug, Copy, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub flags: FieldFlags,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Text,
            flags: FieldFlags::ON_CREATE.union(FieldFlags::ON_UPDATE),
        }
    }

    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            input: InputKind::Number,
            flags: Self::text(name, label).flags.union(FieldFlags::NUMERIC),
            ..Self::text(name, label)
        }
    }

    pub const fn email(name: &'static str, label: &'static str) -> Self {
        Self {
            input: InputKind::Email,
            ..Self::text(name, label)
        }
    }

    pub const fn state_code(name: &'static str, label: &'static str) -> Self {
        Self {
            input: InputKind::StateCode,
            flags: Self::text(name, label).flags.union(FieldFlags::UPPERCASE),
            ..Self::text(name, label)
        }
    }

    pub const fn required(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::REQUIRED);
        self
    }

    pub const fn update_only(mut self) -> Self {
        self.flags = self.flags.difference(FieldFlags::ON_CREATE);
        self
    }

    pub const fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    /// Renders the input for this field, prefixed (eg. `endereco_info.`) when it
    /// lives in a nested sub-record.
    pub fn render_input(
        &self,
        prefix: &str,
        label: &str,
        required: bool,
        value: Option<&str>,
    ) -> Markup {
        let id = format!("{prefix}{}", self.name);
        let (ty, maxlength, class) = self.input.attributes();

        html! {
            div class="mb-4" {
                label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
                input required[required] type=(ty) id=(id) name=(id) value=[value] maxlength=[maxlength] class=(class);
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    All,
    ById,
    ByName,
    BySemester,
    ByState,
}

impl SearchMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ById => "ID",
            Self::ByName => "name",
            Self::BySemester => "semester",
            Self::ByState => "state",
        }
    }

    pub const fn form_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ById => "by_id",
            Self::ByName => "by_name",
            Self::BySemester => "by_semester",
            Self::ByState => "by_state",
        }
    }

    /// Turns what was typed into the path parameter to send, or `None` for
    /// [`SearchMode::All`] which takes no parameter.
    pub fn prepare_term(self, raw: &str) -> Result<Option<String>, ValidationError> {
        let raw = raw.trim();
        if self == Self::All {
            return Ok(None);
        }
        ensure!(!raw.is_empty(), BlankSearchTermSnafu);

        Ok(Some(match self {
            Self::ById => raw
                .parse::<i64>()
                .context(InvalidIdSnafu { raw })?
                .to_string(),
            Self::BySemester => raw
                .parse::<i64>()
                .context(InvalidNumberSnafu {
                    field: "Semester",
                    raw,
                })?
                .to_string(),
            Self::ByState => raw.to_uppercase(),
            Self::All | Self::ByName => raw.to_string(),
        }))
    }
}

/// A search the records API offers for an entity.
#[derive(Debug, Copy, Clone)]
pub struct SearchEndpoint {
    pub mode: SearchMode,
    pub endpoint: &'static str,
    pub input: InputKind,
}

/// Everything the generic search/create/update/delete panels need to know
/// about one kind of record.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// url segment of this server, eg. `courses`
    const SLUG: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    const FIELDS: &'static [FieldSpec];
    const SEARCHES: &'static [SearchEndpoint];
    const COLUMNS: &'static [&'static str];

    const CREATE_ENDPOINT: &'static str;
    const UPDATE_ENDPOINT: &'static str;
    const DELETE_ENDPOINT: &'static str;

    fn row(&self) -> Vec<Markup>;

    fn search_endpoint(mode: SearchMode) -> Option<&'static SearchEndpoint> {
        Self::SEARCHES.iter().find(|search| search.mode == mode)
    }

    fn singular_lower() -> String {
        Self::SINGULAR.to_lowercase()
    }

    fn plural_lower() -> String {
        Self::PLURAL.to_lowercase()
    }
}
