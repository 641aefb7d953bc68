//! Turning submitted form text into the JSON bodies the records API expects.

use crate::{
    data::{FieldFlags, FieldSpec, InputKind, form_input::FormInput},
    error::{
        IdRequiredSnafu, InvalidEmailSnafu, InvalidIdSnafu, InvalidNumberSnafu,
        MissingFieldsSnafu, NothingToUpdateSnafu, ValidationError,
    },
};
use email_address::EmailAddress;
use serde_json::{Map, Value};
use snafu::{ResultExt, ensure};
use std::str::FromStr;

pub type Payload = Map<String, Value>;

impl FieldSpec {
    /// Converts one non-blank value to the JSON the API wants for this field.
    pub fn coerce(&self, raw: &str) -> Result<Value, ValidationError> {
        if self.flags.contains(FieldFlags::NUMERIC) {
            let number = raw.parse::<i64>().context(InvalidNumberSnafu {
                field: self.label,
                raw,
            })?;
            return Ok(Value::from(number));
        }

        if self.input == InputKind::Email {
            EmailAddress::from_str(raw).context(InvalidEmailSnafu { raw })?;
        }

        Ok(if self.flags.contains(FieldFlags::UPPERCASE) {
            Value::from(raw.to_uppercase())
        } else {
            Value::from(raw)
        })
    }
}

/// Labels of the required create-fields left blank, in declaration order.
pub fn missing_required(fields: &[FieldSpec], input: &FormInput) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| field.flags.contains(FieldFlags::ON_CREATE) && field.is_required())
        .filter(|field| input.get(field.name).is_empty())
        .map(|field| field.label)
        .collect()
}

/// Full create body: every create-field present, blank optionals as `null`.
pub fn create_payload(fields: &[FieldSpec], input: &FormInput) -> Result<Payload, ValidationError> {
    let missing = missing_required(fields, input);
    ensure!(missing.is_empty(), MissingFieldsSnafu { fields: missing });

    let mut payload = Payload::new();
    for field in fields
        .iter()
        .filter(|field| field.flags.contains(FieldFlags::ON_CREATE))
    {
        let value = match input.non_blank(field.name) {
            Some(raw) => field.coerce(raw)?,
            None => Value::Null,
        };
        payload.insert(field.name.to_string(), value);
    }

    Ok(payload)
}

/// Sparse update body: only the fields that were actually filled in.
pub fn update_payload(fields: &[FieldSpec], input: &FormInput) -> Result<Payload, ValidationError> {
    let mut payload = Payload::new();
    for field in fields
        .iter()
        .filter(|field| field.flags.contains(FieldFlags::ON_UPDATE))
    {
        if let Some(raw) = input.non_blank(field.name) {
            payload.insert(field.name.to_string(), field.coerce(raw)?);
        }
    }

    ensure!(!payload.is_empty(), NothingToUpdateSnafu);
    Ok(payload)
}

pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    ensure!(!raw.is_empty(), IdRequiredSnafu);
    raw.parse().context(InvalidIdSnafu { raw })
}
