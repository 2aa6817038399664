//! Request validation and response serialization
//!
//! Loading turns a raw JSON payload into a typed record, collecting every
//! offending field before failing. Dumping turns rows into the response shape,
//! joining related rows explicitly.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub mod department;
pub mod employee;

pub use department::{DepartmentChanges, DepartmentOut, DepartmentSummary, NewDepartment};
pub use employee::{EmployeeChanges, EmployeeOut, EmployeeSummary, NewEmployee};

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_STRING: &str = "Not a valid string.";
pub const NOT_INTEGER: &str = "Not a valid integer.";
pub const NOT_DATE: &str = "Not a valid date.";
pub const UNKNOWN: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for errors that concern the payload as a whole
pub const SCHEMA_KEY: &str = "_schema";

/// Date format accepted in payloads and query strings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field name to list of messages, serialized as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

/// Which fields must be present
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Every schema field is required
    Full,
    /// Only fields present in the payload are validated
    Partial,
    /// Every field except the listed ones is required
    FullExcept(&'a [&'a str]),
}

impl Mode<'_> {
    fn requires(&self, field: &str) -> bool {
        match self {
            Mode::Full => true,
            Mode::Partial => false,
            Mode::FullExcept(optional) => !optional.iter().any(|name| *name == field),
        }
    }
}

/// Field-by-field reader over a JSON object that accumulates errors
struct Payload<'a> {
    fields: &'a Map<String, Value>,
    mode: Mode<'a>,
    errors: ValidationErrors,
}

impl<'a> Payload<'a> {
    /// Start reading; non-objects fail immediately, unknown keys are recorded
    fn open(value: &'a Value, known: &[&str], mode: Mode<'a>) -> Result<Self, ValidationErrors> {
        let fields = value
            .as_object()
            .ok_or_else(|| ValidationErrors::single(SCHEMA_KEY, INVALID_INPUT))?;

        let mut errors = ValidationErrors::new();
        for key in fields.keys() {
            if !known.iter().any(|name| *name == key.as_str()) {
                errors.add(key, UNKNOWN);
            }
        }

        Ok(Self {
            fields,
            mode,
            errors,
        })
    }

    /// Present, non-null value for a field
    fn value(&mut self, field: &str) -> Option<&'a Value> {
        let fields = self.fields;
        match fields.get(field) {
            None => {
                if self.mode.requires(field) {
                    self.errors.add(field, MISSING);
                }
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str, min: usize, max: usize) -> Option<String> {
        let value = self.value(field)?;
        let Some(text) = value.as_str() else {
            self.errors.add(field, NOT_STRING);
            return None;
        };

        let length = text.chars().count();
        if length < min || length > max {
            self.errors
                .add(field, format!("Length must be between {} and {}.", min, max));
            return None;
        }

        Some(text.to_string())
    }

    fn integer(&mut self, field: &str, min: Option<i64>) -> Option<i64> {
        let value = self.value(field)?;
        let Some(number) = parse_integer(value) else {
            self.errors.add(field, NOT_INTEGER);
            return None;
        };

        if let Some(min) = min {
            if number < min {
                self.errors
                    .add(field, format!("Must be greater than or equal to {}.", min));
                return None;
            }
        }

        Some(number)
    }

    fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let value = self.value(field)?;
        match value.as_str().and_then(parse_date) {
            Some(date) => Some(date),
            None => {
                self.errors.add(field, NOT_DATE);
                None
            }
        }
    }

    /// Hand back the collected errors, if there were any
    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Integers, integral floats and numeric strings are accepted
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a `YYYY-MM-DD` calendar date with a year in 1..=9999
///
/// Stored dates are compared as text, so signed or wider years such as
/// `-0001-01-01` and `+10000-01-01` are rejected.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let fixed_width = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !fixed_width {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| (1..=9999).contains(&date.year()))
}
