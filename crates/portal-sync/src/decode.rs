//! Response decoding.
//!
//! A body becomes a list of JSON elements according to its [`Envelope`],
//! optionally gets a term code injected into each element, and is then
//! decoded into as many typed record lists as the resource needs. Decoding
//! the same elements twice is how one array yields both primary records and
//! the [`portal_core::entities::CalendarDate`]s they reference.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use portal_core::entities::TERM_FIELD;

/// Where the record array sits in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The body is the array.
    Bare,
    /// The body is an object whose named field holds the array.
    Field(&'static str),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not JSON at all (this includes an empty body).
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("expected a JSON array, found {found}")]
    NotAnArray { found: &'static str },

    #[error("envelope field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("element {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// An element did not match the record type.
    #[error("element {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse `body` and return its record elements.
///
/// # Errors
///
/// Returns [`DecodeError`] if the body is not JSON, the envelope field is
/// missing, or the array is not where the envelope says.
pub fn elements(body: &str, envelope: Envelope) -> Result<Vec<Value>, DecodeError> {
    let root: Value = serde_json::from_str(body).map_err(DecodeError::Malformed)?;
    match envelope {
        Envelope::Bare => into_array(root),
        Envelope::Field(field) => unwrap_envelope(root, field),
    }
}

/// Extract the array held under `field` of a top-level object.
///
/// # Errors
///
/// Returns [`DecodeError`] if `root` is not an object, lacks `field`, or
/// `field` is not an array.
pub fn unwrap_envelope(root: Value, field: &'static str) -> Result<Vec<Value>, DecodeError> {
    let Value::Object(mut map) = root else {
        return Err(DecodeError::NotAnArray {
            found: type_name(&root),
        });
    };
    let inner = map
        .remove(field)
        .ok_or(DecodeError::MissingField { field })?;
    into_array(inner)
}

fn into_array(value: Value) -> Result<Vec<Value>, DecodeError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(DecodeError::NotAnArray {
            found: type_name(&other),
        }),
    }
}

/// Inject `term` under the term field of every element, replacing any
/// value already there.
///
/// # Errors
///
/// Returns [`DecodeError::NotAnObject`] for an element that is not an object.
pub fn tag_term(elements: &mut [Value], term: &str) -> Result<(), DecodeError> {
    for (index, element) in elements.iter_mut().enumerate() {
        let Value::Object(map) = element else {
            return Err(DecodeError::NotAnObject { index });
        };
        map.insert(TERM_FIELD.to_string(), Value::String(term.to_string()));
    }
    Ok(())
}

/// Decode every element into `T`.
///
/// # Errors
///
/// Returns [`DecodeError::Record`] for the first element that does not fit.
pub fn records<T: DeserializeOwned>(elements: &[Value]) -> Result<Vec<T>, DecodeError> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            T::deserialize(element).map_err(|source| DecodeError::Record { index, source })
        })
        .collect()
}
