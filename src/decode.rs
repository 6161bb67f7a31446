/*!
 * Record decoder
 * Cuts every field down to the size declared by the driver and converts it
 * to text.
 */

use std::str::Utf8Error;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::warn;

use crate::records::{RawField, Record};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record}.{field} is not valid UTF-8: {source}")]
pub struct DecodeError {
    pub record: &'static str,
    pub field: &'static str,
    pub source: Utf8Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: &'static str,
    pub value: String,
    /// Size as declared by the driver, before clamping.
    pub size: i32,
}

/// A decoded record, in driver field order.
///
/// Serialises as a flat object: `{ "<name>": "<value>", "<name>Size": <size>, ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub kind: &'static str,
    pub fields: Vec<DecodedField>,
}

impl DecodedRecord {
    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Serialize for DecodedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() * 2))?;
        for field in &self.fields {
            map.serialize_entry(field.name, &field.value)?;
            map.serialize_entry(&format!("{}Size", field.name), &field.size)?;
        }
        map.end()
    }
}

pub fn decode<R: Record>(record: &R) -> Result<DecodedRecord, DecodeError> {
    let fields = record
        .fields()
        .into_iter()
        .map(|field| decode_field(R::KIND, field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedRecord {
        kind: R::KIND,
        fields,
    })
}

fn decode_field(kind: &'static str, field: RawField<'_>) -> Result<DecodedField, DecodeError> {
    let len = usize::try_from(field.declared_size)
        .unwrap_or(0)
        .min(field.buffer.len());
    if i64::from(field.declared_size) != len as i64 {
        warn!(
            record = kind,
            field = field.name,
            declared = field.declared_size,
            capacity = field.buffer.len(),
            "Declared field size out of range, clamped to {}",
            len
        );
    }

    let value = std::str::from_utf8(&field.buffer[..len]).map_err(|source| DecodeError {
        record: kind,
        field: field.name,
        source,
    })?;

    Ok(DecodedField {
        name: field.name,
        value: value.to_string(),
        size: field.declared_size,
    })
}
