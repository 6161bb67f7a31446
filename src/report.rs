/*!
 * Console report
 * One read cycle printed to a writer as JSON, as a per-field listing, or
 * both.
 */

use std::ffi::CStr;
use std::io::{self, Write};

use clap::ValueEnum;
use tracing::info;

use crate::decode::DecodedRecord;
use crate::driver::Driver;
use crate::identity::{read_identity, IdentityPayload};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// JSON document only
    Json,
    /// Field listing with declared sizes
    Text,
    /// JSON document followed by the field listing
    #[default]
    All,
}

/// Runs one read cycle and prints the outcome to `out`.
///
/// Returns the process exit status.
pub fn run<D: Driver, W: Write>(
    driver: &mut D,
    reader_id: &CStr,
    format: Format,
    out: &mut W,
) -> io::Result<u8> {
    match read_identity(driver, reader_id) {
        Ok(payload) => {
            info!("Identity data read");
            write_payload(&payload, format, out)?;
            Ok(EXIT_SUCCESS)
        }
        Err(err) => {
            writeln!(out, "Error: {}", err)?;
            Ok(EXIT_FAILURE)
        }
    }
}

pub fn write_payload<W: Write>(
    payload: &IdentityPayload,
    format: Format,
    out: &mut W,
) -> io::Result<()> {
    if matches!(format, Format::Json | Format::All) {
        serde_json::to_writer(&mut *out, payload)?;
        writeln!(out)?;
    }
    if matches!(format, Format::Text | Format::All) {
        for record in payload.records() {
            write_record(record, out)?;
        }
    }
    Ok(())
}

fn write_record<W: Write>(record: &DecodedRecord, out: &mut W) -> io::Result<()> {
    writeln!(out, "[{}]", record.kind)?;
    for field in &record.fields {
        writeln!(out, "{} ({} bytes): {}", field.name, field.size, field.value)?;
    }
    Ok(())
}
