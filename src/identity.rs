/*!
 * Identity read cycle
 * One complete pass over the card: startup, begin read, the three record
 * reads, decode, end read, cleanup.
 */

use std::ffi::CStr;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::decode::{decode, DecodeError, DecodedRecord};
use crate::driver::{Driver, DriverError};
use crate::session::Api;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub document_data: DecodedRecord,
    pub fixed_personal_data: DecodedRecord,
    pub variable_personal_data: DecodedRecord,
}

impl IdentityPayload {
    pub fn records(&self) -> [&DecodedRecord; 3] {
        [
            &self.document_data,
            &self.fixed_personal_data,
            &self.variable_personal_data,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("unrecognized card type {0}")]
    UnrecognizedCardType(i32),
    #[error("card reader worker is not running")]
    ReaderUnavailable,
}

/// Reads and decodes all identity records from the card in `reader_id`.
///
/// Every session opened here is closed again before returning, whether the
/// read succeeded or not.
pub fn read_identity<D: Driver>(
    driver: &mut D,
    reader_id: &CStr,
) -> Result<IdentityPayload, ReadError> {
    let mut api = Api::startup(driver)?;
    let (mut session, card_type) = api.begin_read(reader_id)?;

    let card_type = card_type.map_err(ReadError::UnrecognizedCardType)?;
    info!(%card_type, "Card session opened");

    let document = session.read_document_data()?;
    let fixed = session.read_fixed_personal_data()?;
    let variable = session.read_variable_personal_data()?;

    let payload = IdentityPayload {
        document_data: decode(&document)?,
        fixed_personal_data: decode(&fixed)?,
        variable_personal_data: decode(&variable)?,
    };

    session.end_read()?;
    api.cleanup()?;

    Ok(payload)
}
