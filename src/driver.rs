/*!
 * Driver capability
 * The seven entry points of the Celik eID driver, its response codes and
 * the card generations it recognises.
 */

use std::ffi::CStr;
use std::fmt;

use thiserror::Error;

use crate::records::{DocumentData, FixedPersonalData, VariablePersonalData};

/// Protocol version passed to `EidStartup`.
pub const API_VERSION: i32 = 3;

/// Raw access to the eID driver.
///
/// Every method mirrors one native call and returns the driver's response
/// code untouched. Use [`crate::session::Api`] for checked, scoped access.
pub trait Driver: Send {
    fn startup(&mut self, api_version: i32) -> i32;
    fn cleanup(&mut self) -> i32;
    /// An empty `reader_id` selects the default reader.
    fn begin_read(&mut self, reader_id: &CStr, card_type: &mut i32) -> i32;
    fn end_read(&mut self) -> i32;
    fn read_document_data(&mut self, out: &mut DocumentData) -> i32;
    fn read_fixed_personal_data(&mut self, out: &mut FixedPersonalData) -> i32;
    fn read_variable_personal_data(&mut self, out: &mut VariablePersonalData) -> i32;
}

/// Response codes returned by every driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ResponseCode {
    Ok = 0,
    GeneralError = -1,
    InvalidParameter = -2,
    VersionNotSupported = -3,
    NotInitialized = -4,
    UnableToExecute = -5,
    ReaderError = -6,
    CardMissing = -7,
    CardUnknown = -8,
    CardMismatch = -9,
    UnableToOpenSession = -10,
    DataMissing = -11,
    CardSecFormatCheckError = -12,
    SecFormatCheckCertError = -13,
    InvalidPassword = -14,
    PinBlocked = -15,
}

impl ResponseCode {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Ok,
            -1 => Self::GeneralError,
            -2 => Self::InvalidParameter,
            -3 => Self::VersionNotSupported,
            -4 => Self::NotInitialized,
            -5 => Self::UnableToExecute,
            -6 => Self::ReaderError,
            -7 => Self::CardMissing,
            -8 => Self::CardUnknown,
            -9 => Self::CardMismatch,
            -10 => Self::UnableToOpenSession,
            -11 => Self::DataMissing,
            -12 => Self::CardSecFormatCheckError,
            -13 => Self::SecFormatCheckCertError,
            -14 => Self::InvalidPassword,
            -15 => Self::PinBlocked,
            _ => return None,
        })
    }

    pub fn description(self) -> &'static str {
        match self {
            ResponseCode::Ok => "success",
            ResponseCode::GeneralError => "general error",
            ResponseCode::InvalidParameter => "invalid parameter",
            ResponseCode::VersionNotSupported => "API version not supported",
            ResponseCode::NotInitialized => "driver not initialized",
            ResponseCode::UnableToExecute => "unable to execute",
            ResponseCode::ReaderError => "reader error",
            ResponseCode::CardMissing => "card missing",
            ResponseCode::CardUnknown => "card unknown",
            ResponseCode::CardMismatch => "card mismatch",
            ResponseCode::UnableToOpenSession => "unable to open session",
            ResponseCode::DataMissing => "data missing",
            ResponseCode::CardSecFormatCheckError => "card security format check error",
            ResponseCode::SecFormatCheckCertError => "security format certificate check error",
            ResponseCode::InvalidPassword => "invalid password",
            ResponseCode::PinBlocked => "PIN blocked",
        }
    }
}

/// Identity card generations reported by `EidBeginRead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CardType {
    Id2008 = 1,
    Id2014 = 2,
    /// Identity card for foreigners
    If2020 = 3,
}

impl TryFrom<i32> for CardType {
    type Error = i32;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(CardType::Id2008),
            2 => Ok(CardType::Id2014),
            3 => Ok(CardType::If2020),
            other => Err(other),
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardType::Id2008 => "ID2008",
            CardType::Id2014 => "ID2014",
            CardType::If2020 => "IF2020",
        };
        f.write_str(name)
    }
}

/// Native entry point names, used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    Startup,
    Cleanup,
    BeginRead,
    EndRead,
    ReadDocumentData,
    ReadFixedPersonalData,
    ReadVariablePersonalData,
}

impl fmt::Display for DriverCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverCall::Startup => "EidStartup",
            DriverCall::Cleanup => "EidCleanup",
            DriverCall::BeginRead => "EidBeginRead",
            DriverCall::EndRead => "EidEndRead",
            DriverCall::ReadDocumentData => "EidReadDocumentData",
            DriverCall::ReadFixedPersonalData => "EidReadFixedPersonalData",
            DriverCall::ReadVariablePersonalData => "EidReadVariablePersonalData",
        };
        f.write_str(name)
    }
}

/// A driver call returned something other than [`ResponseCode::Ok`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{call} failed: {} (response code {code})", describe(.code))]
pub struct DriverError {
    pub call: DriverCall,
    pub code: i32,
}

impl DriverError {
    pub fn response(&self) -> Option<ResponseCode> {
        ResponseCode::from_code(self.code)
    }
}

fn describe(code: &i32) -> &'static str {
    ResponseCode::from_code(*code)
        .map(ResponseCode::description)
        .unwrap_or("unknown response code")
}

/// Maps a raw response code to `Ok(())` or a [`DriverError`] for `call`.
pub fn check(call: DriverCall, code: i32) -> Result<(), DriverError> {
    if code == ResponseCode::Ok as i32 {
        Ok(())
    } else {
        Err(DriverError { call, code })
    }
}
