/*!
 * Serbian eID reader
 * Reads identity records from a Serbian biometric ID card through the
 * vendor Celik driver and exposes them as JSON, either once on the console
 * or per request over HTTP.
 */

pub mod config;
pub mod decode;
pub mod driver;
pub mod identity;
#[cfg(feature = "celik")]
pub mod native;
pub mod records;
pub mod report;
pub mod server;
pub mod session;
pub mod worker;

#[cfg(test)]
mod testing;

pub use decode::{decode, DecodeError, DecodedRecord};
pub use driver::{CardType, Driver, DriverError, ResponseCode};
pub use identity::{read_identity, IdentityPayload, ReadError};
pub use worker::ReaderHandle;
