/*!
 * Driver session adapter
 * Scoped, checked access to the driver. `Api` pairs startup with cleanup,
 * `CardSession` pairs begin-read with end-read. Both release in `Drop` if
 * they were not closed explicitly.
 */

use std::ffi::CStr;

use tracing::{debug, warn};

use crate::driver::{check, CardType, Driver, DriverCall, DriverError, API_VERSION};
use crate::records::{DocumentData, FixedPersonalData, VariablePersonalData};

/// An initialised driver. Dropping it calls `cleanup`.
pub struct Api<'d, D: Driver> {
    driver: &'d mut D,
    active: bool,
}

impl<'d, D: Driver> Api<'d, D> {
    pub fn startup(driver: &'d mut D) -> Result<Self, DriverError> {
        debug!(version = API_VERSION, "EidStartup");
        check(DriverCall::Startup, driver.startup(API_VERSION))?;
        Ok(Self {
            driver,
            active: true,
        })
    }

    /// Opens a read session on `reader_id` (empty for the default reader).
    ///
    /// Returns the raw card type tag next to the session; see
    /// [`CardType::try_from`].
    pub fn begin_read(
        &mut self,
        reader_id: &CStr,
    ) -> Result<(CardSession<'_, D>, Result<CardType, i32>), DriverError> {
        let mut card_type = 0;
        debug!(reader = ?reader_id, "EidBeginRead");
        check(
            DriverCall::BeginRead,
            self.driver.begin_read(reader_id, &mut card_type),
        )?;
        let session = CardSession {
            driver: &mut *self.driver,
            open: true,
        };
        Ok((session, CardType::try_from(card_type)))
    }

    /// Shuts the driver down, reporting a failing `cleanup`.
    pub fn cleanup(mut self) -> Result<(), DriverError> {
        self.active = false;
        debug!("EidCleanup");
        check(DriverCall::Cleanup, self.driver.cleanup())
    }
}

impl<D: Driver> Drop for Api<'_, D> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = check(DriverCall::Cleanup, self.driver.cleanup()) {
                warn!("Driver release failed: {}", err);
            }
        }
    }
}

/// An open read session. Dropping it calls `end_read`.
pub struct CardSession<'a, D: Driver> {
    driver: &'a mut D,
    open: bool,
}

impl<D: Driver> CardSession<'_, D> {
    pub fn read_document_data(&mut self) -> Result<DocumentData, DriverError> {
        let mut record = DocumentData::new();
        debug!("EidReadDocumentData");
        check(
            DriverCall::ReadDocumentData,
            self.driver.read_document_data(&mut record),
        )?;
        Ok(record)
    }

    pub fn read_fixed_personal_data(&mut self) -> Result<FixedPersonalData, DriverError> {
        let mut record = FixedPersonalData::new();
        debug!("EidReadFixedPersonalData");
        check(
            DriverCall::ReadFixedPersonalData,
            self.driver.read_fixed_personal_data(&mut record),
        )?;
        Ok(record)
    }

    pub fn read_variable_personal_data(&mut self) -> Result<VariablePersonalData, DriverError> {
        let mut record = VariablePersonalData::new();
        debug!("EidReadVariablePersonalData");
        check(
            DriverCall::ReadVariablePersonalData,
            self.driver.read_variable_personal_data(&mut record),
        )?;
        Ok(record)
    }

    /// Closes the session, reporting a failing `end_read`.
    pub fn end_read(mut self) -> Result<(), DriverError> {
        self.open = false;
        debug!("EidEndRead");
        check(DriverCall::EndRead, self.driver.end_read())
    }
}

impl<D: Driver> Drop for CardSession<'_, D> {
    fn drop(&mut self) {
        if self.open {
            if let Err(err) = check(DriverCall::EndRead, self.driver.end_read()) {
                warn!("Card session release failed: {}", err);
            }
        }
    }
}
