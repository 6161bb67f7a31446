/*!
 * CelikApi binding
 * Links the vendor eID library. The library keeps process-wide state, so at
 * most one `CelikApi` value exists at any time.
 */

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::driver::Driver;
use crate::records::{DocumentData, FixedPersonalData, VariablePersonalData};

#[link(name = "CelikApi")]
extern "system" {
    fn EidStartup(api_version: c_int) -> c_int;
    fn EidCleanup() -> c_int;
    fn EidBeginRead(reader: *const c_char, card_type: *mut c_int) -> c_int;
    fn EidEndRead() -> c_int;
    fn EidReadDocumentData(data: *mut DocumentData) -> c_int;
    fn EidReadFixedPersonalData(data: *mut FixedPersonalData) -> c_int;
    fn EidReadVariablePersonalData(data: *mut VariablePersonalData) -> c_int;
}

static IN_USE: AtomicBool = AtomicBool::new(false);

/// Exclusive handle on the linked vendor library.
pub struct CelikApi {
    _private: (),
}

impl CelikApi {
    /// Returns `None` while another `CelikApi` is alive.
    pub fn acquire() -> Option<Self> {
        IN_USE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { _private: () })
    }
}

impl Drop for CelikApi {
    fn drop(&mut self) {
        IN_USE.store(false, Ordering::Release);
    }
}

// SAFETY (all calls below): records are `#[repr(C)]` mirrors of the vendor
// structures and outlive the call; `reader_id` is NUL-terminated.
impl Driver for CelikApi {
    fn startup(&mut self, api_version: i32) -> i32 {
        unsafe { EidStartup(api_version) }
    }

    fn cleanup(&mut self) -> i32 {
        unsafe { EidCleanup() }
    }

    fn begin_read(&mut self, reader_id: &CStr, card_type: &mut i32) -> i32 {
        unsafe { EidBeginRead(reader_id.as_ptr(), card_type) }
    }

    fn end_read(&mut self) -> i32 {
        unsafe { EidEndRead() }
    }

    fn read_document_data(&mut self, out: &mut DocumentData) -> i32 {
        unsafe { EidReadDocumentData(out) }
    }

    fn read_fixed_personal_data(&mut self, out: &mut FixedPersonalData) -> i32 {
        unsafe { EidReadFixedPersonalData(out) }
    }

    fn read_variable_personal_data(&mut self, out: &mut VariablePersonalData) -> i32 {
        unsafe { EidReadVariablePersonalData(out) }
    }
}
