/*!
 * Scripted driver used by the unit tests.
 */

use std::collections::HashMap;
use std::ffi::CStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::driver::Driver;
use crate::records::{fill, DocumentData, FixedPersonalData, VariablePersonalData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Startup,
    Cleanup,
    BeginRead,
    EndRead,
    ReadDocumentData,
    ReadFixedPersonalData,
    ReadVariablePersonalData,
}

/// Counts open read sessions across every driver sharing it.
#[derive(Debug, Default)]
pub struct SessionCounter {
    open: AtomicUsize,
    peak: AtomicUsize,
    total: AtomicUsize,
}

impl SessionCounter {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

pub struct FakeDriver {
    pub calls: Vec<Call>,
    pub api_version: Option<i32>,
    pub reader_id: Option<String>,
    failures: HashMap<Call, i32>,
    card_type: i32,
    document: DocumentData,
    fixed: FixedPersonalData,
    variable: VariablePersonalData,
    read_delay: Option<Duration>,
    sessions: Option<Arc<SessionCounter>>,
    panic_on_startup: bool,
}

impl Default for FakeDriver {
    fn default() -> Self {
        let mut document = DocumentData::new();
        document.doc_reg_no_size = fill(&mut document.doc_reg_no, b"012345678");
        document.document_type_size = fill(&mut document.document_type, b"ID");
        document.issuing_date_size = fill(&mut document.issuing_date, b"01.02.2020");
        document.expiry_date_size = fill(&mut document.expiry_date, b"01.02.2030");
        document.issuing_authority_size =
            fill(&mut document.issuing_authority, "ПУ Београд".as_bytes());

        let mut fixed = FixedPersonalData::new();
        fixed.personal_number_size = fill(&mut fixed.personal_number, b"0101990123456");
        fixed.surname_size = fill(&mut fixed.surname, "Петровић".as_bytes());
        fixed.given_name_size = fill(&mut fixed.given_name, "Марко".as_bytes());
        fixed.sex_size = fill(&mut fixed.sex, b"M");
        fixed.date_of_birth_size = fill(&mut fixed.date_of_birth, b"01.01.1990");

        let mut variable = VariablePersonalData::new();
        variable.state_size = fill(&mut variable.state, b"SRB");
        variable.place_size = fill(&mut variable.place, "Београд".as_bytes());
        variable.street_size = fill(&mut variable.street, "Кнеза Милоша".as_bytes());
        variable.house_number_size = fill(&mut variable.house_number, b"12");

        Self {
            calls: Vec::new(),
            api_version: None,
            reader_id: None,
            failures: HashMap::new(),
            card_type: 2,
            document,
            fixed,
            variable,
            read_delay: None,
            sessions: None,
            panic_on_startup: false,
        }
    }
}

impl FakeDriver {
    /// Makes `call` return `code`.
    pub fn failing(mut self, call: Call, code: i32) -> Self {
        self.failures.insert(call, code);
        self
    }

    pub fn with_card_type(mut self, card_type: i32) -> Self {
        self.card_type = card_type;
        self
    }

    pub fn with_fixed(mut self, fixed: FixedPersonalData) -> Self {
        self.fixed = fixed;
        self
    }

    /// Sleeps inside every record read.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Kills whichever thread calls `startup`.
    pub fn panicking_on_startup(mut self) -> Self {
        self.panic_on_startup = true;
        self
    }

    pub fn with_session_counter(mut self, sessions: Arc<SessionCounter>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    fn record(&mut self, call: Call) -> i32 {
        self.calls.push(call);
        self.failures.get(&call).copied().unwrap_or(0)
    }

    fn read<R: Clone>(&mut self, call: Call, source: &R, out: &mut R) -> i32 {
        if let Some(delay) = self.read_delay {
            thread::sleep(delay);
        }
        let code = self.record(call);
        if code == 0 {
            *out = source.clone();
        }
        code
    }
}

impl Driver for FakeDriver {
    fn startup(&mut self, api_version: i32) -> i32 {
        if self.panic_on_startup {
            panic!("driver crashed in EidStartup");
        }
        self.api_version = Some(api_version);
        self.record(Call::Startup)
    }

    fn cleanup(&mut self) -> i32 {
        self.record(Call::Cleanup)
    }

    fn begin_read(&mut self, reader_id: &CStr, card_type: &mut i32) -> i32 {
        self.reader_id = Some(reader_id.to_string_lossy().into_owned());
        let code = self.record(Call::BeginRead);
        if code == 0 {
            *card_type = self.card_type;
            if let Some(sessions) = &self.sessions {
                let open = sessions.open.fetch_add(1, Ordering::SeqCst) + 1;
                sessions.peak.fetch_max(open, Ordering::SeqCst);
                sessions.total.fetch_add(1, Ordering::SeqCst);
            }
        }
        code
    }

    fn end_read(&mut self) -> i32 {
        if let Some(sessions) = &self.sessions {
            sessions.open.fetch_sub(1, Ordering::SeqCst);
        }
        self.record(Call::EndRead)
    }

    fn read_document_data(&mut self, out: &mut DocumentData) -> i32 {
        let source = self.document.clone();
        self.read(Call::ReadDocumentData, &source, out)
    }

    fn read_fixed_personal_data(&mut self, out: &mut FixedPersonalData) -> i32 {
        let source = self.fixed.clone();
        self.read(Call::ReadFixedPersonalData, &source, out)
    }

    fn read_variable_personal_data(&mut self, out: &mut VariablePersonalData) -> i32 {
        let source = self.variable.clone();
        self.read(Call::ReadVariablePersonalData, &source, out)
    }
}
