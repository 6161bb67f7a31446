/*!
 * Reader worker
 * A dedicated thread owns the driver and runs read cycles one at a time, in
 * the order requests arrive.
 */

use std::ffi::CString;
use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::driver::Driver;
use crate::identity::{read_identity, IdentityPayload, ReadError};

type Reply = oneshot::Sender<Result<IdentityPayload, ReadError>>;

/// Handle used to queue read cycles on the worker thread.
#[derive(Clone)]
pub struct ReaderHandle {
    requests: mpsc::UnboundedSender<Reply>,
}

impl ReaderHandle {
    /// Starts the worker thread. It stops once every handle is dropped.
    pub fn spawn<D: Driver + 'static>(mut driver: D, reader_id: CString) -> Self {
        let (requests, mut queue) = mpsc::unbounded_channel::<Reply>();

        thread::spawn(move || {
            info!(reader = ?reader_id, "Reader worker started");
            while let Some(reply) = queue.blocking_recv() {
                if reply.is_closed() {
                    debug!("Requester gone, skipping read cycle");
                    continue;
                }
                debug!("Starting read cycle");
                let result = read_identity(&mut driver, &reader_id);
                // The requester may have gone away meanwhile.
                let _ = reply.send(result);
            }
            info!("Reader worker stopped");
        });

        Self { requests }
    }

    /// Queues one read cycle and waits for its result.
    pub async fn read(&self) -> Result<IdentityPayload, ReadError> {
        let (reply, result) = oneshot::channel();
        self.requests
            .send(reply)
            .map_err(|_| ReadError::ReaderUnavailable)?;
        result.await.map_err(|_| ReadError::ReaderUnavailable)?
    }
}
