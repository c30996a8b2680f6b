// libretag/src/dispatcher/worker.rs

//! Async front end: one dedicated thread per dispatcher executes actions in
//! the order they were submitted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use log::{error, info};
use tokio::sync::{broadcast, oneshot};

use crate::dispatcher::{ActionRequest, Dispatcher, Reading};
use crate::transport::Transceiver;
use crate::{Error, Result};

const READING_CHANNEL_SIZE: usize = 16;

enum Job {
    Perform {
        request: ActionRequest,
        reply: oneshot::Sender<Result<Reading>>,
    },
    SetCredentials {
        unlock_code: u32,
        password: Vec<u8>,
    },
}

/// Owns a [`Dispatcher`] on its own thread.
pub struct DispatcherWorker<T> {
    sender: Option<mpsc::Sender<Job>>,
    busy: Arc<AtomicBool>,
    readings: broadcast::Sender<Reading>,
    worker: Option<JoinHandle<Dispatcher<T>>>,
}

impl<T: Transceiver + Send + 'static> DispatcherWorker<T> {
    /// Move `dispatcher` onto a new worker thread.
    pub fn spawn(dispatcher: Dispatcher<T>) -> Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let (readings, _) = broadcast::channel(READING_CHANNEL_SIZE);
        let busy = Arc::new(AtomicBool::new(false));

        let worker_readings = readings.clone();
        let worker_busy = Arc::clone(&busy);
        let worker = thread::Builder::new()
            .name("libretag-dispatcher".into())
            .spawn(move || {
                let mut dispatcher = dispatcher;
                while let Ok(job) = receiver.recv() {
                    match job {
                        Job::Perform { request, reply } => {
                            let result = dispatcher.perform(request);
                            if let Ok(reading) = &result {
                                // no subscribers is not an error
                                let _ = worker_readings.send(reading.clone());
                            }
                            worker_busy.store(false, Ordering::Release);
                            if reply.send(result).is_err() {
                                error!("caller dropped before receiving its reading");
                            }
                        }
                        Job::SetCredentials {
                            unlock_code,
                            password,
                        } => dispatcher.set_credentials(unlock_code, password),
                    }
                }
                info!("dispatcher worker shutting down");
                dispatcher
            })
            .map_err(|e| Error::UnsupportedOperation(format!("failed to spawn worker: {}", e)))?;

        Ok(Self {
            sender: Some(sender),
            busy,
            readings,
            worker: Some(worker),
        })
    }

    /// Run `request` on the worker. Fails with [`Error::SessionBusy`] while
    /// another action is in flight.
    pub async fn perform(&self, request: ActionRequest) -> Result<Reading> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(Error::SessionBusy);
        }
        let (reply, response) = oneshot::channel();
        if self.send(Job::Perform { request, reply }).is_err() {
            self.busy.store(false, Ordering::Release);
            return Err(Error::WorkerStopped);
        }
        response.await.map_err(|_| Error::WorkerStopped)?
    }

    /// Queue new credentials; they apply to every action submitted later.
    pub fn set_credentials(&self, unlock_code: u32, password: impl Into<Vec<u8>>) -> Result<()> {
        self.send(Job::SetCredentials {
            unlock_code,
            password: password.into(),
        })
    }

    /// True while an action is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Stream of every reading the worker produces.
    pub fn subscribe(&self) -> broadcast::Receiver<Reading> {
        self.readings.subscribe()
    }

    /// Stop the worker once queued jobs are done and hand back the dispatcher.
    pub fn shutdown(mut self) -> Result<Dispatcher<T>> {
        self.sender.take();
        let worker = self.worker.take().ok_or(Error::WorkerStopped)?;
        worker.join().map_err(|_| Error::WorkerStopped)
    }

    fn send(&self, job: Job) -> Result<()> {
        self.sender
            .as_ref()
            .ok_or(Error::WorkerStopped)?
            .send(job)
            .map_err(|_| Error::WorkerStopped)
    }
}

impl<T> Drop for DispatcherWorker<T> {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("dispatcher worker panicked");
            }
        }
    }
}
