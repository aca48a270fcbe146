use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::portal::{FetchError, GridPayload, GridTransport};

use super::sequencer::RequestToken;

/// What a completed grid fetch does to history when applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HistoryUpdate {
    /// Record the fetched URL as a new entry.
    Push,
    /// The browser already points at the URL (back/forward).
    Keep,
}

#[derive(Debug)]
pub(crate) enum JobMessage {
    GridFetched(GridFetchResult),
    SuggestionsFetched(SuggestionResult),
}

#[derive(Debug)]
pub(crate) struct GridFetchResult {
    pub(crate) token: RequestToken,
    pub(crate) url: String,
    pub(crate) history: HistoryUpdate,
    pub(crate) result: Result<GridPayload, FetchError>,
}

#[derive(Debug)]
pub(crate) struct SuggestionResult {
    pub(crate) token: RequestToken,
    pub(crate) term: String,
    pub(crate) result: Result<Vec<String>, FetchError>,
}

/// Runs transport calls on worker threads and collects their results.
pub(crate) struct ControllerJobs {
    transport: Arc<dyn GridTransport>,
    tx: Sender<JobMessage>,
    rx: Receiver<JobMessage>,
    outstanding: usize,
}

impl ControllerJobs {
    pub(crate) fn new(transport: Arc<dyn GridTransport>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            transport,
            tx,
            rx,
            outstanding: 0,
        }
    }

    /// Jobs spawned whose result has not been received yet.
    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub(crate) fn spawn_grid_fetch(&mut self, token: RequestToken, url: String, history: HistoryUpdate) {
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        let job_url = url.clone();
        self.outstanding += 1;
        let spawned = thread::Builder::new()
            .name("filtersync-grid".to_string())
            .spawn(move || {
                let result = transport.fetch_grid(&job_url);
                let _ = tx.send(JobMessage::GridFetched(GridFetchResult {
                    token,
                    url: job_url,
                    history,
                    result,
                }));
            });
        if let Err(err) = spawned {
            let _ = self.tx.send(JobMessage::GridFetched(GridFetchResult {
                token,
                url,
                history,
                result: Err(FetchError::Transport(format!("Failed to start fetch: {err}"))),
            }));
        }
    }

    pub(crate) fn spawn_suggestions(&mut self, token: RequestToken, term: String) {
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        let job_term = term.clone();
        self.outstanding += 1;
        let spawned = thread::Builder::new()
            .name("filtersync-suggest".to_string())
            .spawn(move || {
                let result = transport.fetch_suggestions(&job_term);
                let _ = tx.send(JobMessage::SuggestionsFetched(SuggestionResult {
                    token,
                    term: job_term,
                    result,
                }));
            });
        if let Err(err) = spawned {
            let _ = self.tx.send(JobMessage::SuggestionsFetched(SuggestionResult {
                token,
                term,
                result: Err(FetchError::Transport(format!("Failed to start fetch: {err}"))),
            }));
        }
    }

    pub(crate) fn try_recv(&mut self) -> Option<JobMessage> {
        match self.rx.try_recv() {
            Ok(message) => {
                self.outstanding = self.outstanding.saturating_sub(1);
                Some(message)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub(crate) fn recv_timeout(&mut self, timeout: Duration) -> Option<JobMessage> {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                self.outstanding = self.outstanding.saturating_sub(1);
                Some(message)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
