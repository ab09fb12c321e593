use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info};
use futures_util::future::join_all;
use hoerspiel_core::{RequestId, SearchRequest};
use tokio::sync::mpsc as async_mpsc;

use crate::fetch::{FetchSettings, ItunesSource, SearchSource};
use crate::paginate::PaginatedFetcher;
use crate::{EngineEvent, FetchError};

enum EngineCommand {
    Search {
        request_id: RequestId,
        request: SearchRequest,
    },
    SearchAll {
        request_id: RequestId,
        requests: Vec<SearchRequest>,
    },
}

/// Runs searches on a background thread with a single-threaded runtime.
///
/// Commands are answered with one [`EngineEvent`] each. There is no
/// cancellation: a search nobody waits for anymore still completes.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: Arc<std::sync::Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let page_size = settings.page_size;
        let source = ItunesSource::new(settings)?;
        Ok(Self::with_source(source, page_size))
    }

    pub fn with_source<S>(source: S, page_size: usize) -> Self
    where
        S: SearchSource + 'static,
    {
        let (cmd_tx, cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(PaginatedFetcher::new(source).with_page_size(page_size));
        engine_info!("Engine starting with page size {}", fetcher.page_size());

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(command_loop(fetcher, cmd_rx, event_tx));
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(std::sync::Mutex::new(event_rx)),
        }
    }

    pub fn search(&self, request_id: RequestId, request: SearchRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            request_id,
            request,
        });
    }

    pub fn search_all(&self, request_id: RequestId, requests: Vec<SearchRequest>) {
        let _ = self.cmd_tx.send(EngineCommand::SearchAll {
            request_id,
            requests,
        });
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine thread is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }
}

async fn command_loop<S>(
    fetcher: Arc<PaginatedFetcher<S>>,
    mut cmd_rx: async_mpsc::UnboundedReceiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) where
    S: SearchSource + 'static,
{
    while let Some(command) = cmd_rx.recv().await {
        let fetcher = fetcher.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let event = handle_command(fetcher.as_ref(), command).await;
            let _ = event_tx.send(event);
        });
    }
}

async fn handle_command<S: SearchSource>(
    fetcher: &PaginatedFetcher<S>,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Search {
            request_id,
            request,
        } => {
            let report = fetcher.fetch(&request.term, request.target).await;
            EngineEvent::SearchCompleted { request_id, report }
        }
        EngineCommand::SearchAll {
            request_id,
            requests,
        } => {
            let reports = join_all(
                requests
                    .iter()
                    .map(|request| fetcher.fetch(&request.term, request.target)),
            )
            .await;
            EngineEvent::SearchAllCompleted {
                request_id,
                reports,
            }
        }
    }
}
