use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use hoerspiel_core::{Effect, FetchOutcome, Msg, RequestId};
use hoerspiel_engine::{EngineEvent, EngineHandle, FetchReport};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Turns core effects into engine commands and engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch {
                    request_id,
                    request,
                } => {
                    engine_info!(
                        "Search request_id={} term={:?} target={}",
                        request_id,
                        request.term,
                        request.target
                    );
                    self.engine.search(request_id, request);
                }
                Effect::FetchAll {
                    request_id,
                    requests,
                } => {
                    engine_info!(
                        "Search request_id={} sections={}",
                        request_id,
                        requests.len()
                    );
                    self.engine.search_all(request_id, requests);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.recv_timeout(EVENT_POLL_INTERVAL) {
                Ok(event) => {
                    if msg_tx.send(map_event(event)).is_err() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    engine_warn!("Engine event channel closed");
                    break;
                }
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { request_id, report } => Msg::SearchCompleted {
            request_id,
            outcome: map_report(request_id, report),
        },
        EngineEvent::SearchAllCompleted {
            request_id,
            reports,
        } => Msg::LandingCompleted {
            request_id,
            sections: reports
                .into_iter()
                .map(|report| map_report(request_id, report))
                .collect(),
        },
    }
}

fn map_report(request_id: RequestId, report: FetchReport) -> FetchOutcome {
    if report.failed() {
        engine_warn!(
            "Request {} ended early ({}); showing {} items",
            request_id,
            report.termination,
            report.items.len()
        );
    }
    report.into_outcome()
}
