use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::services::translation;
use crate::services::{Endpoint, TranslateError, TranslationRequest, TranslationResponse, Transport};
use crate::session::{BoxId, UiHost};

/// Lifecycle of the current translation, as seen between UI-thread calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

/// What a translate action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateOutcome {
    Started(JobId),
    /// The active box was empty; nothing happened.
    EmptySource,
    NoActiveBox,
    /// A translation is already in flight; the action was ignored.
    Busy,
    /// The worker could not be started. The error was reported to the host.
    Failed,
}

/// Result of one poll from the UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPoll {
    /// Nothing in flight. The poll timer can stop.
    Idle,
    /// Still waiting; the progress indicator was pulsed.
    Pending,
    /// The job completed and the host was updated. The poll timer can stop.
    Finished,
}

type JobResult = Result<TranslationResponse, TranslateError>;

struct InFlightJob {
    id: JobId,
    destination: BoxId,
    receiver: Receiver<JobResult>,
}

/// Runs translations off the UI thread, one at a time.
///
/// `translate` and `poll` must both be called from the UI thread. The worker
/// only ever talks back through a channel, so dropping the orchestrator while
/// a job is in flight simply discards the result.
pub struct Orchestrator {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    job: Option<InFlightJob>,
    next_id: u64,
}

impl Orchestrator {
    pub fn new(transport: Arc<dyn Transport>, endpoint: Endpoint) -> Self {
        Self {
            transport,
            endpoint,
            job: None,
            next_id: 1,
        }
    }

    pub fn state(&self) -> JobState {
        if self.job.is_some() {
            JobState::InFlight
        } else {
            JobState::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// Starts translating `active` into the other box.
    pub fn translate(&mut self, host: &dyn UiHost, active: BoxId) -> TranslateOutcome {
        if active.is_none() {
            return TranslateOutcome::NoActiveBox;
        }

        if let Some(job) = &self.job {
            tracing::debug!(job = job.id.0, "translation in flight, ignoring request");
            return TranslateOutcome::Busy;
        }

        let destination = active.other();
        let Some(request) = TranslationRequest::new(
            host.text(active),
            host.language(active),
            host.language(destination),
        ) else {
            return TranslateOutcome::EmptySource;
        };

        let id = JobId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = mpsc::channel::<JobResult>();
        let transport = Arc::clone(&self.transport);
        let endpoint = self.endpoint.clone();

        let spawned = thread::Builder::new()
            .name(format!("translate-{}", id.0))
            .spawn(move || {
                let result = translation::translate(transport.as_ref(), &request, &endpoint);
                // The receiver is gone if the window closed mid-flight.
                let _ = sender.send(result);
            });

        match spawned {
            Ok(_) => {
                tracing::info!(job = id.0, ?active, ?destination, "translation started");
                self.job = Some(InFlightJob {
                    id,
                    destination,
                    receiver,
                });
                host.progress_pulse();
                TranslateOutcome::Started(id)
            }
            Err(e) => {
                let error = TranslateError::ResourceExhaustion(format!(
                    "could not start translation worker: {}",
                    e
                ));
                tracing::warn!(job = id.0, %error, "translation failed");
                host.report_error(&error);
                host.progress_done();
                TranslateOutcome::Failed
            }
        }
    }

    /// Drains the worker's result, if any, and updates the host.
    pub fn poll(&mut self, host: &dyn UiHost) -> JobPoll {
        let Some(job) = &self.job else {
            return JobPoll::Idle;
        };

        let result = match job.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => {
                host.progress_pulse();
                return JobPoll::Pending;
            }
            Err(TryRecvError::Disconnected) => Err(TranslateError::Worker(
                "translation worker exited without a result".to_string(),
            )),
        };

        let Some(job) = self.job.take() else {
            return JobPoll::Idle;
        };

        match result {
            Ok(response) => {
                let text = response.text();
                tracing::info!(
                    job = job.id.0,
                    fragments = response.fragments().len(),
                    "translation finished"
                );
                host.set_text(job.destination, &text);
            }
            Err(error) => {
                tracing::warn!(job = job.id.0, %error, "translation failed");
                host.report_error(&error);
            }
        }

        host.progress_done();
        JobPoll::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::HttpRequest;
    use std::cell::{Cell, RefCell};
    use std::sync::Mutex;
    use std::sync::mpsc::Sender;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeHost {
        top: RefCell<String>,
        bottom: RefCell<String>,
        top_lang: Option<String>,
        bottom_lang: Option<String>,
        writes: Cell<usize>,
        pulses: Cell<usize>,
        done: Cell<usize>,
        errors: RefCell<Vec<String>>,
    }

    impl FakeHost {
        fn new(top: &str, bottom: &str) -> Self {
            Self {
                top: RefCell::new(top.to_string()),
                bottom: RefCell::new(bottom.to_string()),
                top_lang: Some("sv".to_string()),
                bottom_lang: Some("en".to_string()),
                ..Self::default()
            }
        }

        fn cell(&self, id: BoxId) -> &RefCell<String> {
            match id {
                BoxId::Top => &self.top,
                BoxId::Bottom => &self.bottom,
                BoxId::None => panic!("no box"),
            }
        }
    }

    impl UiHost for FakeHost {
        fn text(&self, id: BoxId) -> String {
            self.cell(id).borrow().clone()
        }

        fn set_text(&self, id: BoxId, text: &str) {
            *self.cell(id).borrow_mut() = text.to_string();
            self.writes.set(self.writes.get() + 1);
        }

        fn language(&self, id: BoxId) -> Option<String> {
            match id {
                BoxId::Top => self.top_lang.clone(),
                BoxId::Bottom => self.bottom_lang.clone(),
                BoxId::None => None,
            }
        }

        fn progress_pulse(&self) {
            self.pulses.set(self.pulses.get() + 1);
        }

        fn progress_done(&self) {
            self.done.set(self.done.get() + 1);
        }

        fn report_error(&self, error: &TranslateError) {
            self.errors.borrow_mut().push(error.to_string());
        }
    }

    /// Replies with a fixed body once the test opens the gate.
    struct FakeTransport {
        reply: Result<String, String>,
        gate: Option<Mutex<Receiver<()>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn replying(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                gate: None,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn gated(reply: &str) -> (Arc<Self>, Sender<()>) {
            let (open, gate) = mpsc::channel();
            let transport = Arc::new(Self {
                reply: Ok(reply.to_string()),
                gate: Some(Mutex::new(gate)),
                requests: Mutex::new(Vec::new()),
            });
            (transport, open)
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl Transport for FakeTransport {
        fn send(&self, request: &HttpRequest) -> Result<Vec<u8>, TranslateError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                let _ = gate.lock().unwrap().recv();
            }
            self.reply
                .clone()
                .map(String::into_bytes)
                .map_err(TranslateError::Transport)
        }
    }

    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn send(&self, _request: &HttpRequest) -> Result<Vec<u8>, TranslateError> {
            panic!("worker blew up");
        }
    }

    fn orchestrator(transport: Arc<dyn Transport>) -> Orchestrator {
        Orchestrator::new(transport, Endpoint::default())
    }

    fn poll_until_finished(orch: &mut Orchestrator, host: &FakeHost) -> JobPoll {
        for _ in 0..500 {
            match orch.poll(host) {
                JobPoll::Pending => thread::sleep(Duration::from_millis(10)),
                other => return other,
            }
        }
        panic!("translation never finished");
    }

    #[test]
    fn test_empty_source_is_a_no_op() {
        let transport = FakeTransport::replying(Ok(r#"[[["x","y"]]]"#));
        let mut orch = orchestrator(transport.clone());
        let host = FakeHost::new("", "keep me");

        assert_eq!(orch.translate(&host, BoxId::Top), TranslateOutcome::EmptySource);
        assert_eq!(orch.poll(&host), JobPoll::Idle);

        assert_eq!(orch.state(), JobState::Idle);
        assert_eq!(*host.bottom.borrow(), "keep me");
        assert_eq!(host.pulses.get(), 0);
        assert_eq!(host.done.get(), 0);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_no_active_box() {
        let transport = FakeTransport::replying(Ok(r#"[[["x","y"]]]"#));
        let mut orch = orchestrator(transport.clone());
        let host = FakeHost::new("text", "");

        assert_eq!(orch.translate(&host, BoxId::None), TranslateOutcome::NoActiveBox);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_translates_top_into_bottom() {
        let transport = FakeTransport::replying(Ok(r#"[[["hi there","hej då",null,null,1]],,]"#));
        let mut orch = orchestrator(transport.clone());
        let host = FakeHost::new("hej då", "stale");

        assert!(matches!(
            orch.translate(&host, BoxId::Top),
            TranslateOutcome::Started(_)
        ));
        assert_eq!(orch.state(), JobState::InFlight);
        assert!(host.pulses.get() >= 1);

        assert_eq!(poll_until_finished(&mut orch, &host), JobPoll::Finished);

        assert_eq!(*host.bottom.borrow(), "hi there");
        assert_eq!(*host.top.borrow(), "hej då");
        assert_eq!(host.done.get(), 1);
        assert!(host.errors.borrow().is_empty());
        assert_eq!(orch.state(), JobState::Idle);
        assert_eq!(orch.poll(&host), JobPoll::Idle);

        let requests = transport.requests.lock().unwrap();
        let sent = &requests[0];
        assert!(sent.url.contains("sl=sv"));
        assert!(sent.url.contains("tl=en"));
        assert_eq!(sent.body.as_deref(), Some("q=hej%20d%C3%A5"));
    }

    #[test]
    fn test_translates_bottom_into_top_with_swapped_languages() {
        let transport = FakeTransport::replying(Ok(r#"[[["Hej ","Hi "],["världen","world"]]]"#));
        let mut orch = orchestrator(transport.clone());
        let host = FakeHost::new("", "Hi world");

        orch.translate(&host, BoxId::Bottom);
        poll_until_finished(&mut orch, &host);

        assert_eq!(*host.top.borrow(), "Hej världen");
        let requests = transport.requests.lock().unwrap();
        assert!(requests[0].url.contains("sl=en"));
        assert!(requests[0].url.contains("tl=sv"));
    }

    #[test]
    fn test_transport_failure_leaves_destination_untouched() {
        let transport = FakeTransport::replying(Err("connection refused"));
        let mut orch = orchestrator(transport);
        let host = FakeHost::new("hej", "previous translation");

        orch.translate(&host, BoxId::Top);
        assert_eq!(poll_until_finished(&mut orch, &host), JobPoll::Finished);

        assert_eq!(*host.bottom.borrow(), "previous translation");
        assert_eq!(host.writes.get(), 0);
        assert_eq!(host.done.get(), 1);
        assert_eq!(host.errors.borrow().len(), 1);
        assert!(host.errors.borrow()[0].contains("connection refused"));
        assert_eq!(orch.state(), JobState::Idle);
    }

    #[test]
    fn test_malformed_response_is_reported() {
        let transport = FakeTransport::replying(Ok("<html>503</html>"));
        let mut orch = orchestrator(transport);
        let host = FakeHost::new("hej", "previous");

        orch.translate(&host, BoxId::Top);
        poll_until_finished(&mut orch, &host);

        assert_eq!(*host.bottom.borrow(), "previous");
        assert_eq!(host.done.get(), 1);
        assert!(host.errors.borrow()[0].starts_with("Malformed response"));
    }

    #[test]
    fn test_second_request_while_in_flight_is_ignored() {
        let (transport, open) = FakeTransport::gated(r#"[[["first","forsta"]]]"#);
        let mut orch = orchestrator(transport.clone());
        let host = FakeHost::new("forsta", "");

        let TranslateOutcome::Started(first) = orch.translate(&host, BoxId::Top) else {
            panic!("first translation did not start");
        };

        host.top.replace("andra".to_string());
        assert_eq!(orch.translate(&host, BoxId::Top), TranslateOutcome::Busy);
        assert_eq!(orch.translate(&host, BoxId::Bottom), TranslateOutcome::Busy);

        assert_eq!(orch.poll(&host), JobPoll::Pending);
        assert!(orch.is_busy());

        open.send(()).unwrap();
        assert_eq!(poll_until_finished(&mut orch, &host), JobPoll::Finished);

        assert_eq!(*host.bottom.borrow(), "first");
        assert_eq!(host.writes.get(), 1);
        assert_eq!(host.done.get(), 1);
        assert_eq!(transport.calls(), 1);

        // Accepted again once idle.
        let TranslateOutcome::Started(second) = orch.translate(&host, BoxId::Top) else {
            panic!("translation after completion did not start");
        };
        assert!(second > first);
        open.send(()).unwrap();
        poll_until_finished(&mut orch, &host);
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_pending_poll_pulses_progress() {
        let (transport, open) = FakeTransport::gated(r#"[[["ok","ok"]]]"#);
        let mut orch = orchestrator(transport);
        let host = FakeHost::new("ok", "");

        orch.translate(&host, BoxId::Top);
        let before = host.pulses.get();
        assert_eq!(orch.poll(&host), JobPoll::Pending);
        assert_eq!(orch.poll(&host), JobPoll::Pending);
        assert_eq!(host.pulses.get(), before + 2);
        assert_eq!(host.done.get(), 0);

        open.send(()).unwrap();
        poll_until_finished(&mut orch, &host);
        assert_eq!(host.done.get(), 1);
    }

    #[test]
    fn test_worker_panic_is_reported_not_propagated() {
        let mut orch = orchestrator(Arc::new(PanickingTransport));
        let host = FakeHost::new("hej", "untouched");

        orch.translate(&host, BoxId::Top);
        assert_eq!(poll_until_finished(&mut orch, &host), JobPoll::Finished);

        assert_eq!(*host.bottom.borrow(), "untouched");
        assert_eq!(host.done.get(), 1);
        assert!(host.errors.borrow()[0].starts_with("Translation worker failed"));
        assert_eq!(orch.state(), JobState::Idle);
        assert!(!orch.is_busy());
    }

    #[test]
    fn test_dropping_orchestrator_discards_result() {
        let (transport, open) = FakeTransport::gated(r#"[[["late","sen"]]]"#);
        let host = FakeHost::new("sen", "before");

        {
            let mut orch = orchestrator(transport.clone());
            orch.translate(&host, BoxId::Top);
        }

        open.send(()).unwrap();
        thread::sleep(Duration::from_millis(50));

        assert_eq!(*host.bottom.borrow(), "before");
        assert_eq!(host.writes.get(), 0);
        assert_eq!(transport.calls(), 1);
    }
}
