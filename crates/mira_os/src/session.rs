#![forbid(unsafe_code)]

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use tracing::warn;

use mira_kernel_contracts::capture::{CaptureEvent, CaptureLocale, SessionHandle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("speech capture is not supported on this host")]
    Unsupported,
    #[error("speech capture failed to start: {0}")]
    StartFailed(String),
}

/// The speech-recognition collaborator. It pushes events into the channel
/// handed to `start` and stops delivering after `stop`.
pub trait CaptureBackend {
    fn start(
        &mut self,
        locale: &CaptureLocale,
        events: Sender<CaptureEvent>,
    ) -> Result<SessionHandle, CaptureError>;
    fn stop(&mut self, handle: SessionHandle);
}

/// Scoped listening session: acquired on `start`, released on explicit
/// `stop` or on drop, whichever comes first.
///
/// Events are drained one at a time on the host's single logical thread;
/// two transcripts are never interleaved.
pub struct VoiceSession<B: CaptureBackend> {
    backend: B,
    handle: Option<SessionHandle>,
    events: Option<Receiver<CaptureEvent>>,
    recording: bool,
}

impl<B: CaptureBackend> VoiceSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handle: None,
            events: None,
            recording: false,
        }
    }

    pub fn start(&mut self, locale: &CaptureLocale) -> Result<(), CaptureError> {
        self.stop();
        let (sender, receiver) = channel();
        let handle = self.backend.start(locale, sender)?;
        self.handle = Some(handle);
        self.events = Some(receiver);
        self.recording = true;
        Ok(())
    }

    /// Process every pending event. A capture failure is a state change
    /// ("recording stopped"), never an error return.
    pub fn drain(&mut self, mut sink: impl FnMut(&str)) {
        let Some(receiver) = self.events.as_ref() else {
            return;
        };
        loop {
            match receiver.try_recv() {
                Ok(CaptureEvent::Transcript(text)) => sink(&text),
                Ok(CaptureEvent::Error(message)) => {
                    warn!(%message, "capture engine reported an error");
                    self.recording = false;
                }
                Ok(CaptureEvent::Ended) => self.recording = false,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.recording = false;
                    break;
                }
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.backend.stop(handle);
        }
        self.events = None;
        self.recording = false;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }
}

impl<B: CaptureBackend> Drop for VoiceSession<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct BackendLog {
        started: u32,
        stopped: u32,
    }

    struct FakeBackend {
        log: Rc<RefCell<BackendLog>>,
        sender: Rc<RefCell<Option<Sender<CaptureEvent>>>>,
    }

    impl FakeBackend {
        fn new() -> (Self, Rc<RefCell<BackendLog>>, Rc<RefCell<Option<Sender<CaptureEvent>>>>) {
            let log = Rc::new(RefCell::new(BackendLog::default()));
            let sender = Rc::new(RefCell::new(None));
            (
                Self {
                    log: Rc::clone(&log),
                    sender: Rc::clone(&sender),
                },
                log,
                sender,
            )
        }
    }

    impl CaptureBackend for FakeBackend {
        fn start(
            &mut self,
            _locale: &CaptureLocale,
            events: Sender<CaptureEvent>,
        ) -> Result<SessionHandle, CaptureError> {
            let mut log = self.log.borrow_mut();
            log.started += 1;
            *self.sender.borrow_mut() = Some(events);
            Ok(SessionHandle(log.started as u64))
        }

        fn stop(&mut self, _handle: SessionHandle) {
            self.log.borrow_mut().stopped += 1;
        }
    }

    fn locale() -> CaptureLocale {
        CaptureLocale::v1("ar").unwrap()
    }

    #[test]
    fn at_session_01_transcripts_drain_in_arrival_order() {
        let (backend, _log, sender) = FakeBackend::new();
        let mut session = VoiceSession::new(backend);
        session.start(&locale()).unwrap();

        let tx = sender.borrow().clone().unwrap();
        tx.send(CaptureEvent::Transcript("select red".to_string())).unwrap();
        tx.send(CaptureEvent::Transcript("set dual".to_string())).unwrap();

        let mut seen = Vec::new();
        session.drain(|text| seen.push(text.to_string()));
        assert_eq!(seen, vec!["select red".to_string(), "set dual".to_string()]);
        assert!(session.is_recording());
    }

    #[test]
    fn at_session_02_capture_errors_flip_recording_without_failing() {
        let (backend, _log, sender) = FakeBackend::new();
        let mut session = VoiceSession::new(backend);
        session.start(&locale()).unwrap();

        let tx = sender.borrow().clone().unwrap();
        tx.send(CaptureEvent::Error("no-speech".to_string())).unwrap();
        session.drain(|_| panic!("no transcript expected"));
        assert!(!session.is_recording());
    }

    #[test]
    fn at_session_03_drop_stops_the_backend_exactly_once() {
        let (backend, log, _sender) = FakeBackend::new();
        {
            let mut session = VoiceSession::new(backend);
            session.start(&locale()).unwrap();
        }
        assert_eq!(log.borrow().stopped, 1);
    }

    #[test]
    fn at_session_04_explicit_stop_is_idempotent_under_drop() {
        let (backend, log, _sender) = FakeBackend::new();
        {
            let mut session = VoiceSession::new(backend);
            session.start(&locale()).unwrap();
            session.stop();
            assert!(!session.is_recording());
        }
        assert_eq!(log.borrow().stopped, 1);
    }

    #[test]
    fn at_session_05_restart_releases_the_previous_session() {
        let (backend, log, _sender) = FakeBackend::new();
        let mut session = VoiceSession::new(backend);
        session.start(&locale()).unwrap();
        session.start(&locale()).unwrap();
        assert_eq!(log.borrow().started, 2);
        assert_eq!(log.borrow().stopped, 1);
        drop(session);
        assert_eq!(log.borrow().stopped, 2);
    }
}
