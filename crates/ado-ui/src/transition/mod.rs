//! Loading-screen transitions for outbound navigation.

mod motifs;
mod policy;
mod sequencer;
mod session;

pub use motifs::MOTIFS;
pub use policy::{FixedPolicy, RandomPolicy, TransitionPolicy, DELAYED_MIN_ANIMATION};
pub use sequencer::{LoadingScreen, Navigator, Sequencer, TransitionOutcome, REVEAL_PAUSE, TICK};
pub use session::{LoadingSession, SessionPhase};

// =============================================================================
// Recording Screen and Navigator for Testing
// =============================================================================

#[cfg(test)]
pub mod mock {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum ScreenEvent {
        Build,
        Show,
        Reveal(String),
        Progress(f64),
    }

    /// Loading screen that records every call.
    #[derive(Clone, Default)]
    pub struct RecordingScreen {
        events: Arc<Mutex<Vec<ScreenEvent>>>,
    }

    impl RecordingScreen {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<ScreenEvent> {
            self.events.lock().clone()
        }

        pub fn progress_values(&self) -> Vec<f64> {
            self.events
                .lock()
                .iter()
                .filter_map(|e| match e {
                    ScreenEvent::Progress(p) => Some(*p),
                    _ => None,
                })
                .collect()
        }
    }

    impl LoadingScreen for RecordingScreen {
        fn build(&mut self) {
            self.events.lock().push(ScreenEvent::Build);
        }

        fn show(&mut self, _session: &LoadingSession) {
            self.events.lock().push(ScreenEvent::Show);
        }

        fn reveal(&mut self, motif: &str) {
            self.events.lock().push(ScreenEvent::Reveal(motif.to_string()));
        }

        fn set_progress(&mut self, progress: f64) {
            self.events.lock().push(ScreenEvent::Progress(progress));
        }
    }

    /// Shared view of a [`RecordingNavigator`]'s assignments.
    #[derive(Clone, Default)]
    pub struct NavigatorLog {
        assigned: Arc<Mutex<Vec<String>>>,
    }

    impl NavigatorLog {
        pub fn assigned(&self) -> Vec<String> {
            self.assigned.lock().clone()
        }
    }

    /// Navigator whose location follows its last assignment.
    pub struct RecordingNavigator {
        location: String,
        log: NavigatorLog,
    }

    impl RecordingNavigator {
        pub fn new(location: impl Into<String>) -> Self {
            Self {
                location: location.into(),
                log: NavigatorLog::default(),
            }
        }

        pub fn log(&self) -> NavigatorLog {
            self.log.clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_location(&self) -> String {
            self.location.clone()
        }

        fn assign(&mut self, destination: &str) {
            if !destination.starts_with('#') {
                self.location = destination.to_string();
            }
            self.log.assigned.lock().push(destination.to_string());
        }
    }
}
