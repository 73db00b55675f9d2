//! Navigation Transition Sequencer.
//!
//! Shows a loading screen with a progress bar before leaving the page.
//!
//! ```text
//! navigate(dest)
//!   same page? ──yes──> assign(dest)                      (Direct)
//!       │no
//!       v
//!   build scaffold once ─> show motif ─> [reveal + pause] ─> tick bar ─> assign(dest)
//! ```

use std::time::Duration;

use ado_core::TransitionOptions;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::motifs::MOTIFS;
use super::policy::TransitionPolicy;
use super::session::LoadingSession;

/// Progress bar update interval.
pub const TICK: Duration = Duration::from_millis(30);

/// Pause after the text reveal when the delay is enabled.
pub const REVEAL_PAUSE: Duration = Duration::from_millis(200);

// =============================================================================
// Seams
// =============================================================================

/// Loading screen overlay.
pub trait LoadingScreen: Send {
    /// Create the overlay. Called at most once per sequencer.
    fn build(&mut self);

    /// Start a session: empty text, progress at zero, overlay visible.
    fn show(&mut self, session: &LoadingSession);

    /// Put the session's motif on screen.
    fn reveal(&mut self, motif: &str);

    /// Progress in `[0, 1]`.
    fn set_progress(&mut self, progress: f64);
}

/// The page location.
pub trait Navigator: Send {
    fn current_location(&self) -> String;

    /// Leave for `destination`.
    fn assign(&mut self, destination: &str);
}

// =============================================================================
// Sequencer
// =============================================================================

/// How a navigation request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Same-page destination: navigated without a loading screen.
    Direct(String),

    /// Loading screen ran to completion before navigating.
    Completed(LoadingSession),
}

impl TransitionOutcome {
    pub fn destination(&self) -> &str {
        match self {
            TransitionOutcome::Direct(destination) => destination,
            TransitionOutcome::Completed(session) => &session.destination,
        }
    }
}

pub struct Sequencer {
    screen: Box<dyn LoadingScreen>,
    navigator: Box<dyn Navigator>,
    policy: Box<dyn TransitionPolicy>,
    options: TransitionOptions,
    scaffold_built: bool,
}

impl Sequencer {
    pub fn new(
        screen: impl LoadingScreen + 'static,
        navigator: impl Navigator + 'static,
        policy: impl TransitionPolicy + 'static,
        options: TransitionOptions,
    ) -> Self {
        Self {
            screen: Box::new(screen),
            navigator: Box::new(navigator),
            policy: Box::new(policy),
            options,
            scaffold_built: false,
        }
    }

    /// Navigate to `destination`, with a loading screen unless it points at
    /// the current page.
    ///
    /// Takes `&mut self`: one session at a time.
    pub async fn navigate(&mut self, destination: impl Into<String>) -> TransitionOutcome {
        let destination = destination.into();

        if self.is_same_page(&destination) {
            tracing::debug!("Same-page destination '{}', skipping transition", destination);
            self.navigator.assign(&destination);
            return TransitionOutcome::Direct(destination);
        }

        let mut session = self.begin(destination);
        tracing::info!(
            session = %session.id,
            destination = %session.destination,
            "Starting transition"
        );

        self.screen.reveal(session.motif);
        if self.options.enable_delay {
            time::sleep(REVEAL_PAUSE).await;
        }

        let duration = self.policy.duration(&self.options);
        self.animate(&mut session, duration).await;

        session.mark_navigating();
        self.navigator.assign(&session.destination);
        tracing::debug!(session = %session.id, "Transition complete");

        TransitionOutcome::Completed(session)
    }

    fn is_same_page(&self, destination: &str) -> bool {
        if destination.starts_with('#') {
            return true;
        }
        let current = self.navigator.current_location();
        destination == current || destination == format!("{current}#")
    }

    fn begin(&mut self, destination: String) -> LoadingSession {
        if !self.scaffold_built {
            self.screen.build();
            self.scaffold_built = true;
        }

        let motif = MOTIFS[self.policy.pick_motif(MOTIFS.len()) % MOTIFS.len()];
        let mut session = LoadingSession::new(destination, motif);
        session.activate();
        self.screen.show(&session);
        session
    }

    async fn animate(&mut self, session: &mut LoadingSession, duration: Duration) {
        let start = Instant::now();
        let mut ticker = time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let progress = if duration.is_zero() {
                1.0
            } else {
                start.elapsed().as_secs_f64() / duration.as_secs_f64()
            };
            self.screen.set_progress(session.advance(progress));

            if session.is_complete() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::mock::{NavigatorLog, RecordingNavigator, RecordingScreen, ScreenEvent};
    use crate::transition::{FixedPolicy, SessionPhase};

    fn sequencer(
        options: TransitionOptions,
        policy: FixedPolicy,
    ) -> (Sequencer, RecordingScreen, NavigatorLog) {
        let screen = RecordingScreen::new();
        let navigator = RecordingNavigator::new("https://ado.example/");
        let log = navigator.log();
        (
            Sequencer::new(screen.clone(), navigator, policy, options),
            screen,
            log,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_page_destinations_skip_screen() {
        let (mut sequencer, screen, log) =
            sequencer(TransitionOptions::default(), FixedPolicy::new(0));

        for destination in ["#top", "https://ado.example/", "https://ado.example/#"] {
            let outcome = sequencer.navigate(destination).await;
            assert_eq!(outcome, TransitionOutcome::Direct(destination.to_string()));
        }

        assert!(screen.events().is_empty());
        assert_eq!(
            log.assigned(),
            vec!["#top", "https://ado.example/", "https://ado.example/#"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_reaches_one_before_navigating() {
        let (mut sequencer, screen, log) =
            sequencer(TransitionOptions::default(), FixedPolicy::new(2));

        let started = Instant::now();
        let outcome = sequencer.navigate("https://rust-lang.org/").await;
        let elapsed = started.elapsed();

        let TransitionOutcome::Completed(session) = outcome else {
            panic!("expected a completed transition");
        };
        assert_eq!(session.destination, "https://rust-lang.org/");
        assert_eq!(session.motif, MOTIFS[2]);
        assert_eq!(session.phase(), SessionPhase::Navigating);
        assert!(session.is_complete());

        // 300ms at 30ms ticks, nothing past one extra tick.
        assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
        assert!(elapsed <= Duration::from_millis(330), "{elapsed:?}");

        let progress = screen.progress_values();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]), "{progress:?}");
        assert_eq!(progress.first(), Some(&0.0));
        assert_eq!(progress.last(), Some(&1.0));
        assert_eq!(log.assigned(), vec!["https://rust-lang.org/"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_order_without_delay() {
        let (mut sequencer, screen, _log) = sequencer(
            TransitionOptions::default(),
            FixedPolicy::new(0).with_duration(Duration::ZERO),
        );

        sequencer.navigate("https://rust-lang.org/").await;

        assert_eq!(
            screen.events(),
            vec![
                ScreenEvent::Build,
                ScreenEvent::Show,
                ScreenEvent::Reveal(MOTIFS[0].to_string()),
                ScreenEvent::Progress(1.0),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_adds_reveal_pause() {
        let options = TransitionOptions {
            enable_delay: true,
            ..TransitionOptions::default()
        };
        let (mut sequencer, _screen, log) = sequencer(
            options,
            FixedPolicy::new(0).with_duration(Duration::from_millis(900)),
        );

        let started = Instant::now();
        sequencer.navigate("https://rust-lang.org/").await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(1100), "{elapsed:?}");
        assert!(elapsed <= Duration::from_millis(1130), "{elapsed:?}");
        assert_eq!(log.assigned().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scaffold_built_once() {
        let (mut sequencer, screen, log) = sequencer(
            TransitionOptions::default(),
            FixedPolicy::new(1).with_duration(Duration::from_millis(60)),
        );

        sequencer.navigate("https://one.example/").await;
        sequencer.navigate("https://two.example/").await;

        let events = screen.events();
        let builds = events.iter().filter(|e| **e == ScreenEvent::Build).count();
        let shows = events.iter().filter(|e| **e == ScreenEvent::Show).count();
        assert_eq!(builds, 1);
        assert_eq!(shows, 2);
        assert_eq!(
            log.assigned(),
            vec!["https://one.example/", "https://two.example/"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigator_location_follows_assignments() {
        let (mut sequencer, screen, _log) = sequencer(
            TransitionOptions::default(),
            FixedPolicy::new(0).with_duration(Duration::ZERO),
        );

        sequencer.navigate("https://one.example/").await;
        let outcome = sequencer.navigate("https://one.example/#").await;

        assert!(matches!(outcome, TransitionOutcome::Direct(_)));
        assert_eq!(outcome.destination(), "https://one.example/#");
        assert_eq!(
            screen
                .events()
                .iter()
                .filter(|e| **e == ScreenEvent::Show)
                .count(),
            1
        );
    }
}
