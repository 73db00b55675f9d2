//! Loading session state.

use uuid::Uuid;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Created, nothing shown yet.
    #[default]
    Idle,
    /// Loading screen visible and animating.
    Active,
    /// Navigation issued. Terminal.
    Navigating,
}

/// One navigation's loading screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingSession {
    pub id: Uuid,
    pub destination: String,
    pub motif: &'static str,
    progress: f64,
    phase: SessionPhase,
}

impl LoadingSession {
    pub fn new(destination: impl Into<String>, motif: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination: destination.into(),
            motif,
            progress: 0.0,
            phase: SessionPhase::Idle,
        }
    }

    /// Progress in `[0, 1]`. Never decreases.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn activate(&mut self) {
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::Active;
        }
    }

    /// Move progress forward, clamped to `[0, 1]`.
    ///
    /// Returns the resulting progress.
    pub fn advance(&mut self, progress: f64) -> f64 {
        if progress.is_finite() {
            self.progress = self.progress.max(progress.clamp(0.0, 1.0));
        }
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn mark_navigating(&mut self) {
        self.phase = SessionPhase::Navigating;
    }
}
