//! Page layer for the ado command bar.
//!
//! This crate provides everything between the router and the screen:
//! - The Response Renderer and its result area model
//! - The Navigation Transition Sequencer
//! - Session bootstrap (authorization, identity, configuration)
//! - The CommandBar controller tying them together
//! - A terminal platform and the `ado` binary

pub mod bootstrap;
pub mod command_bar;
pub mod error;
pub mod page;
pub mod platform;
pub mod renderer;
pub mod transition;

pub use bootstrap::{
    authorize, Bootstrap, ConfigStore, CookieJar, Identity, IdentitySource, KeyValueCache,
    LoginReason, Session, Startup, TokenSource,
};
pub use command_bar::{initial_command, CommandBar, Submitted};
pub use error::PlatformError;
pub use page::{BufferedArea, Node, ResultArea, ResultCard};
pub use renderer::Renderer;
pub use transition::{
    FixedPolicy, LoadingScreen, LoadingSession, Navigator, RandomPolicy, Sequencer,
    SessionPhase, TransitionOutcome, TransitionPolicy,
};
