//! Command router for the ado command bar.
//!
//! Maps one raw input line to exactly one outcome:
//! - an in-page render (search results or a chat answer), or
//! - a destination URL for the transition sequencer.
//!
//! ## Dispatch Flow
//!
//! ```text
//!   raw input line
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  Command::parse  │  exact "<letter> " prefix, case-sensitive
//! └────────┬─────────┘
//!          │
//!     ┌────┴────────┐
//!     │             │
//!     ▼             ▼
//! prefix in      no prefix
//! PrefixTable       │
//!     │             ▼
//!     ▼        is_question(raw)?
//! route handler   │        │
//!     │          yes       no
//!     │           │        │
//!     ▼           ▼        ▼
//! Render /      query    lucky + reddit rewrite
//! Navigate      Render   Navigate
//! ```
//!
//! The router never touches the page; the caller renders or navigates.

mod router;
mod table;
mod templates;

pub use router::{Dispatch, Router};
pub use table::{Handler, PrefixTable, Route, Template};
pub use templates::UrlTemplates;
