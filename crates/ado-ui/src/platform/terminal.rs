//! Terminal rendition of the page: result area on stdout, loading screen on
//! stderr, navigation through the system opener.

use std::io::{self, Stderr, Stdout, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::page::{Node, ResultArea, ResultCard};
use crate::transition::{LoadingScreen, LoadingSession, Navigator};

/// Progress bar width in characters.
const BAR_WIDTH: usize = 30;

/// Location reported before the first navigation.
pub const HOME_LOCATION: &str = "ado://home";

// =============================================================================
// Result Area
// =============================================================================

/// Result area printing every node as it is appended.
pub struct TerminalArea<W: Write + Send> {
    out: W,
    visible: bool,
    dirty: bool,
}

impl TerminalArea<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalArea<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: false,
            dirty: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write result: {}", e);
        }
    }
}

impl<W: Write + Send> ResultArea for TerminalArea<W> {
    fn append(&mut self, node: Node) {
        let text = format_node(&node);
        self.write(&text);
        self.dirty = true;
    }

    fn clear(&mut self) {
        // Printed output cannot be taken back; separate it instead.
        if self.dirty {
            self.write("\n");
            self.dirty = false;
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn format_node(node: &Node) -> String {
    match node {
        Node::Markdown(text) => format!("{}\n", text.trim_end()),
        Node::Text(text) => format!("> {text}\n"),
        Node::Card(card) => format_card(card),
        Node::Error(message) => format!("{message}\n"),
    }
}

/// Cards carry HTML-escaped text; the terminal shows it plain.
fn format_card(card: &ResultCard) -> String {
    let mut out = format!(
        "{}\n  {}\n  {}\n",
        unescape_html(&card.title),
        card.href,
        card.breadcrumb
    );
    if !card.snippet.is_empty() {
        out.push_str(&format!("  {}\n", unescape_html(&card.snippet)));
    }
    out
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// =============================================================================
// Loading Screen
// =============================================================================

/// Loading screen drawing a textual progress bar.
pub struct TerminalScreen<W: Write + Send> {
    out: W,
    last_percent: Option<u32>,
}

impl TerminalScreen<Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_percent: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::debug!("Failed to draw loading screen: {}", e);
        }
    }
}

impl<W: Write + Send> LoadingScreen for TerminalScreen<W> {
    fn build(&mut self) {
        tracing::debug!("Terminal loading screen ready");
    }

    fn show(&mut self, session: &LoadingSession) {
        self.last_percent = None;
        self.write(&format!("Loading {}\n", session.destination));
    }

    fn reveal(&mut self, motif: &str) {
        self.write(&format!("{}\n", motif.trim_matches('\n')));
    }

    fn set_progress(&mut self, progress: f64) {
        let percent = (progress.clamp(0.0, 1.0) * 100.0).round() as u32;
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);

        let filled = (percent as usize * BAR_WIDTH) / 100;
        let mut line = format!(
            "\r[{}{}] {:>3}%",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            percent
        );
        if percent == 100 {
            line.push('\n');
        }
        self.write(&line);
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Navigator that hands destinations to the system opener.
///
/// The destination is always printed to stdout, so scripted use can capture
/// it even without an opener.
#[derive(Debug, Clone)]
pub struct SystemNavigator {
    location: String,
    opener: Option<String>,
}

impl SystemNavigator {
    pub fn new() -> Self {
        Self {
            location: HOME_LOCATION.to_string(),
            opener: Some(default_opener().to_string()),
        }
    }

    /// Print destinations without opening them.
    pub fn print_only() -> Self {
        Self {
            location: HOME_LOCATION.to_string(),
            opener: None,
        }
    }
}

impl Default for SystemNavigator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

impl Navigator for SystemNavigator {
    fn current_location(&self) -> String {
        self.location.clone()
    }

    fn assign(&mut self, destination: &str) {
        if destination.starts_with('#') {
            tracing::debug!("Fragment navigation '{}' stays on the page", destination);
            return;
        }

        self.location = destination.to_string();
        println!("{destination}");

        let Some(opener) = &self.opener else {
            return;
        };

        if let Err(e) = spawn_opener(opener, destination) {
            tracing::warn!("Failed to open '{}' with {}: {}", destination, opener, e);
        }
    }
}

/// Run `opener destination` and reap it on a detached thread.
fn spawn_opener(
    opener: &str,
    destination: &str,
) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(opener)
        .arg(destination)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let opener = opener.to_string();
    Ok(thread::spawn(move || {
        let status = child.wait()?;
        if !status.success() {
            tracing::debug!("{} exited with {}", opener, status);
        }
        Ok(status)
    }))
}
