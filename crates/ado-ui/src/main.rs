//! ado - command bar entry point.
//!
//! Bootstraps the session from the config directory, runs the initial command
//! given on the command line, then reads commands from stdin until EOF.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use ado_core::{config_dir, AppConfig, EngineError, QueryEngine, Response};
use ado_router::{PrefixTable, Router};
use ado_script::ScriptEngine;
use ado_ui::platform::{
    self, FileConfigStore, JsonFileStore, LocalIdentitySource, LocalTokenSource, SystemNavigator,
    TerminalArea, TerminalScreen, IDENTITY_FILE, STORE_FILE, TOKEN_FILE,
};
use ado_ui::{
    initial_command, Bootstrap, CommandBar, PlatformError, RandomPolicy, Renderer, Sequencer,
    Startup, Submitted,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

// =============================================================================
// Engine
// =============================================================================

/// Load the configured engine script, relative to the config directory.
fn load_engine(dir: &Path, config: &AppConfig) -> Result<Arc<dyn QueryEngine>, EngineError> {
    let path = dir.join(&config.engine.script);
    let source = std::fs::read_to_string(&path)
        .map_err(|e| EngineError::Script(format!("cannot read {}: {e}", path.display())))?;

    let name = path.display().to_string();
    let engine = ScriptEngine::from_source(&source, &name, config.engine.timeout())?;
    Ok(Arc::new(engine))
}

// =============================================================================
// Commands
// =============================================================================

fn print_usage() {
    let mut renderer = Renderer::new(TerminalArea::stdout());
    renderer.render(Response::UsageText {
        text: PrefixTable::standard().usage(),
    });
}

fn init(dir: &Path) -> Result<(), PlatformError> {
    let user = std::env::var("USER").unwrap_or_else(|_| "local".to_string());
    let written = platform::init_config_dir(dir, &user)?;

    if written.is_empty() {
        println!("{} is already set up", dir.display());
    }
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// The initial command: a `?q=...` query string or the joined arguments.
fn initial_input(args: &[String]) -> Option<String> {
    match args {
        [] => None,
        [query] if query.starts_with('?') => initial_command(query),
        _ => Some(args.join(" ")),
    }
}

async fn run(dir: &Path, args: &[String]) -> Result<(), PlatformError> {
    let store = JsonFileStore::open(dir.join(STORE_FILE))?;
    let tokens = LocalTokenSource::new(dir.join(TOKEN_FILE));
    let identities = LocalIdentitySource::new(dir.join(IDENTITY_FILE));
    let configs = FileConfigStore::new(dir);

    let startup = Bootstrap {
        cookies: &store,
        tokens: &tokens,
        cache: &store,
        identities: &identities,
        configs: &configs,
    }
    .resolve(|_, config| load_engine(dir, config))
    .await;

    let session = match startup {
        Startup::Ready(session) => session,
        Startup::Login(reason) => {
            eprintln!(
                "Run `ado --init` to set up {}, or set ${}.",
                dir.display(),
                platform::TOKEN_ENV
            );
            return Err(PlatformError::LoginRequired(reason.to_string()));
        }
    };

    let sequencer = Sequencer::new(
        TerminalScreen::stderr(),
        SystemNavigator::new(),
        RandomPolicy::new(),
        session.config.transition,
    );
    let mut bar = CommandBar::new(
        session.engine,
        Router::new(session.config.urls.clone()),
        Renderer::new(TerminalArea::stdout()),
        sequencer,
    );

    if let Some(command) = initial_input(args) {
        if let Submitted::Navigated(_) = bar.run_initial(&command).await {
            return Ok(());
        }
    }

    read_commands(&mut bar, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

/// Submit every line of `input` until EOF.
///
/// Lines are decoded lossily so a stray byte sequence cannot end the session.
async fn read_commands<R>(bar: &mut CommandBar, mut input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        eprint!("> ");
        let _ = std::io::stderr().flush();

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        if std::str::from_utf8(&buf).is_err() {
            tracing::warn!("Input line was not valid UTF-8; submitting it lossily");
        }
        bar.submit(line.trim_end_matches(['\n', '\r'])).await;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
        print_usage();
        return;
    }

    let Some(dir) = config_dir() else {
        eprintln!("Error: {}", PlatformError::NoConfigDir);
        std::process::exit(1);
    };

    if args.first().map(String::as_str) == Some("--init") {
        if let Err(e) = init(&dir) {
            tracing::error!("Setup failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("ado starting with config in {}", dir.display());

    if let Err(e) = rt.block_on(run(&dir, &args)) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial_input() {
        assert_eq!(initial_input(&[]), None);
        assert_eq!(
            initial_input(&args(&["s", "rust", "book"])),
            Some("s rust book".to_string())
        );
        assert_eq!(
            initial_input(&args(&["?q=g+tokio"])),
            Some("g tokio".to_string())
        );
        assert_eq!(initial_input(&args(&["?lang=en"])), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_utf8_line_keeps_reading() {
        use ado_core::testing::{EngineCall, MockEngine};
        use ado_core::TransitionOptions;
        use ado_ui::{BufferedArea, FixedPolicy};

        let engine = MockEngine::new().with_query_response(Response::PlainText {
            text: "hello".to_string(),
        });
        let area = BufferedArea::new();
        let mut bar = CommandBar::new(
            Arc::new(engine.clone()),
            Router::new(Default::default()),
            Renderer::new(area.clone()),
            Sequencer::new(
                TerminalScreen::new(Vec::new()),
                SystemNavigator::print_only(),
                FixedPolicy::new(0),
                TransitionOptions::default(),
            ),
        );

        read_commands(&mut bar, &b"\xff\nc hi\r\n"[..]).await.unwrap();

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::IsQuestion("\u{FFFD}".to_string()),
                EngineCall::Lucky("\u{FFFD}".to_string()),
                EngineCall::Query("hi".to_string()),
            ]
        );
        assert_eq!(
            area.nodes(),
            vec![
                ado_ui::Node::Text("c hi".to_string()),
                ado_ui::Node::Markdown("hello".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_engine_missing_script() {
        let dir = tempfile::TempDir::new().unwrap();

        let err = load_engine(dir.path(), &AppConfig::default()).err().unwrap();

        assert!(err.to_string().contains("cannot read"));
    }
}
