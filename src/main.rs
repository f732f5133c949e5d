mod app;
mod command;
mod config;
mod consts;
mod game;
mod leaderboard;
mod name_entry;
mod util;
mod warning;
use crate::app::App;
use crate::config::{Config, LoggingConfig};
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::any::Any;
use std::io::{self, ErrorKind};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const USAGE: &str = concat!(
    "Usage: neonsnake [-c|--config <file>]\n",
    "\n",
    "Play a neon snake game in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>  Read configuration from the given file\n",
    "  -h, --help           Display this help message and exit\n",
    "  -V, --version        Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config })
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run { config }) => match run(config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = ?e, "Fatal error");
                eprintln!("neonsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("neonsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (path, allow_missing) = match config_path {
        Some(path) => (Some(path), false),
        None => (Config::default_path().ok(), true),
    };
    let config = match path {
        Some(path) => Config::load(&path, allow_missing).with_context(|| {
            format!("failed to load configuration from {}", path.display())
        })?,
        None => Config::default(),
    };
    init_logging(&config.logging).context("failed to set up logging")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        board = ?config.board,
        leaderboard = ?config.leaderboard_store().path(),
        "Starting neonsnake"
    );
    let app = App::new(config.globals());
    let terminal = ratatui::init();
    let r = catch_unwind(AssertUnwindSafe(|| app.run(terminal)));
    ratatui::restore();
    match r {
        Ok(r) => io_exit(r),
        Err(payload) => Err(anyhow::anyhow!(
            "game panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

/// Send log events to the configured log file.  Logging never goes to the
/// terminal, which is owned by the game while it runs.
fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    if !cfg.enabled {
        return Ok(());
    }
    let path = cfg
        .file()
        .context("failed to determine path to local data directory")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let filter = EnvFilter::builder()
        .with_default_directive(cfg.level.into())
        .from_env()
        .context("invalid RUST_LOG value")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()?;
    Ok(())
}

fn io_exit(r: io::Result<()>) -> anyhow::Result<()> {
    match r {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(anyhow::Error::new(e).context("terminal I/O failed")),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown cause"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Arguments, lexopt::Error> {
        Arguments::from_parser(Parser::from_iter(
            std::iter::once("neonsnake").chain(args.iter().copied()),
        ))
    }

    #[rstest]
    #[case(&[], Arguments::Run { config: None })]
    #[case(&["-c", "snake.toml"], Arguments::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["--config=snake.toml"], Arguments::Run { config: Some(PathBuf::from("snake.toml")) })]
    #[case(&["--config", "a.toml", "-c", "b.toml"], Arguments::Run { config: Some(PathBuf::from("b.toml")) })]
    #[case(&["-h"], Arguments::Help)]
    #[case(&["--help", "--bogus"], Arguments::Help)]
    #[case(&["-V"], Arguments::Version)]
    #[case(&["--version"], Arguments::Version)]
    fn test_parse_args(#[case] args: &[&str], #[case] parsed: Arguments) {
        assert_eq!(parse(args).unwrap(), parsed);
    }

    #[rstest]
    #[case(&["--bogus"])]
    #[case(&["-c"])]
    #[case(&["extra"])]
    fn test_bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn broken_pipe_is_success() {
        assert!(io_exit(Err(io::Error::from(ErrorKind::BrokenPipe))).is_ok());
        assert!(io_exit(Err(io::Error::from(ErrorKind::Other))).is_err());
    }

    #[test]
    fn test_panic_message() {
        let payload = catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let n = 42;
        let payload = catch_unwind(|| panic!("bad {n}")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "bad 42");
    }
}
