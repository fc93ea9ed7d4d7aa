use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, QuizLoopService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_QUESTIONS: &str = "questions.json";
const DEFAULT_LOG: &str = "info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    questions: String,
    log: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--questions <path-or-url>] [--log <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions {DEFAULT_QUESTIONS}");
    eprintln!("  --log {DEFAULT_LOG}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS, QUIZ_LOG");
}

impl Args {
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut questions = env("QUIZ_QUESTIONS")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUESTIONS.to_string());
        let mut log = env("QUIZ_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => questions = require_value(&mut args, "--questions")?,
                "--log" => log = require_value(&mut args, "--log")?,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { questions, log }))
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG)))
        .init();
}

fn main() {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok());
    let args = match parsed {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return;
        }
        Err(err) => {
            // At this layer (binary glue), printing once is fine.
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };

    init_tracing(&args.log);
    tracing::info!(questions = %args.questions, "starting quiz");

    let storage = Storage::from_location(&args.questions);
    let quiz_loop = Arc::new(QuizLoopService::new(Clock::system(), storage.questions));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    // Some dev setups default tao windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_args() {
        let parsed = Args::parse(argv(&[]), no_env).unwrap();
        assert_eq!(
            parsed,
            Parsed::Run(Args {
                questions: DEFAULT_QUESTIONS.to_string(),
                log: DEFAULT_LOG.to_string(),
            })
        );
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            "QUIZ_QUESTIONS" => Some("env.json".to_string()),
            "QUIZ_LOG" => Some("debug".to_string()),
            _ => None,
        };
        let Parsed::Run(args) = Args::parse(argv(&[]), env).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(args.questions, "env.json");
        assert_eq!(args.log, "debug");

        let Parsed::Run(args) =
            Args::parse(argv(&["--questions", "https://example.com/q.json"]), env).unwrap()
        else {
            panic!("expected run");
        };
        assert_eq!(args.questions, "https://example.com/q.json");
        assert_eq!(args.log, "debug");
    }

    #[test]
    fn rejects_unknown_and_missing_values() {
        assert!(matches!(
            Args::parse(argv(&["--deck"]), no_env),
            Err(ArgsError::UnknownArg(arg)) if arg == "--deck"
        ));
        assert!(matches!(
            Args::parse(argv(&["--questions"]), no_env),
            Err(ArgsError::MissingValue { flag: "--questions" })
        ));
        assert!(matches!(
            Args::parse(argv(&["--log", " "]), no_env),
            Err(ArgsError::EmptyValue { flag: "--log" })
        ));
        assert_eq!(Args::parse(argv(&["-h"]), no_env).unwrap(), Parsed::Help);
    }
}
