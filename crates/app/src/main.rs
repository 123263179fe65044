use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{Category, QuestionBank};
use quiz_core::quiz::FEEDBACK_DELAY_MS;
use services::{AppServices, Clock, QuizOptions};
use storage::{FsSource, HttpSource, QuestionSource};
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDelay { raw: String },
    InvalidSeed { raw: String },
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDelay { raw } => {
                write!(f, "invalid --feedback-delay-ms value: {raw}")
            }
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
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
    services: Arc<AppServices>,
}

impl UiApp for DesktopApp {
    fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [options]   # default");
    eprintln!("  cargo run -p app -- check [options]   # load datasets and report issues");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data-dir <path>          dataset directory (default: {DEFAULT_DATA_DIR})");
    eprintln!("  --base-url <url>           fetch datasets over HTTP instead");
    eprintln!("  --feedback-delay-ms <n>    feedback display time (default: {FEEDBACK_DELAY_MS})");
    eprintln!("  --seed <u64>               repeatable fallback feedback");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR, QUIZ_BASE_URL, QUIZ_FEEDBACK_DELAY_MS, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceChoice {
    Dir(PathBuf),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    source: SourceChoice,
    feedback_delay: Duration,
    seed: Option<u64>,
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut data_dir = env("QUIZ_DATA_DIR").filter(|value| !value.trim().is_empty());
        let mut base_url = env("QUIZ_BASE_URL").filter(|value| !value.trim().is_empty());
        let mut feedback_delay = match env("QUIZ_FEEDBACK_DELAY_MS") {
            Some(raw) => parse_delay(&raw)?,
            None => Duration::from_millis(FEEDBACK_DELAY_MS),
        };
        let mut seed = env("QUIZ_SEED").map(|raw| parse_seed(&raw)).transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    data_dir = Some(require_value(args, "--data-dir")?);
                    base_url = None;
                }
                "--base-url" => base_url = Some(require_value(args, "--base-url")?),
                "--feedback-delay-ms" => {
                    feedback_delay = parse_delay(&require_value(args, "--feedback-delay-ms")?)?;
                }
                "--seed" => seed = Some(parse_seed(&require_value(args, "--seed")?)?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let source = match base_url {
            Some(url) => SourceChoice::Url(url),
            None => SourceChoice::Dir(PathBuf::from(
                data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            )),
        };
        Ok(Self {
            source,
            feedback_delay,
            seed,
        })
    }

    fn question_source(&self) -> Arc<dyn QuestionSource> {
        match &self.source {
            SourceChoice::Dir(dir) => Arc::new(FsSource::new(dir.clone())),
            SourceChoice::Url(url) => Arc::new(HttpSource::new(url.clone())),
        }
    }

    fn options(&self) -> QuizOptions {
        QuizOptions {
            clock: Clock::default_clock(),
            feedback_delay: self.feedback_delay,
            seed: self.seed,
        }
    }
}

fn parse_delay(raw: &str) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidDelay {
            raw: raw.to_string(),
        })
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed {
        raw: raw.to_string(),
    })
}

fn init_tracing() {
    // Logs go to stderr so `check` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(bank: &QuestionBank, services: &AppServices) {
    let source = services.loader().source().clone();
    for category in Category::ALL {
        println!(
            "{category}: {} question(s) from {}",
            bank.len(category),
            source.describe(category)
        );
    }

    let issues = bank.issues();
    if issues.is_empty() {
        println!("no record issues");
        return;
    }
    println!("{} record issue(s):", issues.len());
    for report in issues {
        println!(
            "  {} row {} ({}): {}",
            report.category, report.row, report.question_id, report.issue
        );
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    info!(source = ?parsed.source, delay_ms = parsed.feedback_delay.as_millis(), "starting");

    let services = Arc::new(AppServices::new(
        parsed.question_source(),
        parsed.options(),
        Handle::current(),
    ));

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // Some dev setups default to an always-on-top window; keep it a normal one.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Knowledge Trail")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            let bank = services.load_questions().await?;
            print_report(&bank, &services);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter, |key| {
            env.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn defaults_read_local_data_dir() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.source, SourceChoice::Dir(PathBuf::from("data")));
        assert_eq!(args.feedback_delay, Duration::from_millis(5_000));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn env_values_apply_without_flags() {
        let args = parse(
            &[],
            &[
                ("QUIZ_BASE_URL", "https://quiz.example/data"),
                ("QUIZ_FEEDBACK_DELAY_MS", "250"),
                ("QUIZ_SEED", "42"),
            ],
        )
        .unwrap();
        assert_eq!(
            args.source,
            SourceChoice::Url("https://quiz.example/data".into())
        );
        assert_eq!(args.feedback_delay, Duration::from_millis(250));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn flags_override_env() {
        let args = parse(
            &["--data-dir", "fixtures", "--seed", "7"],
            &[("QUIZ_BASE_URL", "https://quiz.example"), ("QUIZ_SEED", "1")],
        )
        .unwrap();
        assert_eq!(args.source, SourceChoice::Dir(PathBuf::from("fixtures")));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(&["--feedback-delay-ms", "soon"], &[]),
            Err(ArgsError::InvalidDelay { .. })
        ));
        assert!(matches!(
            parse(&["--seed"], &[]),
            Err(ArgsError::MissingValue { flag: "--seed" })
        ));
        assert!(matches!(
            parse(&["--verbose"], &[]),
            Err(ArgsError::UnknownArg(_))
        ));
    }
}
