use clap::{error::ErrorKind, Command, CommandFactory, FromArgMatches, Parser};
use crossterm::{
    cursor::Show,
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use env_logger::Env;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdin, Write},
    panic,
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use termitype::{
    app_dirs::AppDirs,
    config::{Config, DEFAULT_LANGUAGE, DEFAULT_WORD_COUNT},
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::TestSession,
    ui::{self, SessionView},
    word_generator::{target_text, WordGenerator},
    TermitypeError,
};

const TICK_RATE_MS: u64 = 100;

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a list of random words from a language file and get live words-per-minute and accuracy as you go."
)]
pub struct Cli {
    /// language to pull words from
    #[clap(short = 'l', long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// number of words to use in test
    #[clap(
        short = 'w',
        long = "words",
        default_value_t = DEFAULT_WORD_COUNT as i64,
        allow_negative_numbers = true
    )]
    number_of_words: i64,

    /// list all available languages and exit
    #[clap(long)]
    list_languages: bool,

    /// directory containing language json files (default: ./languages, then the user data dir, then built-in)
    #[clap(short = 'd', long)]
    languages_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = parse_cli();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            if let TermitypeError::LanguageNotFound { .. } = err {
                eprintln!("{}", "Use --list-languages to see all available languages.".yellow());
            }
            ExitCode::FAILURE
        }
    }
}

/// Parse the command line. `--help` also lists the languages found in the
/// default language source.
fn parse_cli() -> Cli {
    let matches = match Cli::command().try_get_matches() {
        Ok(matches) => matches,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            with_language_help(Cli::command()).get_matches()
        }
        Err(err) => err.exit(),
    };

    Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

fn with_language_help(cmd: Command) -> Command {
    match AppDirs::language_source(None).load() {
        Ok(catalog) => cmd.after_help(format!("Available languages: {}", catalog.list().join(", "))),
        Err(_) => cmd,
    }
}

fn run(cli: Cli) -> Result<(), TermitypeError> {
    if cli.list_languages {
        let catalog = AppDirs::language_source(cli.languages_dir.as_deref()).load()?;
        ui::write_language_list(&mut io::stdout().lock(), &catalog)?;
        return Ok(());
    }

    let config = Config::new(cli.language, cli.number_of_words, cli.languages_dir)?;
    let catalog = config.load_catalog()?;
    let language = catalog.find(&config.language)?;
    let words = WordGenerator::new().generate(language, config.number_of_words)?;
    let mut session = TestSession::new(target_text(&words));

    if !stdin().is_tty() {
        return Err(TermitypeError::NotATty);
    }

    run_session(&mut session, &language.name)?;
    ui::write_results(&mut io::stdout().lock(), &session, &language.name)?;

    Ok(())
}

/// Take over the terminal and drive the session until it finishes.
///
/// The terminal is restored on every exit path, including panics. The first
/// error wins.
fn run_session(session: &mut TestSession, language: &str) -> io::Result<()> {
    install_panic_hook();
    enable_raw_mode()?;

    let result = execute!(io::stdout(), EnterAlternateScreen)
        .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())))
        .and_then(|mut terminal| {
            let runner = Runner::new(
                CrosstermEventSource::new(),
                FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
            );
            runner.drive(session, |session, now| {
                terminal
                    .draw(|f| f.render_widget(SessionView::new(session, language, now), f.area()))
                    .map(|_| ())
            })
        });

    result.and(restore_terminal(&mut io::stdout()))
}

/// Leave raw mode and the alternate screen. Every step runs even if an
/// earlier one failed.
fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw.and(screen)
}

fn install_panic_hook() {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal(&mut io::stdout());
        hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["termitype"]);

        assert_eq!(cli.language, "english");
        assert_eq!(cli.number_of_words, 25);
        assert!(!cli.list_languages);
        assert_eq!(cli.languages_dir, None);
    }

    #[test]
    fn test_cli_number_of_words() {
        let cli = Cli::parse_from(["termitype", "-w", "40"]);
        assert_eq!(cli.number_of_words, 40);

        let cli = Cli::parse_from(["termitype", "--words", "50"]);
        assert_eq!(cli.number_of_words, 50);
    }

    #[test]
    fn test_cli_negative_words_reach_validation() {
        let cli = Cli::parse_from(["termitype", "-w", "-3"]);
        assert_eq!(cli.number_of_words, -3);
    }

    #[test]
    fn test_cli_non_numeric_words_rejected() {
        let err = Cli::try_parse_from(["termitype", "-w", "lots"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_language() {
        let cli = Cli::parse_from(["termitype", "-l", "german"]);
        assert_eq!(cli.language, "german");

        let cli = Cli::parse_from(["termitype", "--language", "spanish"]);
        assert_eq!(cli.language, "spanish");
    }

    #[test]
    fn test_cli_list_languages_and_dir() {
        let cli = Cli::parse_from(["termitype", "--list-languages", "-d", "langs"]);
        assert!(cli.list_languages);
        assert_eq!(cli.languages_dir, Some(PathBuf::from("langs")));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_lists_available_languages() {
        let help = with_language_help(Cli::command())
            .render_long_help()
            .to_string();

        assert!(help.contains("Available languages:"));
        assert!(help.contains("english"));
    }

    #[test]
    fn test_restore_terminal_leaves_alternate_screen() {
        let mut out = Vec::new();

        restore_terminal(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn test_run_rejects_invalid_word_count() {
        let cli = Cli::parse_from(["termitype", "-w", "0"]);
        assert!(matches!(run(cli), Err(TermitypeError::InvalidWordCount(0))));
    }

    #[test]
    fn test_run_rejects_unknown_language() {
        let cli = Cli::parse_from(["termitype", "-l", "klingon"]);
        assert!(matches!(
            run(cli),
            Err(TermitypeError::LanguageNotFound { .. })
        ));
    }
}
