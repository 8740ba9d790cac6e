//! Console logging with a multiline format that wraps to the terminal.

use {
    anyhow::Result,
    flexi_logger::{DeferredNow, Logger, LoggerHandle, Record},
    regex::Regex,
    std::{
        borrow::Cow,
        fmt::Write as FmtWrite,
        sync::{Once, OnceLock},
    },
    textwrap::{termwidth, Options},
};

/// The running logger. Dropping the handle would stop logging, so it lives
/// for the rest of the program.
static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

static INIT: Once = Once::new();

/// Matches the last wrapped line so it can be closed with a different glyph.
static LAST_LINE_MATCHER: OnceLock<Option<Regex>> = OnceLock::new();

/// Setup console logging for this application.
///
/// The level is read from RUST_LOG and defaults to `info`. Only the first
/// call does anything, every later call returns `Ok(())`.
pub fn setup() -> Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = start_logger();
    });
    result
}

fn start_logger() -> Result<()> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(multiline_format)
        .start()?;
    let _ = LOGGER_HANDLE.set(handle);

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );
    Ok(())
}

/// A multiline log format for flexi_logger.
///
/// Logs are automatically wrapped at terminal width and prefixed with unicode
/// so it's easy to tell where a big log statement begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let size = termwidth().min(74);
    let wrap_options = Options::new(size)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");

    let mut full_line = String::new();
    writeln!(
        full_line,
        "{} [{}] [{}:{}]",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    )
    .map_err(std::io::Error::other)?;
    write!(&mut full_line, "{}", &record.args())
        .map_err(std::io::Error::other)?;

    let wrapped = textwrap::fill(&full_line, wrap_options);
    let formatted = match last_line_matcher() {
        Some(matcher) => matcher.replace(&wrapped, "┗$2"),
        None => Cow::Borrowed(wrapped.as_str()),
    };

    writeln!(w, "{}", formatted)
}

fn last_line_matcher() -> Option<&'static Regex> {
    LAST_LINE_MATCHER
        .get_or_init(|| Regex::new(r"(┃)(.*)$").ok())
        .as_ref()
}
