#![cfg(feature = "std")]

use std::env;
use std::sync::OnceLock;
use std::time::Instant;

use log::{self, Level, LevelFilter, Metadata, Record};

/// Per-target log levels parsed from a directive list such as
/// `warn,broadside::ai=debug`.
///
/// A bare level sets the default. `target=level` applies to that target and
/// every module below it; the longest matching target wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    default: LevelFilter,
    directives: Vec<(String, LevelFilter)>,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            default: LevelFilter::Info,
            directives: Vec::new(),
        }
    }
}

impl LogFilter {
    /// Parse a comma separated directive list. Entries that do not parse are
    /// skipped.
    pub fn parse(list: &str) -> Self {
        let mut filter = Self::default();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((target, level)) => {
                    if let Ok(level) = level.trim().parse() {
                        filter.directives.push((target.trim().to_string(), level));
                    }
                }
                None => {
                    if let Ok(level) = entry.parse() {
                        filter.default = level;
                    }
                }
            }
        }
        filter
    }

    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.level_for(target)
    }

    fn level_for(&self, target: &str) -> LevelFilter {
        self.directives
            .iter()
            .filter(|(prefix, _)| {
                target == prefix
                    || (target.starts_with(prefix.as_str())
                        && target[prefix.len()..].starts_with("::"))
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(self.default, |(_, level)| *level)
    }

    /// Most verbose level any target can reach.
    pub fn max_level(&self) -> LevelFilter {
        self.directives
            .iter()
            .map(|(_, level)| *level)
            .fold(self.default, Ord::max)
    }
}

struct StderrLogger {
    filter: LogFilter,
    started: Instant,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata.target(), metadata.level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let elapsed = self.started.elapsed();
            eprintln!(
                "{:>4}.{:03} {:<5} {}: {}",
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Initialize logging from the `BROADSIDE_LOG` environment variable, parsed
/// as a [`LogFilter`]. Defaults to `info` everywhere. Output goes to stderr,
/// stamped with seconds since initialization, so it never mixes with
/// simulation results on stdout.
pub fn init_logging() {
    let filter = env::var("BROADSIDE_LOG")
        .map(|list| LogFilter::parse(&list))
        .unwrap_or_default();
    let max = filter.max_level();
    let logger = LOGGER.get_or_init(|| StderrLogger {
        filter,
        started: Instant::now(),
    });
    let _ = log::set_logger(logger).map(|()| log::set_max_level(max));
}
