//! Telemetry for query compilation
//!
//! Configurable logging for debugging SQL generation, routed through the
//! `log` facade and gated by the `PARAMSQL_LOG_LEVEL` environment
//! variable:
//!
//! - `off` - no logging (default)
//! - `basic` - compiled SQL and timing only
//! - `detailed` - SQL plus parameter bindings

use std::time::Instant;

use crate::bridge::Query;
use crate::error::QueryError;

/// Log level for compile telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// No logging
    #[default]
    Off,
    /// Basic info: SQL and timing
    Basic,
    /// Detailed: SQL and parameter bindings
    Detailed,
}

impl LogLevel {
    /// Parse from string, defaulting to `Off`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "basic" => Self::Basic,
            "detailed" => Self::Detailed,
            _ => Self::Off,
        }
    }
}

/// Get the current log level from the environment
pub fn log_level() -> LogLevel {
    std::env::var("PARAMSQL_LOG_LEVEL")
        .map(|s| LogLevel::parse(&s))
        .unwrap_or_default()
}

/// Timer measuring one compile pass
pub struct CompileTimer {
    start: Instant,
}

impl CompileTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

/// Log a compiled query according to the configured level
pub fn log_query(query: &Query, timer: &CompileTimer) {
    let level = log_level();
    if level < LogLevel::Basic {
        return;
    }

    // Truncate very long SQL for basic logging
    let sql = if level >= LogLevel::Detailed || query.sql.len() <= 1000 {
        query.sql.clone()
    } else {
        let mut cut = 1000;
        while !query.sql.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &query.sql[..cut])
    };

    log::info!("paramsql: compiled in {}ms: {}", timer.elapsed_ms(), sql);

    if level >= LogLevel::Detailed {
        for (name, value) in query.params.iter() {
            log::info!("paramsql: param :{} = {:?}", name, value);
        }
    }
}

/// Log a failed compile
pub fn log_compile_error(error: &QueryError) {
    if log_level() >= LogLevel::Basic {
        log::warn!("paramsql: compile failed: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::parse("off"), LogLevel::Off);
        assert_eq!(LogLevel::parse("basic"), LogLevel::Basic);
        assert_eq!(LogLevel::parse("DETAILED"), LogLevel::Detailed);
        assert_eq!(LogLevel::parse("invalid"), LogLevel::Off);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Off < LogLevel::Basic);
        assert!(LogLevel::Basic < LogLevel::Detailed);
    }

    #[test]
    fn test_logging_paths_emit_through_installed_logger() {
        use crate::params::ParamBag;
        use crate::value::Value;

        let _ = env_logger::builder().is_test(true).try_init();

        std::env::set_var("PARAMSQL_LOG_LEVEL", "detailed");
        assert_eq!(log_level(), LogLevel::Detailed);

        let mut params = ParamBag::new();
        params.insert("status_0", Value::Str("open".into()));
        let query = Query {
            sql: "SELECT * FROM entries WHERE status = :status_0".into(),
            params,
        };
        log_query(&query, &CompileTimer::start());
        log_compile_error(&QueryError::EmptyCaseExpression);

        // Basic level truncates long SQL; multibyte text must not split
        // a character at the cut
        std::env::set_var("PARAMSQL_LOG_LEVEL", "basic");
        let long = Query {
            sql: "好".repeat(400),
            params: ParamBag::new(),
        };
        log_query(&long, &CompileTimer::start());

        std::env::remove_var("PARAMSQL_LOG_LEVEL");
        assert_eq!(log_level(), LogLevel::Off);
    }

    #[test]
    fn test_compile_timer() {
        let timer = CompileTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.elapsed_ms() >= 5);
    }
}
