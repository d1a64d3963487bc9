use std::fmt::Display;

use tracing_subscriber::EnvFilter;

/// A single log level, as configured per-module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
	Trace,
	Debug,
	Info,
	Warn,
	Error,
}

impl Display for LogLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Self::Trace => "trace",
			Self::Debug => "debug",
			Self::Info => "info",
			Self::Warn => "warn",
			Self::Error => "error",
		};
		write!(f, "{s}")
	}
}

/// A named logging preset, chosen from config.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub enum LoggingPreset {
	#[default]
	Default,
	Verbose,
	Develop,
	Trace,
}

impl LoggingPreset {
	pub fn get_config(&self) -> LoggingConfig {
		match self {
			Self::Default => LoggingConfig {
				dataflow_engine: LogLevel::Info,
				dataflow_core: LogLevel::Info,
				dataflowd: LogLevel::Info,
				other: LogLevel::Warn,
			},

			Self::Verbose => LoggingConfig {
				dataflow_engine: LogLevel::Debug,
				dataflow_core: LogLevel::Debug,
				dataflowd: LogLevel::Debug,
				other: LogLevel::Info,
			},

			Self::Develop => LoggingConfig {
				dataflow_engine: LogLevel::Trace,
				dataflow_core: LogLevel::Debug,
				dataflowd: LogLevel::Debug,
				other: LogLevel::Info,
			},

			Self::Trace => LoggingConfig {
				dataflow_engine: LogLevel::Trace,
				dataflow_core: LogLevel::Trace,
				dataflowd: LogLevel::Trace,
				other: LogLevel::Trace,
			},
		}
	}
}

/// Per-module log levels, built from a [`LoggingPreset`].
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
	pub dataflow_engine: LogLevel,
	pub dataflow_core: LogLevel,
	pub dataflowd: LogLevel,
	pub other: LogLevel,
}

impl From<LoggingConfig> for EnvFilter {
	fn from(value: LoggingConfig) -> Self {
		EnvFilter::try_new(format!(
			"{},dataflow_engine={},dataflow_core={},dataflowd={}",
			value.other, value.dataflow_engine, value.dataflow_core, value.dataflowd
		))
		.unwrap()
	}
}
