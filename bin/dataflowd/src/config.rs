use dataflow_util::logging::LoggingPreset;
use serde::Deserialize;
use smartstring::{LazyCompact, SmartString};

/// Note that the fields of this struct are not capitalized. Envy is
/// case-insensitive, and expects Rust fields to be snake_case.
#[derive(Debug, Clone, Deserialize)]
pub struct DataflowdConfig {
	/// The logging level to run with.
	#[serde(default)]
	pub dataflowd_loglevel: LoggingPreset,

	/// Maximum request body size, in bytes.
	#[serde(default = "DataflowdConfig::default_request_body_limit")]
	pub dataflowd_request_body_limit: usize,

	/// IP and port to bind to. Should look like `127.0.0.1:3030`.
	pub dataflowd_server_addr: SmartString<LazyCompact>,
}

impl DataflowdConfig {
	fn default_request_body_limit() -> usize {
		2_000_000
	}
}
