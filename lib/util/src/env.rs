use std::{fmt::Debug, path::PathBuf};

use serde::de::DeserializeOwned;

/// An error we encounter when loading config from the environment.
#[derive(Debug, thiserror::Error)]
pub enum EnvLoadError {
	#[error("io error while loading env file")]
	IoError(#[from] std::io::Error),

	#[error("error reading environment variable")]
	VarError(#[from] std::env::VarError),

	#[error("error parsing line in env file")]
	LineParse(String, usize),

	#[error("error loading config from environment")]
	Other(#[from] envy::Error),

	#[error("missing required value `{0}`")]
	MissingValue(String),

	#[error("could not parse value for `{key}`")]
	OtherParseError { key: String },
}

impl From<dotenvy::Error> for EnvLoadError {
	fn from(value: dotenvy::Error) -> Self {
		match value {
			dotenvy::Error::Io(e) => Self::IoError(e),
			dotenvy::Error::LineParse(s, i) => Self::LineParse(s, i),
			other => Self::OtherParseError {
				key: other.to_string(),
			},
		}
	}
}

/// The result of trying to load a `.env` file.
pub enum LoadedEnv<T> {
	/// We found and parsed a `.env` file at `path`.
	FoundFile { config: T, path: PathBuf },

	/// No `.env` file was found; config was built from process env vars only.
	OnlyVars(T),
}

impl<T> LoadedEnv<T> {
	pub fn get_config(&self) -> &T {
		match self {
			Self::FoundFile { config, .. } => config,
			Self::OnlyVars(config) => config,
		}
	}
}

/// Load `T` from a `.env` file (if one exists) plus the process environment.
/// Vars already set in the environment take priority over the file.
pub fn load_env<T: DeserializeOwned + Debug>() -> Result<LoadedEnv<T>, EnvLoadError> {
	let res = match dotenvy::dotenv() {
		Ok(path) => LoadedEnv::FoundFile {
			config: envy::from_env::<T>()?,
			path,
		},

		Err(dotenvy::Error::Io(_)) => LoadedEnv::OnlyVars(envy::from_env::<T>()?),

		Err(e) => return Err(e.into()),
	};

	Ok(res)
}
