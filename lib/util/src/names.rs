/// An error produced when a name (node id, port name, node type, ...) is invalid.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
	#[error("name is empty")]
	Empty,

	#[error("name is entirely whitespace")]
	IsWhitespace,

	#[error("name has leading or trailing whitespace")]
	TrimWhitespace,
}

/// Check that `name` is non-empty and has no leading/trailing whitespace.
pub fn check_name(name: &str) -> Result<(), NameError> {
	if name.is_empty() {
		return Err(NameError::Empty);
	}

	if name.trim().is_empty() {
		return Err(NameError::IsWhitespace);
	}

	if name.trim() != name {
		return Err(NameError::TrimWhitespace);
	}

	Ok(())
}
