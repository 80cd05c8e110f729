//! Error types for resource resolution.
//!
//! Resolution itself is best-effort and never fails; these errors surface from
//! integrations (as the [`ResourceError::HiddenField`] control signal), from
//! integration discovery, and from the entry points that read settings or
//! schema documents.

use thiserror::Error;

/// Errors that can occur while building or exporting resources.
#[derive(Debug, Error)]
pub enum ResourceError {
	/// Control signal: the field must be excluded from the resolved tree.
	///
	/// Raised by integrations and caught at the field resolution boundary.
	#[error("Field is hidden")]
	HiddenField,

	/// An integration failed to initialize during discovery.
	#[error("Integration registration failed: {name}: {message}")]
	IntegrationRegistration {
		/// Integration name, if known.
		name: String,
		/// Failure description.
		message: String,
	},

	/// A type name is not declared in the schema.
	#[error("Unknown type: {0}")]
	UnknownType(String),

	/// An explicit object kind was requested for a field whose type is not an
	/// object or input type.
	#[error("Invalid object kind for field {field}: {type_name} is not an object type")]
	InvalidObjectKind {
		/// API-facing field name.
		field: String,
		/// Description of the offending leaf type.
		type_name: String,
	},

	/// Invalid settings value.
	#[error("Settings error: {0}")]
	Settings(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// TOML settings parse error.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl ResourceError {
	/// Returns true if this is the hidden field signal.
	pub fn is_hidden(&self) -> bool {
		matches!(self, ResourceError::HiddenField)
	}
}

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_hidden_field_is_hidden() {
		assert!(ResourceError::HiddenField.is_hidden());
		assert!(!ResourceError::UnknownType("User".to_string()).is_hidden());
	}

	#[rstest]
	fn test_registration_error_display() {
		let error = ResourceError::IntegrationRegistration {
			name: "orm".to_string(),
			message: "model registry unavailable".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Integration registration failed: orm: model registry unavailable"
		);
	}

	#[rstest]
	fn test_json_error_from() {
		let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
		let error: ResourceError = json_error.into();
		assert!(matches!(error, ResourceError::Json(_)));
	}
}
