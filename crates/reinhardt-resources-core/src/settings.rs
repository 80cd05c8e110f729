//! Resource settings
//!
//! Loaded from TOML:
//!
//! ```toml
//! max_depth = 3
//! integrations = ["orm"]
//! disabled_integrations = []
//!
//! [export]
//! remove_nulls = true
//! remove_nested_types_fields = false
//! indent = 2
//! ```

use crate::error::{ResourceError, ResourceResult};
use crate::exporter::ExportOptions;
use crate::resolver::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
	/// Recursion bound for nested object expansion
	pub max_depth: usize,
	/// Integrations to use; all registered ones when absent
	#[serde(skip_serializing_if = "Option::is_none")]
	pub integrations: Option<Vec<String>>,
	/// Integrations to leave out
	pub disabled_integrations: Vec<String>,
	pub export: ExportOptions,
}

impl Default for ResourceSettings {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			integrations: None,
			disabled_integrations: Vec::new(),
			export: ExportOptions::default(),
		}
	}
}

impl ResourceSettings {
	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read, parsed or validated.
	pub fn from_file(path: impl AsRef<Path>) -> ResourceResult<Self> {
		let content = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Parse settings from a TOML string.
	pub fn from_toml_str(content: &str) -> ResourceResult<Self> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Rejects integrations that are both enabled and disabled
	pub fn validate(&self) -> ResourceResult<()> {
		if let Some(enabled) = &self.integrations
			&& let Some(conflict) = enabled
				.iter()
				.find(|name| self.disabled_integrations.contains(name))
		{
			return Err(ResourceError::Settings(format!(
				"integration `{}` is both enabled and disabled",
				conflict
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = ResourceSettings::from_toml_str("").unwrap();

		assert_eq!(settings, ResourceSettings::default());
		assert_eq!(settings.max_depth, 2);
		assert_eq!(settings.export.indent, 2);
	}

	#[rstest]
	fn test_full_document() {
		// Arrange
		let content = r#"
max_depth = 4
integrations = ["orm"]
disabled_integrations = ["legacy"]

[export]
remove_nulls = true
indent = 0
"#;

		// Act
		let settings = ResourceSettings::from_toml_str(content).unwrap();

		// Assert
		assert_eq!(settings.max_depth, 4);
		assert_eq!(settings.integrations, Some(vec!["orm".to_string()]));
		assert_eq!(settings.disabled_integrations, ["legacy"]);
		assert!(settings.export.remove_nulls);
		assert!(!settings.export.remove_nested_types_fields);
		assert_eq!(settings.export.indent, 0);
	}

	#[rstest]
	fn test_conflicting_integrations() {
		let content = "integrations = [\"orm\"]\ndisabled_integrations = [\"orm\"]\n";

		let result = ResourceSettings::from_toml_str(content);

		assert!(matches!(result, Err(ResourceError::Settings(message)) if message.contains("orm")));
	}

	#[rstest]
	fn test_invalid_toml() {
		let result = ResourceSettings::from_toml_str("max_depth = \"deep\"");
		assert!(matches!(result, Err(ResourceError::Toml(_))));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "max_depth = 1").unwrap();

		let settings = ResourceSettings::from_file(file.path()).unwrap();

		assert_eq!(settings.max_depth, 1);
	}

	#[rstest]
	fn test_missing_file() {
		let result = ResourceSettings::from_file("/nonexistent/resources.toml");
		assert!(matches!(result, Err(ResourceError::Io(_))));
	}
}
