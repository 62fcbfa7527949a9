//! Reading of the optional settings file.

use std::fs::File;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::settings::Settings;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Loads launcher settings from a YAML file.
///
/// A file that doesn't exist is not an error: the launcher runs on defaults.
/// An empty file is treated the same way.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The YAML is malformed or doesn't match the expected structure
///
/// # Examples
///
/// ```no_run
/// use script_menu_core::file_handling::get_settings;
///
/// let settings = get_settings("/home/ops/.script-menu/settings.yml")?;
/// println!("Root: {:?}", settings.root);
/// # Ok::<(), script_menu_core::error::Error>(())
/// ```
pub fn get_settings(settings_path: &str) -> Result<Settings> {
    if !Path::new(settings_path).exists() {
        debug!("No settings file at `{settings_path}`, using defaults");
        return Ok(Settings::default());
    }

    let settings_reader = get_reader("settings", settings_path)?;

    // This can't be shortcut with ? as serde wants to deserialize the error
    let parsing_result: serde_yaml::Result<Option<Settings>> =
        serde_yaml::from_reader(settings_reader);

    match parsing_result {
        Ok(settings) => Ok(settings.unwrap_or_default()),
        Err(e) => Err(Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            settings_path.to_string(),
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_settings_file_not_exists() {
        let result = get_settings("/this/path/does/not/exist.yml").unwrap();
        assert_eq!(result, Settings::default());
    }

    #[test]
    fn test_get_settings_valid_yaml() {
        let yaml_content = r#"
root: "/srv/scripts"
extension: "sh"
utility_path: "/srv/scripts/Utilities/Prompts.sh"
echo_output: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml_content).unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let settings = get_settings(temp_path).unwrap();
        assert_eq!(settings.root, Some("/srv/scripts".to_string()));
        assert_eq!(settings.extension, Some("sh".to_string()));
        assert_eq!(settings.echo_output, Some(false));
        assert!(settings.capture.is_none());
    }

    #[test]
    fn test_get_settings_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let settings = get_settings(temp_path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_get_settings_invalid_yaml() {
        let yaml_content = "root: [unterminated";

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml_content).unwrap();
        let temp_path = temp_file.path().to_str().unwrap();

        let result = get_settings(temp_path);
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }
}
