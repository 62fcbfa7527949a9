use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("The starting directory `{}` does not exist or is not a directory.", .0)]
    MissingRoot(String),

    #[error("Unable to capture terminal output: {}", .0)]
    Capture(String),

    #[error("Unknown capture backend: \"{}\" (expected `pty` or `script`)", .0)]
    UnknownCaptureBackend(String),

    #[error("Error with sub process: {}", .0)]
    SubProcess(#[from] std::io::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn capture_error(context: &str, original: impl std::fmt::Display) -> Self {
        Self::Capture(format!("{context}: {original}"))
    }
}
