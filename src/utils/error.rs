use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevxError {
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown configuration key: {key}")]
    UnknownConfigKey { key: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("Command '{command}' failed: {message}")]
    Process { command: String, message: String },

    #[error("Invalid command tree: {message}")]
    InvalidTree { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DevxError>;

impl DevxError {
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn process(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Process {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
