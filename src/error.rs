use thiserror::Error;

/// User-facing errors.
#[derive(Error, Debug)]
pub enum NexusError {
    #[error("nexustools config error: {0}")]
    Config(String),

    #[error("invalid JSON at line {line}, column {column}: {message}")]
    JsonParse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid regex: {0}")]
    RegexCompile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, NexusError>;
