use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to parse CSS at {line}:{column}: {message}")]
    CssParse {
        message: String,
        line: u32,
        column: u32,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid filter pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type TransformResult<T> = std::result::Result<T, TransformError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
