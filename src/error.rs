use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovcheckError {
    #[error("unknown checklist kind: {0}")]
    UnknownChecklist(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("transcript path does not exist: {0}")]
    PathNotFound(String),

    #[error("topic signal parse error: {0}")]
    TopicParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CovcheckError>;
