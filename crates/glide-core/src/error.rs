use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing DOM anchor: {0}")]
    MissingAnchor(String),

    #[error("Browser capability unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid attribute {name}={value:?}")]
    InvalidAttribute { name: String, value: String },

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Missing anchors and absent capabilities are expected on some pages
    /// and never count as faults.
    pub fn is_benign(&self) -> bool {
        matches!(self, Error::MissingAnchor(_) | Error::Unavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_errors() {
        assert!(Error::MissingAnchor(".main-nav".into()).is_benign());
        assert!(Error::Unavailable("IntersectionObserver".into()).is_benign());
        assert!(!Error::Dom("boom".into()).is_benign());
    }

    #[test]
    fn test_invalid_attribute_message() {
        let err = Error::InvalidAttribute {
            name: "data-count".into(),
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "Invalid attribute data-count=\"abc\"");
    }
}
