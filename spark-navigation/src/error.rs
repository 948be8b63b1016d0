use thiserror::Error;

/// Errors raised at the fallible edges of the navigation engine.
///
/// Classification and arbitration never fail; these only come from loading or
/// validating configuration and from (de)serializing frames.
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = NavigationError::Config("cooldown_ms must be positive".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("cooldown_ms"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NavigationError = io_err.into();
        assert!(matches!(err, NavigationError::Io(_)));
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: NavigationError = json_err.into();
        assert!(matches!(err, NavigationError::Json(_)));
    }
}
