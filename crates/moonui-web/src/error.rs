//! Mount errors.

use moonui_shell::ConfigError;

/// Errors that stop the shell from mounting on a page.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("No window available")]
    NoWindow,

    #[error("No document available")]
    NoDocument,

    #[error("Missing element #{0}")]
    MissingElement(&'static str),

    #[error("Invalid shell config: {0}")]
    Config(#[from] ConfigError),

    #[error("DOM call failed: {0}")]
    Dom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_missing_element() {
        let err = MountError::MissingElement("moonui-panel");
        assert_eq!(err.to_string(), "Missing element #moonui-panel");
    }

    #[test]
    fn wraps_config_errors() {
        let err: MountError = ConfigError::EmptyScrollKey.into();
        assert!(err.to_string().starts_with("Invalid shell config"));
    }
}
