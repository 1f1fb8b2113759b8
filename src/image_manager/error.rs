use super::validation::ValidationError;
use thiserror::Error;

/// Message shown to the user when the image service can't be reached.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not reach the image service, please try again.";

/// Errors surfaced by the image collection manager.
///
/// None of them are fatal: the manager stays usable and the same action can
/// be retried.
#[derive(Debug, Error)]
pub enum ImageManagerError {
    #[error("Invalid image: {0}")]
    Validation(#[from] ValidationError),

    #[error("Image service rejected the request: {0}")]
    Remote(String),

    #[error("Transport error: {0:#}")]
    Transport(#[from] anyhow::Error),
}

impl ImageManagerError {
    /// Text to show in the blocking notification.
    pub fn user_message(&self) -> String {
        match self {
            ImageManagerError::Validation(err) => err.to_string(),
            ImageManagerError::Remote(message) => message.clone(),
            ImageManagerError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err: ImageManagerError = ValidationError::EmptyField { field: "url" }.into();
        assert_eq!(err.user_message(), "Field 'url' is required but was empty");

        let err = ImageManagerError::Remote("Part not found: p-9".to_string());
        assert_eq!(err.user_message(), "Part not found: p-9");

        let err: ImageManagerError = anyhow::anyhow!("connection refused").into();
        assert_eq!(err.user_message(), TRANSPORT_FAILURE_MESSAGE);
        assert!(err.to_string().contains("connection refused"));
    }
}
