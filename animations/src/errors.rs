use thiserror::Error;

/// Ways that fetching or decoding an animation table can fail. All of these
/// are recoverable; a failed character just renders placeholder poses until
/// a retry lands.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error(transparent)]
    Client(ureq::Error),

    #[error(transparent)]
    IO(std::io::Error),

    #[error(transparent)]
    Parse(serde_json::Error),
}
