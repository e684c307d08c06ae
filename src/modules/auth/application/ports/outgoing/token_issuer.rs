#[derive(Debug, Clone, thiserror::Error)]
#[error("Could not generate verification token: {0}")]
pub struct TokenIssueError(pub String);

/// Opaque verification tokens. Uniqueness is probabilistic.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self) -> Result<String, TokenIssueError>;
}
