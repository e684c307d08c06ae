use rand::rngs::OsRng;
use rand::RngCore;

use crate::auth::application::ports::outgoing::token_issuer::{TokenIssueError, TokenIssuer};

pub const TOKEN_BYTES: usize = 32;

/// 32 bytes from the operating system CSPRNG, lowercase hex (64 chars).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenIssuer;

impl TokenIssuer for RandomTokenIssuer {
    fn issue(&self) -> Result<String, TokenIssueError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenIssueError(e.to_string()))?;

        Ok(hex::encode(bytes))
    }
}
