//! Auth errors

use thiserror::Error;

/// Authorization store errors
///
/// Every variant except `Configuration` and `Internal` is a caller mistake and
/// maps to a 4xx status. `InvalidCredentials` deliberately covers unknown
/// identities, wrong passwords and unknown tokens alike.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Invite code is not outstanding (never issued, consumed or revoked)
    #[error("invalid invite code")]
    InvalidInviteCode,

    /// Sign-up for an identity that already has credentials
    #[error("identity already exists")]
    IdentityExists,

    /// Password fails the length policy
    #[error("password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    /// Unknown identity, wrong password, or token not active for the identity
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Caller is not the administrator or holds no active administrator session
    #[error("unauthorized")]
    Unauthorized,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error (hasher failure)
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInviteCode | Self::WeakPassword { .. } => 400,
            Self::InvalidCredentials => 401,
            Self::Unauthorized => 403,
            Self::IdentityExists => 409,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInviteCode => "INVALID_INVITE_CODE",
            Self::IdentityExists => "IDENTITY_EXISTS",
            Self::WeakPassword { .. } => "WEAK_PASSWORD",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_failures_are_client_errors() {
        for err in [
            AuthError::InvalidInviteCode,
            AuthError::IdentityExists,
            AuthError::WeakPassword { min_length: 8 },
            AuthError::InvalidCredentials,
            AuthError::Unauthorized,
        ] {
            assert!(err.status_code() < 500, "{err} should be a client error");
        }
        assert_eq!(AuthError::Internal("boom".to_string()).status_code(), 500);
    }

    #[test]
    fn test_weak_password_message() {
        let err = AuthError::WeakPassword { min_length: 8 };
        assert_eq!(err.to_string(), "password must be at least 8 characters");
    }
}
