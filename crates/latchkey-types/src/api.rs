//! API request/response types
//!
//! Field names are camelCase on the wire. The aliases keep older clients that
//! send `email` and `inviteToken` working.

use serde::{Deserialize, Serialize};

use crate::{Identity, InviteCode, SessionToken};

/// An identity together with one of its session tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(alias = "email")]
    pub identity: Identity,
    pub token: SessionToken,
}

impl Credentials {
    /// Create a credentials pair
    pub fn new(identity: impl Into<Identity>, token: SessionToken) -> Self {
        Self {
            identity: identity.into(),
            token,
        }
    }
}

/// `admin/issue-invite-code`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueInviteCodeRequest {
    pub auth: Credentials,
}

/// `admin/revoke-invite-code`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeInviteCodeRequest {
    pub auth: Credentials,
    #[serde(alias = "inviteToken")]
    pub invite_code: InviteCode,
}

/// `admin/verify-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    /// Administrator session authorizing the lookup
    pub auth: Credentials,
    /// Pair being checked
    pub creds: Credentials,
}

/// `user/sign-up`
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(alias = "email")]
    pub identity: Identity,
    pub password: String,
    #[serde(alias = "inviteToken")]
    pub invite_code: InviteCode,
}

/// `user/sign-in`
#[derive(Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(alias = "email")]
    pub identity: Identity,
    pub password: String,
}

/// `user/sign-out`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignOutRequest {
    #[serde(alias = "email")]
    pub identity: Identity,
    pub token: SessionToken,
}

/// `user/change-password`
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(alias = "email")]
    pub identity: Identity,
    pub token: SessionToken,
    #[serde(alias = "password")]
    pub new_password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .field("invite_code", &self.invite_code)
            .finish()
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("identity", &self.identity)
            .field("token", &self.token)
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Error envelope returned on every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error code (e.g., `INVALID_CREDENTIALS`, `BAD_REQUEST`)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error envelope
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Readiness response with store counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub service: String,
    pub users: usize,
    pub sessions: usize,
    pub outstanding_invites: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_field_aliases() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"email":"a@x","password":"goodpass1","inviteToken":"code"}"#,
        )
        .unwrap();
        assert_eq!(req.identity.as_str(), "a@x");
        assert_eq!(req.invite_code.as_str(), "code");

        let req: ChangePasswordRequest =
            serde_json::from_str(r#"{"email":"a@x","token":"t","password":"newpass12"}"#)
                .unwrap();
        assert_eq!(req.new_password, "newpass12");
    }

    #[test]
    fn test_camel_case_fields() {
        let req: RevokeInviteCodeRequest = serde_json::from_str(
            r#"{"auth":{"identity":"root","token":"t"},"inviteCode":"c"}"#,
        )
        .unwrap();
        assert_eq!(req.invite_code.as_str(), "c");

        let json = serde_json::to_value(ChangePasswordRequest {
            identity: Identity::from("a"),
            token: SessionToken::from("t"),
            new_password: "p".to_string(),
        })
        .unwrap();
        assert!(json.get("newPassword").is_some());
    }

    #[test]
    fn test_missing_field_rejected() {
        let result: Result<SignInRequest, _> = serde_json::from_str(r#"{"identity":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_passwords_redacted_in_debug() {
        let req = SignInRequest {
            identity: Identity::from("a@x"),
            password: "hunter2hunter2".to_string(),
        };
        assert!(!format!("{req:?}").contains("hunter2"));
    }
}
