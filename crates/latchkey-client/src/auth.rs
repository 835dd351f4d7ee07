//! Auth client
//!
//! Thin HTTP client over the command table. Relying parties typically only
//! need [`AuthClient::verify_token`], which runs under the administrator
//! session configured in [`ClientConfig`].

use latchkey_types::{
    ChangePasswordRequest, Command, Credentials, ErrorResponse, Identity, InviteCode,
    IssueInviteCodeRequest, RevokeInviteCodeRequest, SessionToken, SignInRequest,
    SignOutRequest, SignUpRequest, VerifyTokenRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ClientConfig, ClientError};

/// Auth client
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    // =========================================================================
    // User Commands
    // =========================================================================

    /// Register with an invite code; returns the first session token
    pub async fn sign_up(
        &self,
        identity: impl Into<Identity>,
        password: impl Into<String>,
        invite_code: InviteCode,
    ) -> Result<SessionToken, ClientError> {
        let req = SignUpRequest {
            identity: identity.into(),
            password: password.into(),
            invite_code,
        };
        self.call(Command::SignUp, &req).await
    }

    /// Open a new session
    pub async fn sign_in(
        &self,
        identity: impl Into<Identity>,
        password: impl Into<String>,
    ) -> Result<SessionToken, ClientError> {
        let req = SignInRequest {
            identity: identity.into(),
            password: password.into(),
        };
        self.call(Command::SignIn, &req).await
    }

    /// Close one session
    pub async fn sign_out(&self, creds: &Credentials) -> Result<(), ClientError> {
        let req = SignOutRequest {
            identity: creds.identity.clone(),
            token: creds.token.clone(),
        };
        self.call(Command::SignOut, &req).await
    }

    /// Replace the password of the identity owning `creds`
    pub async fn change_password(
        &self,
        creds: &Credentials,
        new_password: impl Into<String>,
    ) -> Result<(), ClientError> {
        let req = ChangePasswordRequest {
            identity: creds.identity.clone(),
            token: creds.token.clone(),
            new_password: new_password.into(),
        };
        self.call(Command::ChangePassword, &req).await
    }

    // =========================================================================
    // Administrator Commands
    // =========================================================================

    /// Issue a new invite code
    pub async fn issue_invite_code(&self) -> Result<InviteCode, ClientError> {
        let req = IssueInviteCodeRequest {
            auth: self.admin()?,
        };
        self.call(Command::IssueInviteCode, &req).await
    }

    /// Revoke an invite code (no error if it is already gone)
    pub async fn revoke_invite_code(&self, invite_code: InviteCode) -> Result<(), ClientError> {
        let req = RevokeInviteCodeRequest {
            auth: self.admin()?,
            invite_code,
        };
        self.call(Command::RevokeInviteCode, &req).await
    }

    /// Check whether `creds.token` is an active session of `creds.identity`
    pub async fn verify_token(&self, creds: &Credentials) -> Result<bool, ClientError> {
        let req = VerifyTokenRequest {
            auth: self.admin()?,
            creds: creds.clone(),
        };
        self.call(Command::VerifyToken, &req).await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn admin(&self) -> Result<Credentials, ClientError> {
        self.config
            .admin_credentials()
            .cloned()
            .ok_or(ClientError::MissingCredentials)
    }

    async fn call<Req, Resp>(&self, command: Command, req: &Req) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.config.url(command))
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Resp>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let err = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(envelope) => ClientError::Api {
                status: status.as_u16(),
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: "UNKNOWN".to_string(),
                message: body,
            },
        };
        tracing::debug!(command = %command, error = %err, "Command failed");
        Err(err)
    }
}
