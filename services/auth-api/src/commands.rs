//! Command dispatcher
//!
//! Decodes a request body into the typed arguments of one [`Command`], runs
//! the matching store operation and encodes the result as a bare JSON value.
//! Mutations hold the persistence gate until their snapshot is saved, and run
//! on their own task so a dropped request cannot split the two.

use latchkey_auth_core::AuthError;
use latchkey_types::{
    ChangePasswordRequest, Command, IssueInviteCodeRequest, RevokeInviteCodeRequest,
    SignInRequest, SignOutRequest, SignUpRequest, VerifyTokenRequest,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, AuthStoreImpl};

/// A decoded command with its arguments
#[derive(Debug)]
enum Invocation {
    IssueInviteCode(IssueInviteCodeRequest),
    RevokeInviteCode(RevokeInviteCodeRequest),
    VerifyToken(VerifyTokenRequest),
    SignUp(SignUpRequest),
    SignIn(SignInRequest),
    SignOut(SignOutRequest),
    ChangePassword(ChangePasswordRequest),
}

impl Invocation {
    fn decode(command: Command, body: &[u8]) -> ApiResult<Self> {
        Ok(match command {
            Command::IssueInviteCode => Self::IssueInviteCode(decode(body)?),
            Command::RevokeInviteCode => Self::RevokeInviteCode(decode(body)?),
            Command::VerifyToken => Self::VerifyToken(decode(body)?),
            Command::SignUp => Self::SignUp(decode(body)?),
            Command::SignIn => Self::SignIn(decode(body)?),
            Command::SignOut => Self::SignOut(decode(body)?),
            Command::ChangePassword => Self::ChangePassword(decode(body)?),
        })
    }

    fn run(self, store: &AuthStoreImpl) -> Result<Value, AuthError> {
        match self {
            Self::IssueInviteCode(req) => store
                .issue_invite_code(&req.auth.identity, &req.auth.token)
                .map(|code| Value::String(code.into_inner())),
            Self::RevokeInviteCode(req) => store
                .revoke_invite_code(&req.auth.identity, &req.auth.token, &req.invite_code)
                .map(|()| Value::Null),
            Self::VerifyToken(req) => store
                .verify_token_as(
                    &req.auth.identity,
                    &req.auth.token,
                    &req.creds.identity,
                    &req.creds.token,
                )
                .map(Value::Bool),
            Self::SignUp(req) => store
                .sign_up(req.identity, &req.password, &req.invite_code)
                .map(|token| Value::String(token.into_inner())),
            Self::SignIn(req) => store
                .sign_in(&req.identity, &req.password)
                .map(|token| Value::String(token.into_inner())),
            Self::SignOut(req) => store
                .sign_out(&req.identity, &req.token)
                .map(|()| Value::Null),
            Self::ChangePassword(req) => store
                .change_password(&req.identity, &req.token, &req.new_password)
                .map(|()| Value::Null),
        }
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Execute one command against the store
pub async fn execute(state: &AppState, command: Command, body: &[u8]) -> ApiResult<Value> {
    let invocation = Invocation::decode(command, body)?;

    if !command.is_mutation() {
        let store = state.store.clone();
        return tokio::task::spawn_blocking(move || invocation.run(&store))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .map_err(ApiError::from);
    }

    let state = state.clone();
    tokio::spawn(async move { mutate(state, invocation).await })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

async fn mutate(state: AppState, invocation: Invocation) -> ApiResult<Value> {
    let _gate = state.persist_gate.lock().await;

    let store = state.store.clone();
    let (result, snapshot) = tokio::task::spawn_blocking(move || {
        let result = invocation.run(&store);
        // Taken under the gate, so no other mutation can land in between
        let snapshot = result.is_ok().then(|| store.snapshot());
        (result, snapshot)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let value = result?;
    if let Some(snapshot) = snapshot {
        if let Err(e) = state.snapshots.save(&snapshot).await {
            metrics::counter!("latchkey_snapshot_failures_total").increment(1);
            return Err(ApiError::Persistence(e));
        }
    }
    Ok(value)
}
