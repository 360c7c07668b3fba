//! User account handlers: login and registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use bookery_core::validation::{validate_email, validate_name, validate_password};
use bookery_core::{User, UserRef};
use bookery_db::generate_user_id;

use crate::auth::{hash_password, verify_password};
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// `POST /user/login`
///
/// Unknown email and wrong password get the identical response, so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Envelope<UserRef>>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }

    let user = state.db.users().get_by_email(req.email.trim()).await?;

    let user = match user {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        _ => {
            debug!(email = %req.email, "Login rejected");
            return Err(ApiError::unauthorized("No user found"));
        }
    };

    info!(user_id = %user.id, "User logged in");
    Ok(Json(Envelope::success("Login successful", UserRef::from(user))))
}

/// `POST /user/register`
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<UserRef>>)> {
    validate_name("first_name", &req.first_name)?;
    validate_name("last_name", &req.last_name)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let user = User {
        id: generate_user_id(),
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        email: req.email.trim().to_lowercase(),
        password_hash: hash_password(&req.password)?,
        created_at: Utc::now(),
    };

    // Duplicate email surfaces as a Conflict from the repository
    state.db.users().insert(&user).await?;

    info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success("Registration successful", UserRef::from(user))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bookery_db::{Database, DbConfig};

    async fn test_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = test_state().await;

        let (status, Json(env)) = register(
            State(state.clone()),
            Json(RegisterRequest {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "Ada@Example.com".to_string(),
                password: "difference-engine".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        let user = env.data.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.first_name, "Ada");

        // Stored hash is argon2, never the plain password
        let stored = state
            .db
            .users()
            .get_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.starts_with("$argon2"));
        assert_ne!(stored.password_hash, "difference-engine");

        let Json(env) = login(
            State(state),
            Json(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "difference-engine".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(env.status, "success");
        assert_eq!(env.data.unwrap().user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let state = test_state().await;

        let (status, _) = register(
            State(state.clone()),
            Json(RegisterRequest {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "difference-engine".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let unknown = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "whatever123".to_string(),
            }),
        )
        .await
        .unwrap_err();

        let wrong_password = login(
            State(state),
            Json(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "analytical-engine".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(unknown.code, ErrorCode::Unauthorized);
        assert_eq!(unknown.message, "No user found");
        assert_eq!(wrong_password.message, unknown.message);
        assert_eq!(wrong_password.code, unknown.code);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let state = test_state().await;

        let req = || RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "difference-engine".to_string(),
        };

        let (status, _) = register(State(state.clone()), Json(req())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = register(State(state), Json(req())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let state = test_state().await;

        let err = register(
            State(state.clone()),
            Json(RegisterRequest {
                first_name: "".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "difference-engine".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register(
            State(state.clone()),
            Json(RegisterRequest {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "not-an-email".to_string(),
                password: "difference-engine".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register(
            State(state),
            Json(RegisterRequest {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "short".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
