use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{
    jwt::JwtKeys,
    password::{check_password, hash_password, verify_password},
    repo::Inserted,
    repo_types::User,
};
use crate::error::ApiError;

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.@+-]{1,64}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

pub async fn register_user(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, ApiError> {
    let username = username.trim();
    if !is_valid_username(username) {
        warn!(%username, "invalid username");
        return Err(ApiError::BadRequest("Invalid username".into()));
    }
    check_password(password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if User::find_by_username(db, username).await?.is_some() {
        warn!(%username, "username already registered");
        return Err(ApiError::DuplicateUser);
    }

    let hash = hash_password(password)?;
    match User::create(db, username, &hash).await? {
        Inserted::Created(user) => {
            info!(user_id = user.id, username = %user.username, "user registered");
            Ok(user)
        }
        Inserted::Duplicate => {
            warn!(%username, "username registered concurrently");
            Err(ApiError::DuplicateUser)
        }
    }
}

/// Unknown user and wrong password fail the same way.
pub async fn authenticate(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, ApiError> {
    let Some(user) = User::find_by_username(db, username.trim()).await? else {
        warn!(%username, "login unknown username");
        return Err(ApiError::LoginFailed);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::LoginFailed);
    }
    Ok(user)
}

/// Validates a bearer token and loads the user named by its subject.
pub async fn resolve_token(
    db: &SqlitePool,
    keys: &JwtKeys,
    token: &str,
) -> Result<User, ApiError> {
    let claims = keys.verify(token)?;
    match User::find_by_username(db, &claims.sub).await? {
        Some(user) => Ok(user),
        None => {
            warn!(subject = %claims.sub, "token subject has no user");
            Err(ApiError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;

    use super::*;
    use crate::state::AppState;

    #[test]
    fn username_validation() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("test@example.com"));
        assert!(is_valid_username("user_1.b-c+d"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"x".repeat(65)));
    }

    #[tokio::test]
    async fn second_registration_is_duplicate() {
        let state = AppState::in_memory().await;
        register_user(&state.db, "alice", "pw1").await.unwrap();
        let err = register_user(&state.db, "alice", "other").await.unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUser));
        // surrounding whitespace does not make a new handle
        let err = register_user(&state.db, "  alice ", "pw1").await.unwrap_err();
        assert!(matches!(err, ApiError::DuplicateUser));
    }

    #[tokio::test]
    async fn registration_rejects_bad_input() {
        let state = AppState::in_memory().await;
        assert!(matches!(
            register_user(&state.db, "   ", "pw1").await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            register_user(&state.db, "alice", "").await,
            Err(ApiError::BadRequest(_))
        ));
        let long = "a".repeat(2048);
        assert!(matches!(
            register_user(&state.db, "alice", &long).await,
            Err(ApiError::BadRequest(_))
        ));
        assert!(User::find_by_username(&state.db, "alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_password() {
        let state = AppState::in_memory().await;
        let user = register_user(&state.db, "alice", "pw1").await.unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let state = AppState::in_memory().await;
        let alice = register_user(&state.db, "alice", "pw1").await.unwrap();

        let user = authenticate(&state.db, "alice", "pw1").await.unwrap();
        assert_eq!(user.id, alice.id);
        assert!(matches!(
            authenticate(&state.db, "alice", "wrong").await,
            Err(ApiError::LoginFailed)
        ));
        assert!(matches!(
            authenticate(&state.db, "nobody", "pw1").await,
            Err(ApiError::LoginFailed)
        ));
    }

    #[tokio::test]
    async fn token_resolves_to_registered_user() {
        let state = AppState::in_memory().await;
        let keys = JwtKeys::from_ref(&state);
        let alice = register_user(&state.db, "alice", "pw1").await.unwrap();

        let token = keys.issue(&alice.username, None).unwrap();
        let user = resolve_token(&state.db, &keys, &token).await.unwrap();
        assert_eq!(user.id, alice.id);
    }

    #[tokio::test]
    async fn token_for_unknown_subject_is_rejected() {
        let state = AppState::in_memory().await;
        let keys = JwtKeys::from_ref(&state);
        let token = keys.issue("ghost", None).unwrap();
        assert!(matches!(
            resolve_token(&state.db, &keys, &token).await,
            Err(ApiError::InvalidCredentials)
        ));
    }
}
