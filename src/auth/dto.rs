use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Request body for user registration. Some clients send the handle as `email`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

/// Form body of `POST /token` (OAuth2 password flow; extra fields are ignored).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
        }
    }
}
