use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::errors::ApiError;
use crate::api::handlers::DataResponse;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::auth::{hash_password, verify_password, JwtSettings};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, NewUser, Role, User, UserChanges};
use crate::infrastructure::repositories::PostgresUserRepository;

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for updating the current user's details
#[derive(Debug, Deserialize)]
pub struct UpdateDetailsRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request body for changing the current user's password
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// `{success: true, token}`
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

/// Name of the cookie carrying the token for browser clients
pub const TOKEN_COOKIE: &str = "token";

fn token_cookie(jwt: &JwtSettings, token: &str) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        jwt.ttl.num_seconds()
    );
    if jwt.secure_cookie {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(ApiError::internal_server_error)
}

fn cleared_token_cookie() -> HeaderValue {
    HeaderValue::from_static("token=none; HttpOnly; Path=/; Max-Age=0; SameSite=Lax")
}

/// `{success, token}`, with the same token in an httpOnly cookie
fn token_response(jwt: &JwtSettings, user: &User) -> Result<Response, ApiError> {
    let token = jwt.issue(user.id).map_err(ApiError::internal_server_error)?;
    let cookie = token_cookie(jwt, &token)?;

    let mut response = Json(TokenResponse {
        success: true,
        token,
    })
    .into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// Register a new user
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;
    let role = match req.role.as_deref() {
        Some(role) => Role::assignable(role).map_err(ApiError::bad_request)?,
        None => Role::default(),
    };
    let password_hash = hash_password(&req.password)?;
    let new_user =
        NewUser::new(&req.name, email, role, password_hash).map_err(ApiError::bad_request)?;

    let user = PostgresUserRepository::new(state.pool.clone())
        .create(&new_user)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");
    token_response(&state.jwt, &user)
}

/// Login with email and password
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::bad_request("Please provide an email and password"));
    };

    // a malformed email cannot belong to anyone
    let email = Email::new(&email).map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let user = PostgresUserRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    token_response(&state.jwt, &user)
}

/// Log out by expiring the token cookie
///
/// Tokens are not stored server side, so a bearer token stays valid until it
/// expires.
///
/// GET /api/v1/auth/logout
pub async fn logout() -> Response {
    let mut response = DataResponse::new(json!({})).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, cleared_token_cookie());
    response
}

/// Get the current user
///
/// GET /api/v1/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<DataResponse<User>> {
    DataResponse::new(user)
}

/// Update the current user's name and email
///
/// PUT /api/v1/auth/updatedetails
pub async fn update_details(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdateDetailsRequest>,
) -> Result<Json<DataResponse<User>>, ApiError> {
    let changes = UserChanges::new(req.name.as_deref(), req.email.as_deref(), None)
        .map_err(ApiError::bad_request)?;

    let user = PostgresUserRepository::new(state.pool.clone())
        .update(user.id, &changes)
        .await?;

    Ok(DataResponse::new(user))
}

/// Change the current user's password and issue a fresh token
///
/// PUT /api/v1/auth/updatepassword
pub async fn update_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Response, ApiError> {
    if !verify_password(&req.current_password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Password is incorrect"));
    }

    let password_hash = hash_password(&req.new_password)?;

    PostgresUserRepository::new(state.pool.clone())
        .update_password(user.id, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, "password changed");
    token_response(&state.jwt, &user)
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_text(value: &HeaderValue) -> &str {
        value.to_str().unwrap()
    }

    #[test]
    fn token_cookie_lives_as_long_as_the_token() {
        let jwt = JwtSettings::new("cookie-secret", 720);
        let cookie = token_cookie(&jwt, "abc.def.ghi").unwrap();

        assert_eq!(
            cookie_text(&cookie),
            "token=abc.def.ghi; HttpOnly; Path=/; Max-Age=2592000; SameSite=Lax"
        );
    }

    #[test]
    fn secure_flag_follows_settings() {
        let jwt = JwtSettings::new("cookie-secret", 1).with_secure_cookie(true);
        let cookie = token_cookie(&jwt, "abc").unwrap();

        assert!(cookie_text(&cookie).ends_with("; Secure"));
    }

    #[test]
    fn token_response_sets_cookie_matching_body() {
        let jwt = JwtSettings::new("cookie-secret", 1);
        let user = User {
            id: uuid::Uuid::new_v4(),
            name: "Cookie Monster".to_string(),
            email: Email::new("cookie@devcamper.io").unwrap(),
            role: Role::User,
            password_hash: String::new(),
            created_at: chrono::Utc::now(),
        };

        let response = token_response(&jwt, &user).unwrap();
        let cookie = cookie_text(response.headers().get(SET_COOKIE).unwrap()).to_string();
        let token = cookie
            .strip_prefix("token=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();

        assert_eq!(jwt.verify(token).unwrap().sub, user.id);
    }

    #[tokio::test]
    async fn logout_expires_the_cookie() {
        let response = logout().await;

        let cookie = response.headers().get(SET_COOKIE).unwrap();
        assert!(cookie_text(cookie).starts_with("token=none;"));
        assert!(cookie_text(cookie).contains("Max-Age=0"));
    }
}
