//! Authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use pricelens_core::Role;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: Option<CurrentUser>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: Option<CurrentUser>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub role: String,
}

/// Display the login page.
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    LoginTemplate { user }
}

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    RegisterTemplate { user }
}

/// Log in with email and password.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: user.role,
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %current.id, "user logged in");

    let destination = if current.role.is_shopkeeper() {
        "/dashboard"
    } else {
        "/"
    };
    Ok(Redirect::to(destination))
}

/// Register a new account and log it in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse> {
    if form.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full name is required".into()));
    }

    let role = Role::parse(&form.role)
        .ok_or_else(|| AppError::BadRequest(format!("unknown role '{}'", form.role)))?;

    let phone = Some(form.phone.trim()).filter(|p| !p.is_empty());

    let user = AuthService::new(state.pool())
        .register(&form.email, &form.password, form.full_name.trim(), phone, role)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: user.role,
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    tracing::info!(user_id = %current.id, role = %current.role, "account registered");

    let destination = if current.role.is_shopkeeper() {
        "/dashboard"
    } else {
        "/"
    };
    Ok(Redirect::to(destination))
}

/// Log out and return to the home page.
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(Redirect::to("/"))
}
