//! Authentication handlers for signup, login, and logout

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use log::{info, warn};
use serde::Deserialize;
use std::sync::Arc;
use tower_cookies::Cookies;

use crate::core::shared::error::AppError;
use crate::core::shared::state::AppState;

use super::{render_login_page, render_signup_page};

/// Missing fields deserialize as empty so the store reports them as validation errors.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn signup_page() -> Html<String> {
    Html(render_signup_page())
}

pub async fn signup_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, AppError> {
    match state
        .credentials
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            info!("Signup completed for {}", user.username);
            Ok(Redirect::to("/login"))
        }
        Err(e) => {
            warn!("Signup rejected: {}", e);
            Err(e)
        }
    }
}

/// Already-authenticated visitors go straight to their task list.
pub async fn login_page(State(state): State<Arc<AppState>>, cookies: Cookies) -> Response {
    if state.sessions.current_user(&cookies).is_some() {
        return Redirect::to("/index").into_response();
    }
    Html(render_login_page()).into_response()
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let user = state
        .credentials
        .authenticate(&form.username, &form.password)
        .await?;

    // A second login from the same browser replaces its earlier binding.
    state.sessions.detach(&cookies);
    let token = state.sessions.start_session(user.id);
    state.sessions.attach(&cookies, &token);
    info!("User {} logged in", user.username);

    Ok(Redirect::to("/index"))
}

pub async fn logout(State(state): State<Arc<AppState>>, cookies: Cookies) -> Redirect {
    state.sessions.detach(&cookies);
    Redirect::to("/login")
}
