use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use log::debug;
use std::sync::Arc;
use tower_cookies::Cookies;

use crate::core::shared::state::AppState;

pub const LOGIN_PATH: &str = "/login";

/// The authenticated user for this request, resolved once by [`require_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i32,
}

/// Route guard: resolves the session cookie and short-circuits to the login page when there
/// is no live session. On success the [`CurrentUser`] is placed in request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match state.sessions.current_user(&cookies) {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentUser { user_id });
            next.run(request).await
        }
        None => {
            debug!(
                "No session for {} {}, redirecting to login",
                request.method(),
                request.uri().path()
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| Redirect::to(LOGIN_PATH).into_response())
    }
}
