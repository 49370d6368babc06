use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use taskdesk::config::{AppConfig, DatabaseConfig, ServerConfig, SessionConfig};
use taskdesk::core::shared::state::AppState;
use taskdesk::core::shared::utils::{create_conn, run_migrations};
use taskdesk::main_module::build_router;
use taskdesk::security::Argon2Config;

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: dir.path().join("http.db").to_string_lossy().to_string(),
                pool_size: 4,
            },
            session: SessionConfig::random(),
            argon2: Argon2Config::minimal(),
        };
        let pool = create_conn(&config.database).expect("pool");
        run_migrations(&pool).expect("migrations");
        let state = Arc::new(AppState::new(&config, pool).expect("state"));
        Self {
            router: build_router(state.clone()),
            state,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("request"))
            .await
    }

    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).expect("request"))
            .await
    }

    /// Registers and logs in, returning the `name=value` pair to send back as `Cookie`.
    pub async fn login_as(&self, username: &str) -> String {
        let form = format!("username={username}&email={username}%40example.com&password=hunter2");
        let response = self.post_form("/signup", &form, None).await;
        assert_redirect(&response, "/login");

        let form = format!("username={username}&password=hunter2");
        let response = self.post_form("/login", &form, None).await;
        assert_redirect(&response, "/index");
        session_cookie(&response).expect("login sets a session cookie")
    }
}

pub fn assert_redirect(response: &Response<Body>, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("taskdesk_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
