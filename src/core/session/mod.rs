//! Process-local session bindings.
//!
//! A session is an opaque random token held by the browser in a signed cookie and mapped
//! here to a user id. Bindings live only in memory, so a restart logs everybody out.

use base64::Engine;
use log::{debug, info};
use rand::RngCore;
use sha2::{Digest, Sha512};
use std::collections::HashMap;
use std::sync::RwLock;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies, Key};

use crate::config::SessionConfig;

pub const SESSION_COOKIE: &str = "taskdesk_session";

pub type SessionToken = String;

pub struct SessionManager {
    bindings: RwLock<HashMap<SessionToken, i32>>,
    key: Key,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("active_sessions", &self.active_count())
            .finish()
    }
}

fn generate_token() -> SessionToken {
    let mut buf = [0u8; 32];
    rand::rng().fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        // Key::from needs exactly 64 bytes of material; SHA-512 stretches any secret to that.
        let digest = Sha512::digest(&config.secret_key);
        Self {
            bindings: RwLock::new(HashMap::new()),
            key: Key::from(digest.as_slice()),
        }
    }

    pub fn start_session(&self, user_id: i32) -> SessionToken {
        let token = generate_token();
        self.bindings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.clone(), user_id);
        info!("Session started for user {}", user_id);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<i32> {
        self.bindings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .copied()
    }

    pub fn end_session(&self, token: &str) {
        let removed = self
            .bindings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
        match removed {
            Some(user_id) => info!("Session ended for user {}", user_id),
            None => debug!("end_session called for unknown token"),
        }
    }

    pub fn active_count(&self) -> usize {
        self.bindings.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn attach(&self, cookies: &Cookies, token: &str) {
        let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        cookies.signed(&self.key).add(cookie);
    }

    /// Token from the signed cookie; a cookie with a bad signature counts as absent.
    pub fn token_from(&self, cookies: &Cookies) -> Option<SessionToken> {
        cookies
            .signed(&self.key)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
    }

    pub fn current_user(&self, cookies: &Cookies) -> Option<i32> {
        self.token_from(cookies).and_then(|token| self.resolve(&token))
    }

    pub fn detach(&self, cookies: &Cookies) {
        if let Some(token) = self.token_from(cookies) {
            self.end_session(&token);
        }
        let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
        cookies.remove(cookie);
    }
}
