//! Credential store: user records and password verification.

use diesel::prelude::*;
use log::{info, warn};
use serde::Serialize;

use crate::core::shared::error::AppError;
use crate::core::shared::schema::users;
use crate::core::shared::utils::DbPool;
use crate::security::CredentialHasher;

pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
struct NewUser<'a> {
    username: &'a str,
    email: &'a str,
    password_hash: &'a str,
}

pub struct CredentialStore {
    conn: DbPool,
    hasher: CredentialHasher,
    /// Verified against when the username is unknown so both failure paths cost the same.
    dummy_hash: String,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("hasher", &self.hasher)
            .finish()
    }
}

fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), AppError> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Username, email and password are required".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(AppError::Validation(format!(
            "Email must be at most {MAX_EMAIL_LEN} characters"
        )));
    }
    Ok(())
}

impl CredentialStore {
    pub fn new(conn: DbPool, hasher: CredentialHasher) -> anyhow::Result<Self> {
        use base64::Engine;
        use rand::RngCore;
        let mut seed = [0u8; 16];
        rand::rng().fill_bytes(&mut seed);
        let dummy_hash =
            hasher.hash(&base64::engine::general_purpose::STANDARD_NO_PAD.encode(seed))?;
        Ok(Self {
            conn,
            hasher,
            dummy_hash,
        })
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let username = username.trim().to_string();
        let email = email.trim().to_string();
        validate_signup(&username, &email, password)?;

        let conn = self.conn.clone();
        let hasher = self.hasher.clone();
        let password = password.to_string();

        let user = tokio::task::spawn_blocking(move || -> Result<User, AppError> {
            let password_hash = hasher
                .hash(&password)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let mut db_conn = conn.get()?;

            // BEGIN IMMEDIATE takes the write lock before the lookup, so two signups for the
            // same name serialize here; the UNIQUE constraints back this up.
            db_conn.immediate_transaction(|tx| {
                let taken = users::table
                    .filter(users::username.eq(&username).or(users::email.eq(&email)))
                    .select(users::id)
                    .first::<i32>(tx)
                    .optional()?;
                if taken.is_some() {
                    return Err(AppError::DuplicateIdentity);
                }

                diesel::insert_into(users::table)
                    .values(&NewUser {
                        username: &username,
                        email: &email,
                        password_hash: &password_hash,
                    })
                    .returning(User::as_returning())
                    .get_result(tx)
                    .map_err(AppError::from)
            })
        })
        .await??;

        info!("Registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let conn = self.conn.clone();
        let hasher = self.hasher.clone();
        let dummy_hash = self.dummy_hash.clone();
        let username = username.trim().to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || -> Result<User, AppError> {
            let mut db_conn = conn.get()?;
            let found = users::table
                .filter(users::username.eq(&username))
                .select(User::as_select())
                .first(&mut db_conn)
                .optional()?;

            match found {
                Some(user) => {
                    let matches = hasher
                        .verify(&password, &user.password_hash)
                        .map_err(|e| AppError::Internal(e.to_string()))?;
                    if matches {
                        Ok(user)
                    } else {
                        warn!("Failed login for user id {}", user.id);
                        Err(AppError::InvalidCredentials)
                    }
                }
                None => {
                    let _ = hasher.verify(&password, &dummy_hash);
                    warn!("Failed login for unknown username");
                    Err(AppError::InvalidCredentials)
                }
            }
        })
        .await?
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<Option<User>, AppError> {
            let mut db_conn = conn.get()?;
            Ok(users::table
                .find(user_id)
                .select(User::as_select())
                .first(&mut db_conn)
                .optional()?)
        })
        .await?
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let conn = self.conn.clone();
        let username = username.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<User>, AppError> {
            let mut db_conn = conn.get()?;
            Ok(users::table
                .filter(users::username.eq(&username))
                .select(User::as_select())
                .first(&mut db_conn)
                .optional()?)
        })
        .await?
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<i64, AppError> {
            let mut db_conn = conn.get()?;
            Ok(users::table.count().get_result(&mut db_conn)?)
        })
        .await?
    }
}
