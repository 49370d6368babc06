pub mod password;

pub use password::{Argon2Config, CredentialHasher};
