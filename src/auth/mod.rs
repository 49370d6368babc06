pub mod users;

pub use users::{CredentialStore, User};
