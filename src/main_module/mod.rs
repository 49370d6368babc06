//! HTTP server assembly: router, health probe, and lifecycle

mod health;
mod server;

pub use health::*;
pub use server::*;
