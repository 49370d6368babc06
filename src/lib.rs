pub mod auth;
pub mod config;
pub mod core;
pub mod main_module;
pub mod security;
pub mod sheet;
pub mod tasks;
pub mod web;
