//! Cadenza: the directory backend serving companies, people, blog posts and their users.

pub mod auth;
pub mod config;
mod constants;
pub mod db;
pub mod error;
mod handlers;
mod models;
pub mod oauth;
mod pagination;
pub mod seed;
pub mod server;
mod utils;
