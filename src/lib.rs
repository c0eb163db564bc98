//! inkwell: a blogging backend whose sessions are a short-lived access token
//! plus a revocable refresh token, and a client that renews them on demand.

pub mod auth;
pub mod client;
pub mod config;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
