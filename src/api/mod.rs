//! Invite API client module
//!
//! reqwest-backed client for the invite and organization endpoints.

mod client;
mod invites;
pub mod models;
mod organizations;

pub use client::ApiClient;
pub use models::Organization;
