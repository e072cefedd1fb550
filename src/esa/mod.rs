// esa API module.
// Provides the client, fetch endpoints, and types for the esa REST API.

#![allow(dead_code)]

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::EsaClient;
pub use types::*;
