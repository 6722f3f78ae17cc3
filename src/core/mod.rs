// src/core/mod.rs
//! Transport layer for the analysis backend

pub mod api_client;

pub use api_client::ApiClient;
