//! Mediscript backend: turns free-text medical notes into structured
//! clinical documentation through a chat-completion provider

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs, dead_code)]

/// Clinical note generation
pub mod generation;

/// Chat-completion provider clients
pub mod provider;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Configuration, errors and extractors
pub mod types;
