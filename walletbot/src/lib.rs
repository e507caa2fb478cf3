//! Terminal crypto wallet assistant backed by the Gemini API.
//!
//! The library holds the HTTP client, the chat session and model catalog
//! surfaces, and the two loops driven by the `walletbot-chat` and
//! `walletbot-models` binaries.

pub mod backend;
pub mod catalog;
pub mod chats;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod persona;
pub mod repl;

#[cfg(test)]
mod test_support;

pub use walletbot_types as types;

pub use backend::{ChatBackend, ModelCatalog};
pub use client::{Client, ClientBuilder, HttpOptions};
pub use config::Config;
pub use error::{Error, Result};
