//! Gemini wire types shared by the walletbot client and binaries.

pub mod config;
pub mod content;
pub mod enums;
pub mod models;
pub mod response;
