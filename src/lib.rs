//! # Choosepath - a cookie-state Choose Your Path game server
//!
//! Choosepath serves a branching "choose your path" game where the whole
//! player state — treasure collected and health remaining — travels in the
//! client's cookie. There is no session store and no database: every request
//! is stateless apart from what the client echoes back, and all level
//! content (story text, choice destinations, reward and damage amounts, an
//! optional page template) comes from per-route tables in the server's TOML
//! configuration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use choosepath::config::Config;
//! use choosepath::game::GameServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = Config::load("config.toml").await?;
//!
//!     // Resolve levels and serve the game
//!     let server = GameServer::new(config).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - The request-state engine: cookie codec, reward/damage
//!   applier, gatekeeper, template substitution, rendering, and the HTTP host
//! - [`config`] - TOML configuration and hierarchical level resolution
//! - [`logutil`] - Log sanitization helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Host     │ ← accept loop, request parsing
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Request Engine │ ← decode → apply → gate → render → encode
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Level Table    │ ← resolved once from config, immutable
//! └─────────────────┘
//! ```

pub mod config;
pub mod game;
pub mod logutil;
