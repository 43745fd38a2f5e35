//! # Game Engine
//!
//! The request-state engine behind the Choose Your Path game. Each request
//! is handled by one synchronous pass with no shared mutable state:
//!
//! 1. [`state`] decodes the incoming cookie into a [`PlayerState`]
//! 2. [`level`] folds the route's reward/damage into it
//! 3. [`gate`] decides whether the player may see the level
//! 4. [`render`] produces the HTML body (default, templated, or start-over)
//! 5. [`state`] re-encodes the outgoing cookie
//!
//! [`handler::handle`] composes the steps; [`server`] hosts them over HTTP.
//! Level content arrives as an immutable [`LevelDescriptor`] table resolved
//! once from configuration at startup.

pub mod gate;
pub mod handler;
pub mod level;
pub mod render;
pub mod server;
pub mod state;
pub mod template;

pub use gate::Visibility;
pub use handler::{handle, GameResponse};
pub use level::LevelDescriptor;
pub use server::GameServer;
pub use state::PlayerState;
