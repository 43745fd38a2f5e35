//! # Configuration Management Module
//!
//! Loads the TOML configuration and resolves it into the immutable per-route
//! level table the game engine reads at request time.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! entry_route = "/cyp"
//!
//! [logging]
//! level = "info"
//!
//! [levels."/cyp"]
//! title = "Stage 1: The fork in the road."
//! description = "Two paths stretch ahead."
//! right = ["/cyp/stage2", "Stage 2."]
//! treasure = "10"
//!
//! [levels."/cyp/stage2"]
//! title = "Stage 2: Steps to a house."
//! left = ["/cyp", "Back to stage 1."]
//! right = ["/cyp/stage3", "Stage 3."]
//! damage = "20"
//! ```
//!
//! ## Hierarchical resolution
//!
//! Route tables inherit: a level under `/cyp/stage2` falls back to whatever
//! `/cyp` configured for any field it leaves unset, layered root-first so the
//! most specific route wins. Resolution happens once at startup and also
//! reads any configured template file into memory, so nothing in the request
//! path touches the filesystem. An unreadable template logs a warning and the
//! level falls back to the default layout.

use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::fs;

use crate::game::LevelDescriptor;

/// Errors from turning a parsed [`Config`] into a servable level table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `[levels]` entries at all; there is no game to serve.
    #[error("no levels configured")]
    NoLevels,

    /// The configured entry route has no level, so the game cannot start.
    #[error("entry route {0} has no level configured")]
    EntryRouteMissing(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub levels: HashMap<String, LevelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds, e.g. `127.0.0.1:8080`.
    pub bind: String,
    /// The route a fresh game starts at; always viewable without a cookie.
    pub entry_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// One `[levels."/route"]` table. Every field is optional; unset fields
/// inherit from ancestor routes during resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LevelConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `[path, label]` of the left choice.
    pub left: Option<[String; 2]>,
    /// `[path, label]` of the right choice.
    pub right: Option<[String; 2]>,
    /// Treasure awarded on this level, as a decimal-integer string.
    pub treasure: Option<String>,
    /// Damage dealt by this level, as a decimal-integer string.
    pub damage: Option<String>,
    /// Path to a raw template file for this level's page.
    pub template: Option<String>,
}

impl LevelConfig {
    /// Overlay `child` on top of `self`: any field the child set wins.
    fn merged_with(&self, child: &LevelConfig) -> LevelConfig {
        LevelConfig {
            title: child.title.clone().or_else(|| self.title.clone()),
            description: child
                .description
                .clone()
                .or_else(|| self.description.clone()),
            left: child.left.clone().or_else(|| self.left.clone()),
            right: child.right.clone().or_else(|| self.right.clone()),
            treasure: child.treasure.clone().or_else(|| self.treasure.clone()),
            damage: child.damage.clone().or_else(|| self.damage.clone()),
            template: child.template.clone().or_else(|| self.template.clone()),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Resolve the configured level tables into the immutable descriptor map
    /// the engine serves from. Runs once at startup.
    pub async fn resolve_levels(&self) -> Result<HashMap<String, LevelDescriptor>, ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if !self.levels.contains_key(&self.server.entry_route) {
            return Err(ConfigError::EntryRouteMissing(
                self.server.entry_route.clone(),
            ));
        }

        let mut resolved = HashMap::with_capacity(self.levels.len());
        for route in self.levels.keys() {
            let merged = self.merged_level(route);
            resolved.insert(route.clone(), finalize(route, merged).await);
        }
        Ok(resolved)
    }

    /// Layer every configured ancestor of `route` under its own table,
    /// root-first, so the most specific setting wins.
    fn merged_level(&self, route: &str) -> LevelConfig {
        let mut ancestors: Vec<&str> = self
            .levels
            .keys()
            .map(String::as_str)
            .filter(|candidate| is_ancestor(candidate, route))
            .collect();
        ancestors.sort_by_key(|r| r.len());

        let mut merged = LevelConfig::default();
        for ancestor in ancestors {
            merged = merged.merged_with(&self.levels[ancestor]);
        }
        merged.merged_with(&self.levels[route])
    }
}

/// True when `candidate` is a proper path ancestor of `route`.
fn is_ancestor(candidate: &str, route: &str) -> bool {
    if candidate == route {
        return false;
    }
    match route.strip_prefix(candidate) {
        Some(rest) => candidate.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// Fill defaults and load the template file, turning a merged [`LevelConfig`]
/// into the engine's [`LevelDescriptor`].
async fn finalize(route: &str, merged: LevelConfig) -> LevelDescriptor {
    let [mut left_path, mut left_label] = merged.left.unwrap_or_default();
    // The left move is a pair: half-set means unset.
    if left_path.is_empty() || left_label.is_empty() {
        left_path.clear();
        left_label.clear();
    }
    let [right_path, right_label] = merged.right.unwrap_or_default();

    let template = match merged.template {
        Some(path) => match fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    "level {}: template {} could not be read ({}); using default layout",
                    route, path, e
                );
                None
            }
        },
        None => None,
    };

    LevelDescriptor {
        title: merged.title.unwrap_or_default(),
        description: merged.description.unwrap_or_default(),
        left_path,
        left_label,
        right_path,
        right_label,
        treasure_reward: merged.treasure.unwrap_or_else(|| "0".to_string()),
        damage_amount: merged.damage.unwrap_or_else(|| "0".to_string()),
        template,
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut levels = HashMap::new();

        levels.insert(
            "/cyp".to_string(),
            LevelConfig {
                title: Some("Stage 1: The fork in the road.".to_string()),
                description: Some(
                    "Your path splits. The right fork winds toward a distant house.".to_string(),
                ),
                right: Some(["/cyp/stage2".to_string(), "Stage 2.".to_string()]),
                treasure: Some("10".to_string()),
                damage: Some("0".to_string()),
                ..LevelConfig::default()
            },
        );

        levels.insert(
            "/cyp/stage2".to_string(),
            LevelConfig {
                title: Some("Stage 2: Steps to a house.".to_string()),
                description: Some("The door hangs open. Something moved inside.".to_string()),
                left: Some(["/cyp".to_string(), "Back to stage 1.".to_string()]),
                right: Some(["/cyp/stage3".to_string(), "Stage 3.".to_string()]),
                treasure: Some("0".to_string()),
                damage: Some("20".to_string()),
                ..LevelConfig::default()
            },
        );

        levels.insert(
            "/cyp/stage3".to_string(),
            LevelConfig {
                title: Some("Stage 3: The cellar hoard.".to_string()),
                description: Some(
                    "Gold glitters in the dark, guarded by whatever bit you upstairs.".to_string(),
                ),
                left: Some(["/cyp/stage2".to_string(), "Back to stage 2.".to_string()]),
                right: Some(["/cyp".to_string(), "Escape and start again.".to_string()]),
                treasure: Some("50".to_string()),
                damage: Some("5".to_string()),
                ..LevelConfig::default()
            },
        );

        Config {
            server: ServerConfig {
                bind: "127.0.0.1:8080".to_string(),
                entry_route: "/cyp".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("choosepath.log".to_string()),
            },
            levels,
        }
    }
}
