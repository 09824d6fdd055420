//! Level content generation.
//!
//! An external service turns a theme and a game mode into a level descriptor.
//! Every failure path ends in the built-in offline level; callers never see
//! an error.

mod extract;
mod loader;
mod ollama;

pub use loader::{LevelLoader, PendingLevel};
pub use ollama::OllamaGenerator;

use crate::models::level::{GameMode, LevelDescriptor};
use std::fmt;

/// Models offered when the service is reachable but will not list its own.
const FALLBACK_MODELS: [&str; 2] = ["mistral", "gemma3"];

/// One level request.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRequest {
    pub theme: String,
    pub mode: GameMode,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The service was unreachable at startup.
    Offline,
    Http(String),
    Timeout,
    /// The reply did not contain a usable level.
    Malformed(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Offline => write!(f, "generator offline"),
            GenerationError::Http(e) => write!(f, "HTTP error: {}", e),
            GenerationError::Timeout => write!(f, "request timed out"),
            GenerationError::Malformed(e) => write!(f, "malformed level: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Source of level descriptors.
pub trait LevelGenerator: Send + Sync {
    /// Produces a level for the request. May block.
    fn generate(&self, request: &LevelRequest) -> Result<LevelDescriptor, GenerationError>;

    /// Models the service can use.
    fn available_models(&self) -> Result<Vec<String>, GenerationError> {
        Ok(Vec::new())
    }
}

/// Generator that always answers with the offline level.
#[derive(Debug, Default)]
pub struct OfflineGenerator;

impl LevelGenerator for OfflineGenerator {
    fn generate(&self, request: &LevelRequest) -> Result<LevelDescriptor, GenerationError> {
        Ok(LevelDescriptor::fallback(request.mode))
    }
}

/// Lists models and picks the active one.
///
/// Keeps `configured` when the service offers it, otherwise takes the first
/// listed model.
pub fn discover_models(generator: &dyn LevelGenerator, configured: &str) -> (Vec<String>, String) {
    let models = match generator.available_models() {
        Ok(models) => models,
        Err(GenerationError::Offline) => Vec::new(),
        Err(e) => {
            log::warn!("GEN: Could not list models: {}", e);
            FALLBACK_MODELS.iter().map(|m| m.to_string()).collect()
        }
    };

    let active = match models.first() {
        Some(first) if !models.iter().any(|m| m == configured) => first.clone(),
        _ => configured.to_string(),
    };
    (models, active)
}
