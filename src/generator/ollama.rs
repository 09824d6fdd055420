//! HTTP client for an Ollama-style text generation service.

use super::extract::parse_level;
use super::{GenerationError, LevelGenerator, LevelRequest};
use crate::models::level::{GameMode, LevelDescriptor};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);
const LIST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Serialize, Debug)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateReply {
    #[serde(default)]
    response: String,
}

#[derive(Deserialize, Debug)]
struct TagsReply {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize, Debug)]
struct ModelTag {
    name: String,
}

fn agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

impl From<ureq::Error> for GenerationError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Timeout(_) => GenerationError::Timeout,
            other => GenerationError::Http(other.to_string()),
        }
    }
}

pub struct OllamaGenerator {
    base_url: String,
    agent: ureq::Agent,
    online: bool,
}

impl OllamaGenerator {
    /// Builds a client and probes the service once.
    pub fn connect(base_url: &str, request_timeout: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let online = agent(PROBE_TIMEOUT)
            .get(format!("{}/api/tags", base_url))
            .call()
            .is_ok();

        if online {
            log::info!("GEN: Connected to level generator at {}", base_url);
        } else {
            log::warn!("GEN: Level generator at {} unreachable, running offline", base_url);
        }

        Self {
            base_url,
            agent: agent(request_timeout),
            online,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }
}

impl LevelGenerator for OllamaGenerator {
    fn generate(&self, request: &LevelRequest) -> Result<LevelDescriptor, GenerationError> {
        if !self.online {
            return Err(GenerationError::Offline);
        }

        log::debug!(
            "GEN: Requesting '{}' level from {} ({})",
            request.theme,
            self.base_url,
            request.model
        );

        let body = GenerateBody {
            model: &request.model,
            prompt: build_prompt(&request.theme, request.mode),
            stream: false,
            format: "json",
        };

        let reply: GenerateReply = self
            .agent
            .post(format!("{}/api/generate", self.base_url))
            .send_json(&body)?
            .into_body()
            .read_json()
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let level = parse_level(&reply.response, request.mode)?;
        log::info!("GEN: Level synchronized: {}", level.name);
        Ok(level)
    }

    fn available_models(&self) -> Result<Vec<String>, GenerationError> {
        if !self.online {
            return Err(GenerationError::Offline);
        }

        let tags: TagsReply = agent(LIST_TIMEOUT)
            .get(format!("{}/api/tags", self.base_url))
            .call()?
            .into_body()
            .read_json()
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

fn build_prompt(theme: &str, mode: GameMode) -> String {
    format!(
        r#"You are a music engine. Create a JSON config for a rhythm game level.
Theme: '{theme}'
Game Mode: '{mode}' ({desc})

Rules:
1. 'speed': integer 6-12. (For OSU, this is circle shrink speed)
2. 'bpm': integer 80-160.
3. 'palette': RGB colors for bg, lane, note, hit.
4. 'introtext': A long-form cinematic introduction to this specific world (2-3 sentences).
5. 'flavor_text': A short atmospheric description.

Output ONLY raw JSON:
{{
    "palette": {{ "bg": [r,g,b], "lane": [r,g,b], "note": [r,g,b], "hit": [r,g,b] }},
    "speed": 8,
    "bpm": 128,
    "name": "World Name",
    "introtext": "The great servers once hummed with life...",
    "flavor_text": "Cryptic flavor here."
}}"#,
        theme = theme,
        mode = mode.label(),
        desc = mode.describe(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_theme_and_mode() {
        let prompt = build_prompt("sunken cathedral", GameMode::FreePlace);
        assert!(prompt.contains("Theme: 'sunken cathedral'"));
        assert!(prompt.contains("Game Mode: 'OSU'"));
        assert!(prompt.contains("\"bpm\": 128"));
    }

    #[test]
    fn unreachable_service_reports_offline() {
        // Port 9 (discard) on localhost is not an HTTP server.
        let generator = OllamaGenerator::connect("http://127.0.0.1:9/", Duration::from_secs(1));
        assert!(!generator.is_online());
        let request = LevelRequest {
            theme: "x".into(),
            mode: GameMode::Lanes2,
            model: "mistral".into(),
        };
        assert_eq!(generator.generate(&request), Err(GenerationError::Offline));
    }
}
