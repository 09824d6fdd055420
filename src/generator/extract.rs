//! Pulling a level out of free-form generator text.
//!
//! Replies are untrusted: the model may wrap the JSON in prose or code
//! fences, or return something that is not a level at all.

use super::GenerationError;
use crate::models::level::{GameMode, LevelDescriptor, LevelPayload};

/// Returns the span from the first `{` to the last `}`, if any.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parses generator text into a descriptor for `mode`.
pub fn parse_level(raw: &str, mode: GameMode) -> Result<LevelDescriptor, GenerationError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| GenerationError::Malformed("no JSON object in reply".to_string()))?;
    let payload: LevelPayload =
        serde_json::from_str(json).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    Ok(payload.into_descriptor(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_wrapped_in_prose() {
        let raw = "Sure! Here is your level:\n```json\n{\"bpm\": 140, \"name\": \"Neon\"}\n```\nEnjoy";
        assert_eq!(
            extract_json_object(raw),
            Some("{\"bpm\": 140, \"name\": \"Neon\"}")
        );
    }

    #[test]
    fn parses_full_reply() {
        let raw = r#"{
            "palette": { "bg": [1,2,3], "lane": [4,5,6], "note": [7,8,9], "hit": [10,11,12] },
            "speed": 9,
            "bpm": 128,
            "name": "Glass Tundra",
            "introtext": "Ice sings.",
            "flavor_text": "Cold."
        }"#;
        let level = parse_level(raw, GameMode::Lanes4).unwrap();
        assert_eq!(level.name, "Glass Tundra");
        assert_eq!(level.tempo_bpm, 128);
        assert_eq!(level.scroll_speed, 9);
        assert_eq!(level.palette.hit, [10, 11, 12]);
        assert_eq!(level.mode, GameMode::Lanes4);
    }

    #[test]
    fn rejects_text_without_object() {
        assert!(matches!(
            parse_level("no level today", GameMode::Lanes2),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            parse_level("} backwards {", GameMode::Lanes2),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_wrong_field_types() {
        assert!(matches!(
            parse_level(r#"{"bpm": "fast"}"#, GameMode::Lanes2),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            parse_level(r#"{"palette": {"bg": [300, 0, 0]}}"#, GameMode::Lanes2),
            Err(GenerationError::Malformed(_))
        ));
    }
}
