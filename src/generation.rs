//! Itinerary generation via an OpenAI-compatible chat endpoint
//!
//! The language model is asked for a JSON object mapping day labels to
//! arrays of `{name, description}` places. The response is parsed through
//! a validating step: anything that is not valid JSON of that shape is a
//! [`TripWeaverError::GenerationParse`] and fails the whole planning
//! request — there is no silent defaulting.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::GenerationConfig;
use crate::models::PlaceSeed;
use crate::{Result, TripWeaverError};

/// One generated trip day: label plus places in generation order
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDay {
    pub label: String,
    pub places: Vec<PlaceSeed>,
}

/// The validated generation output, days in the response's key order
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedItinerary {
    pub days: Vec<GeneratedDay>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Build the generation prompt for a trip.
///
/// Asks for day-wise must-visit places as a JSON object with 3 places per
/// day, each carrying a name and a short description.
#[must_use]
pub fn build_prompt(location: &str, num_days: u32, hotel_address: &str) -> String {
    format!(
        r#"You have to plan a {num_days}-day trip to {location}, starting from the hotel at {hotel_address},
generate a JSON object with 'Must-Visit' places day-wise, with a short description for each. Only give JSON as output. Give 3 places for each day.

Example output format(JSON):
{{"Day 1": [{{"name": "",
    "description": ""}},
    {{"name": "",
    "description": ""}},
    {{"name": "",
    "description": ""}}], ...
}}
"#
    )
}

/// Client for the itinerary-generation service
pub struct GenerationClient {
    client: Client,
    config: GenerationConfig,
}

impl GenerationClient {
    /// Create a new client from the generation configuration
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripWeaver/0.1.0")
            .build()
            .map_err(|e| TripWeaverError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Generate a day-wise itinerary for the given trip parameters
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        location: &str,
        num_days: u32,
        hotel_address: &str,
    ) -> Result<GeneratedItinerary> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            TripWeaverError::config("Generation API key is required to generate an itinerary")
        })?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "system",
                content: build_prompt(location, num_days, hotel_address),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TripWeaverError::network(format!("Generation request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(TripWeaverError::network(format!(
                "Generation API returned HTTP {}",
                response.status()
            )));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            TripWeaverError::network(format!("Failed to parse generation response: {e}"))
        })?;

        let content = chat
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| {
                TripWeaverError::generation_parse("Generation response contains no choices")
            })?;

        let itinerary = parse_generation(content)?;
        info!(
            "Generated itinerary with {} days for '{}'",
            itinerary.days.len(),
            location
        );
        Ok(itinerary)
    }
}

/// Parse and validate raw generation output.
///
/// The expected shape is a JSON object whose keys are day labels and whose
/// values are arrays of objects with string `name` and `description`
/// fields. Key order is preserved and becomes the trip's day order.
pub fn parse_generation(raw: &str) -> Result<GeneratedItinerary> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| TripWeaverError::generation_parse(format!("Invalid JSON: {e}")))?;

    let Value::Object(day_map) = value else {
        return Err(TripWeaverError::generation_parse(
            "Expected a JSON object mapping day labels to place arrays",
        ));
    };

    if day_map.is_empty() {
        return Err(TripWeaverError::generation_parse(
            "Generation output contains no days",
        ));
    }

    let mut days = Vec::with_capacity(day_map.len());
    for (label, day_value) in day_map {
        let Value::Array(entries) = day_value else {
            return Err(TripWeaverError::generation_parse(format!(
                "Value for '{label}' is not an array of places"
            )));
        };

        if entries.is_empty() {
            return Err(TripWeaverError::generation_parse(format!(
                "'{label}' contains no places"
            )));
        }

        let mut places = Vec::with_capacity(entries.len());
        for entry in entries {
            let Value::Object(fields) = entry else {
                return Err(TripWeaverError::generation_parse(format!(
                    "'{label}' contains a non-object place entry"
                )));
            };

            let name = fields.get("name").and_then(Value::as_str).ok_or_else(|| {
                TripWeaverError::generation_parse(format!(
                    "A place in '{label}' is missing the string field 'name'"
                ))
            })?;
            let description = fields
                .get("description")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    TripWeaverError::generation_parse(format!(
                        "A place in '{label}' is missing the string field 'description'"
                    ))
                })?;

            places.push(PlaceSeed::new(name, description));
        }

        days.push(GeneratedDay { label, places });
    }

    Ok(GeneratedItinerary { days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VALID_TWO_DAYS: &str = r#"{
        "Day 1": [
            {"name": "Central Park", "description": "A big green space"},
            {"name": "The Met", "description": "World-class art museum"},
            {"name": "Times Square", "description": "Bright lights"}
        ],
        "Day 2": [
            {"name": "Brooklyn Bridge", "description": "Iconic crossing"},
            {"name": "DUMBO", "description": "Waterfront views"},
            {"name": "Prospect Park", "description": "Brooklyn's backyard"}
        ]
    }"#;

    #[test]
    fn test_parse_valid_generation() {
        let itinerary = parse_generation(VALID_TWO_DAYS).unwrap();
        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.days[0].label, "Day 1");
        assert_eq!(itinerary.days[0].places.len(), 3);
        assert_eq!(itinerary.days[0].places[0].name, "Central Park");
        assert_eq!(itinerary.days[1].places[2].description, "Brooklyn's backyard");
    }

    #[test]
    fn test_parse_preserves_day_order() {
        // Keys that would reorder under lexicographic sorting
        let raw = r#"{
            "Day 2": [{"name": "B", "description": "b"}],
            "Day 10": [{"name": "C", "description": "c"}],
            "Day 1": [{"name": "A", "description": "a"}]
        }"#;
        let itinerary = parse_generation(raw).unwrap();
        let labels: Vec<_> = itinerary.days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Day 2", "Day 10", "Day 1"]);
    }

    #[rstest]
    #[case::not_json("not json at all")]
    #[case::array_instead_of_object(r#"[{"name": "A", "description": "a"}]"#)]
    #[case::day_value_not_array(r#"{"Day 1": {"name": "A", "description": "a"}}"#)]
    #[case::place_not_object(r#"{"Day 1": ["just a string"]}"#)]
    #[case::missing_description(r#"{"Day 1": [{"name": "A"}]}"#)]
    #[case::missing_name(r#"{"Day 1": [{"description": "a"}]}"#)]
    #[case::non_string_name(r#"{"Day 1": [{"name": 3, "description": "a"}]}"#)]
    #[case::empty_object("{}")]
    #[case::empty_day(r#"{"Day 1": []}"#)]
    fn test_parse_rejects_malformed_output(#[case] raw: &str) {
        let result = parse_generation(raw);
        assert!(matches!(
            result,
            Err(TripWeaverError::GenerationParse { .. })
        ));
    }

    #[test]
    fn test_build_prompt_mentions_trip_parameters() {
        let prompt = build_prompt("New York City, New York, USA", 2, "350 W 39th St");
        assert!(prompt.contains("2-day trip"));
        assert!(prompt.contains("New York City, New York, USA"));
        assert!(prompt.contains("350 W 39th St"));
        assert!(prompt.contains("Only give JSON as output"));
        assert!(prompt.contains("3 places for each day"));
    }
}
