//! Tool definitions and implementations for the chat agent.

use crate::error::{Result, SvarError};
use crate::gemini::FunctionDeclaration;
use serde::{Deserialize, Serialize};
use serde_json::json;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HUB_MODELS_URL: &str = "https://huggingface.co/api/models";

/// Available tools for the chat agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Current weather conditions for a location.
    GetWeather { location: String },

    /// Most downloaded model for a Hugging Face Hub author.
    GetHubStats { author: String },
}

/// Parse a named function call with JSON arguments into a [`ToolCall`].
pub fn parse_tool_call(name: &str, args: &serde_json::Value) -> Result<ToolCall> {
    let mut fields = args.as_object().cloned().unwrap_or_default();
    fields.insert("name".to_string(), json!(name));
    serde_json::from_value(serde_json::Value::Object(fields))
        .map_err(|e| SvarError::Agent(format!("Unknown or malformed tool call '{}': {}", name, e)))
}

/// Function declarations advertised to the model.
pub fn tool_declarations() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration {
            name: "get_weather".to_string(),
            description: "Get current weather conditions for a location.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City or place name, e.g. 'Oslo'"
                    }
                },
                "required": ["location"]
            }),
        },
        FunctionDeclaration {
            name: "get_hub_stats".to_string(),
            description: "Get the most downloaded model for an author on the Hugging Face Hub."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "author": {
                        "type": "string",
                        "description": "Hub author or organization name, e.g. 'google'"
                    }
                },
                "required": ["author"]
            }),
        },
    ]
}

/// Tool execution context holding the shared HTTP client.
pub struct ToolContext {
    http: reqwest::Client,
}

impl ToolContext {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Execute a tool call and return the result as a string.
    ///
    /// Tool failures are rendered as output strings rather than errors, so
    /// the model can see what went wrong and carry on.
    pub async fn execute(&self, tool: &ToolCall) -> String {
        match tool {
            ToolCall::GetWeather { location } => match self.fetch_weather(location).await {
                Ok(report) => report,
                Err(e) => format!("Error fetching weather data: {}", e),
            },
            ToolCall::GetHubStats { author } => match self.fetch_hub_stats(author).await {
                Ok(stats) => stats,
                Err(e) => format!("Error fetching models for {}: {}", author, e),
            },
        }
    }

    /// Geocode the location, then fetch current conditions from Open-Meteo.
    async fn fetch_weather(&self, location: &str) -> Result<String> {
        let geo: serde_json::Value = self
            .http
            .get(GEOCODING_URL)
            .query(&[
                ("name", location),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(hit) = geo.get("results").and_then(|r| r.get(0)) else {
            return Ok(format!("Location '{}' not found.", location));
        };

        let lat = hit["latitude"].as_f64().unwrap_or_default();
        let lon = hit["longitude"].as_f64().unwrap_or_default();
        let city = hit["name"].as_str().unwrap_or(location);
        let country = hit["country"].as_str().unwrap_or("");

        let weather: serde_json::Value = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m"
                        .to_string(),
                ),
                ("temperature_unit", "celsius".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let current = &weather["current"];
        let condition = describe_weather_code(current["weather_code"].as_u64().unwrap_or(u64::MAX));
        let location_str = if country.is_empty() {
            city.to_string()
        } else {
            format!("{}, {}", city, country)
        };

        Ok(format!(
            "Weather in {}:\nCondition: {}\nTemperature: {}°C (feels like {}°C)\nHumidity: {}%\nWind Speed: {} km/h",
            location_str,
            condition,
            current["temperature_2m"],
            current["apparent_temperature"],
            current["relative_humidity_2m"],
            current["wind_speed_10m"],
        ))
    }

    /// Look up the most downloaded model for an author on the Hub.
    async fn fetch_hub_stats(&self, author: &str) -> Result<String> {
        let models: serde_json::Value = self
            .http
            .get(HUB_MODELS_URL)
            .query(&[
                ("author", author),
                ("sort", "downloads"),
                ("direction", "-1"),
                ("limit", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(model) = models.get(0) else {
            return Ok(format!("No models found for author {}.", author));
        };

        let id = model["id"]
            .as_str()
            .or_else(|| model["modelId"].as_str())
            .unwrap_or("unknown");
        let downloads = model["downloads"].as_u64().unwrap_or(0);

        Ok(format!(
            "The most downloaded model by {} is {} with {} downloads.",
            author,
            id,
            group_thousands(downloads)
        ))
    }
}

/// WMO weather interpretation codes used by Open-Meteo.
fn describe_weather_code(code: u64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Format a count with thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_call() {
        let tool = parse_tool_call("get_weather", &json!({"location": "Oslo"})).unwrap();
        assert_eq!(
            tool,
            ToolCall::GetWeather {
                location: "Oslo".to_string()
            }
        );

        let tool = parse_tool_call("get_hub_stats", &json!({"author": "google"})).unwrap();
        assert_eq!(
            tool,
            ToolCall::GetHubStats {
                author: "google".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_tool_fails() {
        assert!(parse_tool_call("teleport", &json!({})).is_err());
    }

    #[test]
    fn test_describe_weather_code() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(12345), "Unknown");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345678), "12,345,678");
    }
}
