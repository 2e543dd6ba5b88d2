//! wttr.in API client
//!
//! One endpoint: `GET https://wttr.in/{city}?format=j1`. The response is
//! converted into the display model straight away; raw payload structs never
//! leave this module.

use std::time::Duration;

use serde::Deserialize;

use crate::state::{CurrentConditions, ForecastDay, WeatherReport};

const API_HOST: &str = "https://wttr.in";
/// wttr.in serves HTML to unknown agents, so pretend to be a browser
const USER_AGENT: &str = "Mozilla/5.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// How many forecast days to keep
const FORECAST_DAYS: usize = 3;
/// Midday slot in wttr.in's 3-hourly buckets; its description represents
/// the whole day
const REPRESENTATIVE_HOUR: usize = 4;

// ============================================================================
// Errors
// ============================================================================

/// Fetch error type
#[derive(Debug)]
pub enum FetchError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    MalformedPayload(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(e) => write!(f, "Weather request failed: {}", e),
            FetchError::Status(code) => write!(f, "Weather service returned HTTP {}", code),
            FetchError::MalformedPayload(what) => {
                write!(f, "Unexpected weather payload: {}", what)
            }
        }
    }
}

impl std::error::Error for FetchError {}

// ============================================================================
// Raw payload
// ============================================================================

/// `?format=j1` response shape, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    date: String,
    #[serde(rename = "maxtempC")]
    maxtemp_c: String,
    #[serde(rename = "mintempC")]
    mintemp_c: String,
    #[serde(default)]
    hourly: Vec<WttrHourly>,
}

#[derive(Debug, Deserialize)]
struct WttrHourly {
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

fn desc_value(descs: &[WttrValue]) -> String {
    descs
        .first()
        .map(|d| d.value.trim().to_string())
        .unwrap_or_default()
}

/// Representative description for a day: midday slot, falling back to the
/// first hourly entry for short payloads
fn day_description(day: &WttrDay) -> String {
    day.hourly
        .get(REPRESENTATIVE_HOUR)
        .or_else(|| day.hourly.first())
        .map(|hour| desc_value(&hour.weather_desc))
        .unwrap_or_default()
}

fn report_from_response(city: &str, response: WttrResponse) -> Result<WeatherReport, FetchError> {
    let current = response
        .current_condition
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MalformedPayload("no current conditions".into()))?;

    let forecast = response
        .weather
        .iter()
        .take(FORECAST_DAYS)
        .map(|day| ForecastDay {
            date: day.date.clone(),
            description: day_description(day),
            max_temp_c: day.maxtemp_c.clone(),
            min_temp_c: day.mintemp_c.clone(),
        })
        .collect();

    Ok(WeatherReport {
        city: city.to_string(),
        current: CurrentConditions {
            description: desc_value(&current.weather_desc),
            temp_c: current.temp_c,
            humidity: current.humidity,
            wind_kmph: current.windspeed_kmph,
        },
        forecast,
    })
}

// ============================================================================
// Fetch
// ============================================================================

/// Fetch current weather and forecast for a city from wttr.in
pub async fn fetch_weather(city: &str) -> Result<WeatherReport, FetchError> {
    let url = format!("{}/{}?format=j1", API_HOST, urlencoding::encode(city));

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(FetchError::Request)?;

    let response = client.get(&url).send().await.map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let payload: WttrResponse = response.json().await.map_err(FetchError::Request)?;

    report_from_response(city, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(desc: &str) -> String {
        format!(r#"{{"weatherDesc":[{{"value":"{}"}}]}}"#, desc)
    }

    /// A trimmed-down j1 payload: full midday slot on day one, a short
    /// hourly array on day two
    fn sample_payload() -> String {
        let day_one_hours: Vec<String> = ["Clear", "Clear", "Sunny", "Sunny", "Light rain", "Sunny"]
            .iter()
            .map(|d| hourly(d))
            .collect();
        format!(
            r#"{{
                "current_condition": [{{
                    "temp_C": "18",
                    "humidity": "60",
                    "windspeedKmph": "10",
                    "weatherDesc": [{{"value": "Partly cloudy "}}]
                }}],
                "weather": [
                    {{
                        "date": "2026-08-29",
                        "maxtempC": "24",
                        "mintempC": "15",
                        "hourly": [{}]
                    }},
                    {{
                        "date": "2026-08-30",
                        "maxtempC": "21",
                        "mintempC": "13",
                        "hourly": [{}]
                    }},
                    {{
                        "date": "2026-08-31",
                        "maxtempC": "19",
                        "mintempC": "12",
                        "hourly": []
                    }},
                    {{
                        "date": "2026-09-01",
                        "maxtempC": "22",
                        "mintempC": "14",
                        "hourly": [{}]
                    }}
                ]
            }}"#,
            day_one_hours.join(","),
            hourly("Overcast"),
            hourly("Sunny"),
        )
    }

    #[test]
    fn test_report_from_sample_payload() {
        let payload: WttrResponse = serde_json::from_str(&sample_payload()).unwrap();
        let report = report_from_response("London", payload).unwrap();

        assert_eq!(report.city, "London");
        assert_eq!(report.current.temp_c, "18");
        assert_eq!(report.current.humidity, "60");
        assert_eq!(report.current.wind_kmph, "10");
        // Descriptions are trimmed
        assert_eq!(report.current.description, "Partly cloudy");
    }

    #[test]
    fn test_forecast_truncated_to_three_days() {
        let payload: WttrResponse = serde_json::from_str(&sample_payload()).unwrap();
        let report = report_from_response("London", payload).unwrap();

        assert_eq!(report.forecast.len(), 3);
        assert_eq!(report.forecast[0].date, "2026-08-29");
        assert_eq!(report.forecast[2].date, "2026-08-31");
    }

    #[test]
    fn test_representative_hour_is_midday_slot() {
        let payload: WttrResponse = serde_json::from_str(&sample_payload()).unwrap();
        let report = report_from_response("London", payload).unwrap();

        // Index 4 of day one is "Light rain", not the surrounding "Sunny"
        assert_eq!(report.forecast[0].description, "Light rain");
    }

    #[test]
    fn test_short_hourly_falls_back_to_first_entry() {
        let payload: WttrResponse = serde_json::from_str(&sample_payload()).unwrap();
        let report = report_from_response("London", payload).unwrap();

        // Day two has a single hourly bucket
        assert_eq!(report.forecast[1].description, "Overcast");
        // Day three has none at all
        assert_eq!(report.forecast[2].description, "");
    }

    #[test]
    fn test_each_day_keeps_its_own_temperatures() {
        let payload: WttrResponse = serde_json::from_str(&sample_payload()).unwrap();
        let report = report_from_response("London", payload).unwrap();

        assert_eq!(report.forecast[0].max_temp_c, "24");
        assert_eq!(report.forecast[0].min_temp_c, "15");
        assert_eq!(report.forecast[1].max_temp_c, "21");
        assert_eq!(report.forecast[2].min_temp_c, "12");
    }

    #[test]
    fn test_missing_current_condition_is_malformed() {
        let payload: WttrResponse =
            serde_json::from_str(r#"{"current_condition": [], "weather": []}"#).unwrap();

        let err = report_from_response("Nowhere", payload).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
        assert!(err.to_string().contains("current conditions"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Real j1 payloads carry dozens of extra fields
        let raw = r#"{
            "current_condition": [{
                "temp_C": "7",
                "temp_F": "45",
                "humidity": "80",
                "windspeedKmph": "22",
                "windspeedMiles": "14",
                "weatherDesc": [{"value": "Mist"}],
                "uvIndex": "1"
            }],
            "weather": [],
            "nearest_area": []
        }"#;

        let payload: WttrResponse = serde_json::from_str(raw).unwrap();
        let report = report_from_response("Oslo", payload).unwrap();
        assert_eq!(report.current.temp_c, "7");
        assert!(report.forecast.is_empty());
    }
}
