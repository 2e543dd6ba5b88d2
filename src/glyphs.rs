//! Condition-to-glyph classification
//!
//! Weather descriptions are free-form strings ("Patchy light rain in area
//! with thunder"), so classification is an ordered keyword table evaluated
//! first-match-wins rather than a cascade of conditionals.

pub const SUN: &str = "☀️";
pub const CLOUD: &str = "☁️";
pub const RAIN: &str = "🌧";
pub const STORM: &str = "⛈";
pub const SNOW: &str = "❄️";
pub const FOG: &str = "🌫";
/// Fallback when no keyword matches
pub const THERMOMETER: &str = "🌡";

/// Ordered rules; earlier entries win. "sun"/"clear" deliberately outranks
/// "cloud" so "Sunny intervals with cloud" reads as sun.
const RULES: &[(&[&str], &str)] = &[
    (&["sun", "clear"], SUN),
    (&["cloud"], CLOUD),
    (&["rain"], RAIN),
    (&["storm", "thunder"], STORM),
    (&["snow"], SNOW),
    (&["fog", "mist"], FOG),
];

/// Map a condition description to its emoji glyph
pub fn classify(description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(THERMOMETER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_and_clear() {
        assert_eq!(classify("Sunny"), SUN);
        assert_eq!(classify("Clear"), SUN);
        assert_eq!(classify("CLEAR SKY"), SUN);
    }

    #[test]
    fn test_cloud() {
        assert_eq!(classify("Partly cloudy"), CLOUD);
        assert_eq!(classify("Overcast clouds"), CLOUD);
    }

    #[test]
    fn test_rain_beats_later_storm() {
        // "rain" is listed before "storm"/"thunder", so mixed descriptions
        // classify as rain
        assert_eq!(classify("Light rain"), RAIN);
        assert_eq!(classify("Patchy rain with thunder"), RAIN);
        assert_eq!(classify("Moderate RAIN"), RAIN);
    }

    #[test]
    fn test_storm_without_rain() {
        assert_eq!(classify("Thundery outbreaks"), STORM);
        assert_eq!(classify("Storm"), STORM);
    }

    #[test]
    fn test_snow_and_fog() {
        assert_eq!(classify("Light snow showers"), SNOW);
        assert_eq!(classify("Freezing fog"), FOG);
        assert_eq!(classify("Mist"), FOG);
    }

    #[test]
    fn test_sun_beats_cloud() {
        assert_eq!(classify("Sunny with cloud cover"), SUN);
    }

    #[test]
    fn test_default_glyph() {
        assert_eq!(classify("Blowing widespread dust"), THERMOMETER);
        assert_eq!(classify(""), THERMOMETER);
    }
}
