//! Mock weather lookup.

use rand::seq::SliceRandom;

/// Canned `(condition, °F)` pairs the forecast is drawn from.
const CONDITIONS: [(&str, i32); 4] = [
    ("Sunny", 72),
    ("Partly cloudy", 68),
    ("Rainy", 61),
    ("Overcast", 65),
];

fn format_forecast(condition: &str, temp: i32, city: &str) -> String {
    format!("{} and {}°F in {}", condition, temp, city)
}

/// Returns a plausible-looking (random) weather report for a city.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherPlugin;

impl WeatherPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Every report `get_weather` can produce for `city`.
    pub fn forecasts(&self, city: &str) -> Vec<String> {
        CONDITIONS
            .iter()
            .map(|&(condition, temp)| format_forecast(condition, temp, city))
            .collect()
    }

    /// Pick one of the canned reports for `city`.
    pub fn get_weather(&self, city: &str) -> String {
        let (condition, temp) = CONDITIONS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(CONDITIONS[0]);
        let weather = format_forecast(condition, temp, city);
        log::info!("Weather check: {}", weather);
        weather
    }
}
