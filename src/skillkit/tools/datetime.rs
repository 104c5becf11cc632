//! Wall-clock time.

use chrono::Local;

/// `strftime` layout of the timestamps produced by [`DateTimePlugin`].
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reports the current local date and time.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimePlugin;

impl DateTimePlugin {
    pub fn new() -> Self {
        Self
    }

    /// Current local time as `YYYY-MM-DD HH:MM:SS`.
    pub fn get_current_datetime(&self) -> String {
        let formatted_time = Local::now().format(DATETIME_FORMAT).to_string();
        log::info!("Current time: {}", formatted_time);
        formatted_time
    }
}
