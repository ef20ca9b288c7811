//! Display formatting helpers for weather values
//!
//! Everything here turns already-normalized values into strings or styles;
//! no unit math happens outside `TemperatureUnit::display`.

use chrono::{DateTime, Local, Timelike, Utc};
use ratatui::style::Color;

use crate::data::WeatherCondition;
use crate::prefs::{TemperatureUnit, Theme};

/// Formats a Celsius temperature in the selected display unit
pub fn format_temp(celsius: i32, unit: TemperatureUnit) -> String {
    format!("{}°", unit.display(celsius))
}

/// Formats a wind speed
pub fn format_wind(kph: i32) -> String {
    format!("{} km/h", kph)
}

/// Formats a visibility distance
pub fn format_visibility(km: i32) -> String {
    format!("{} km", km)
}

/// UV index level description
pub fn uv_level(uv_index: i32) -> &'static str {
    if uv_index < 3 {
        "Low"
    } else if uv_index < 6 {
        "Moderate"
    } else if uv_index < 8 {
        "High"
    } else if uv_index < 11 {
        "Very High"
    } else {
        "Extreme"
    }
}

/// Day label for the daily list: Today, Tomorrow, then short weekday names
pub fn day_name(timestamp: i64, index: usize) -> String {
    if index == 0 {
        return "Today".to_string();
    }
    if index == 1 {
        return "Tomorrow".to_string();
    }
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%a").to_string())
        .unwrap_or_else(|| "???".to_string())
}

/// Wall-clock `HH:MM` at the location for a Unix timestamp
///
/// Used for sunrise/sunset; the shift-then-read-as-UTC trick keeps the value
/// independent of the host timezone.
pub fn clock_time(timestamp: i64, timezone_offset: i32) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp + i64::from(timezone_offset), 0) {
        Some(shifted) => format!("{:02}:{:02}", shifted.hour(), shifted.minute()),
        None => "--:--".to_string(),
    }
}

/// Weather condition to icon mapping
pub fn condition_icon(condition: WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Clear => "\u{2600}",        // ☀
        WeatherCondition::Clouds => "\u{2601}",       // ☁
        WeatherCondition::Rain => "\u{1F327}",        // 🌧
        WeatherCondition::Drizzle => "\u{1F326}",     // 🌦
        WeatherCondition::Thunderstorm => "\u{26C8}", // ⛈
        WeatherCondition::Snow => "\u{2744}",         // ❄
        WeatherCondition::Mist => "\u{1F32B}",        // 🌫
        WeatherCondition::Fog => "\u{1F32B}",         // 🌫
    }
}

/// Accent color for a condition under the active theme
pub fn condition_color(condition: WeatherCondition, theme: Theme) -> Color {
    match theme {
        Theme::Dark => match condition {
            WeatherCondition::Clear => Color::Yellow,
            WeatherCondition::Clouds => Color::Gray,
            WeatherCondition::Rain | WeatherCondition::Drizzle => Color::LightBlue,
            WeatherCondition::Thunderstorm => Color::Magenta,
            WeatherCondition::Snow => Color::White,
            WeatherCondition::Mist | WeatherCondition::Fog => Color::DarkGray,
        },
        Theme::Light => match condition {
            WeatherCondition::Clear => Color::LightYellow,
            WeatherCondition::Clouds => Color::DarkGray,
            WeatherCondition::Rain | WeatherCondition::Drizzle => Color::Blue,
            WeatherCondition::Thunderstorm => Color::Magenta,
            WeatherCondition::Snow => Color::Cyan,
            WeatherCondition::Mist | WeatherCondition::Fog => Color::Gray,
        },
    }
}

/// Color for temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(temp_c: i32) -> Color {
    if temp_c >= 30 {
        Color::Red
    } else if temp_c >= 25 {
        Color::LightRed
    } else if temp_c >= 20 {
        Color::Yellow
    } else if temp_c >= 15 {
        Color::Green
    } else if temp_c >= 10 {
        Color::Cyan
    } else {
        Color::Blue
    }
}
