//! User preferences: theme, temperature unit, and favorite locations
//!
//! Preferences are plain values held by the application and persisted through
//! `PrefStore`, which is read once at startup and written on every change.
//! Nothing here is global state; the store is passed to whoever mutates.

mod store;

pub use store::PrefStore;

use serde::{Deserialize, Serialize};

use crate::data::LocationMatch;

/// UI color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Temperature unit used for display
///
/// Normalized weather data is always Celsius; Fahrenheit is a display-time
/// conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// The other unit
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Converts a Celsius value to this unit for display
    pub fn display(self, celsius: i32) -> i32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32,
        }
    }

    /// Unit symbol for display
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// A saved location
///
/// Serialized with camelCase keys (`displayName`) in the favorites file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteLocation {
    /// Primary place name, also the favorite's identity
    pub name: String,
    /// Full display name shown in the favorites list
    pub display_name: String,
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
}

impl From<&LocationMatch> for FavoriteLocation {
    fn from(location: &LocationMatch) -> Self {
        Self {
            name: location.name.clone(),
            display_name: location.display_name.clone(),
            lat: location.lat,
            lon: location.lon,
        }
    }
}

impl FavoriteLocation {
    /// Rebuilds a location suitable for a weather fetch
    ///
    /// Country/state are not persisted with favorites; the display name
    /// already carries them.
    pub fn to_location(&self) -> LocationMatch {
        LocationMatch {
            name: self.name.clone(),
            country: String::new(),
            state: None,
            lat: self.lat,
            lon: self.lon,
            display_name: self.display_name.clone(),
        }
    }
}

/// The full preference set held by the application
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    /// UI theme
    pub theme: Theme,
    /// Display temperature unit
    pub unit: TemperatureUnit,
    /// Saved locations, in the order they were added
    pub favorites: Vec<FavoriteLocation>,
}

impl Preferences {
    /// Whether a location name is saved as a favorite
    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite.name == name)
    }

    /// Adds a location to favorites unless it is already present
    pub fn add_favorite(&mut self, location: &LocationMatch) {
        if !self.is_favorite(&location.name) {
            self.favorites.push(FavoriteLocation::from(location));
        }
    }

    /// Removes a favorite by name
    pub fn remove_favorite(&mut self, name: &str) {
        self.favorites.retain(|favorite| favorite.name != name);
    }

    /// Toggles a location's favorite membership
    ///
    /// # Returns
    /// `true` if the location is a favorite after the toggle
    pub fn toggle_favorite(&mut self, location: &LocationMatch) -> bool {
        if self.is_favorite(&location.name) {
            self.remove_favorite(&location.name);
            false
        } else {
            self.add_favorite(location);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str) -> LocationMatch {
        LocationMatch {
            name: name.to_string(),
            country: "CA".to_string(),
            state: None,
            lat: 49.28,
            lon: -123.12,
            display_name: format!("{}, CA", name),
        }
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_theme_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_unit_toggle() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggled(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_unit_display_celsius_passthrough() {
        assert_eq!(TemperatureUnit::Celsius.display(22), 22);
        assert_eq!(TemperatureUnit::Celsius.display(-5), -5);
    }

    #[test]
    fn test_unit_display_fahrenheit_conversion() {
        assert_eq!(TemperatureUnit::Fahrenheit.display(0), 32);
        assert_eq!(TemperatureUnit::Fahrenheit.display(100), 212);
        // 22C = 71.6F, rounds to 72
        assert_eq!(TemperatureUnit::Fahrenheit.display(22), 72);
        // -40 is the crossover point
        assert_eq!(TemperatureUnit::Fahrenheit.display(-40), -40);
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(TemperatureUnit::Celsius.symbol(), "°C");
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
    }

    #[test]
    fn test_theme_serde_uses_lowercase_values() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, Theme::Light);
    }

    #[test]
    fn test_unit_serde_uses_lowercase_values() {
        assert_eq!(
            serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap(),
            "\"fahrenheit\""
        );
        let parsed: TemperatureUnit = serde_json::from_str("\"celsius\"").unwrap();
        assert_eq!(parsed, TemperatureUnit::Celsius);
    }

    #[test]
    fn test_add_favorite_ignores_duplicates() {
        let mut prefs = Preferences::default();
        prefs.add_favorite(&location("Vancouver"));
        prefs.add_favorite(&location("Vancouver"));
        assert_eq!(prefs.favorites.len(), 1);
    }

    #[test]
    fn test_remove_favorite_by_name() {
        let mut prefs = Preferences::default();
        prefs.add_favorite(&location("Vancouver"));
        prefs.add_favorite(&location("Tokyo"));

        prefs.remove_favorite("Vancouver");

        assert_eq!(prefs.favorites.len(), 1);
        assert!(!prefs.is_favorite("Vancouver"));
        assert!(prefs.is_favorite("Tokyo"));
    }

    #[test]
    fn test_toggle_favorite_roundtrip() {
        let mut prefs = Preferences::default();
        let vancouver = location("Vancouver");

        assert!(prefs.toggle_favorite(&vancouver));
        assert!(prefs.is_favorite("Vancouver"));

        assert!(!prefs.toggle_favorite(&vancouver));
        assert!(!prefs.is_favorite("Vancouver"));
    }

    #[test]
    fn test_favorites_preserve_insertion_order() {
        let mut prefs = Preferences::default();
        prefs.add_favorite(&location("Vancouver"));
        prefs.add_favorite(&location("Tokyo"));
        prefs.add_favorite(&location("Lisbon"));

        let names: Vec<&str> = prefs.favorites.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Vancouver", "Tokyo", "Lisbon"]);
    }

    #[test]
    fn test_favorite_to_location_keeps_coordinates_and_display() {
        let vancouver = location("Vancouver");
        let favorite = FavoriteLocation::from(&vancouver);
        let back = favorite.to_location();

        assert_eq!(back.name, "Vancouver");
        assert_eq!(back.display_name, "Vancouver, CA");
        assert!((back.lat - 49.28).abs() < f64::EPSILON);
        assert!((back.lon - (-123.12)).abs() < f64::EPSILON);
    }
}
