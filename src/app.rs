//! Application state management for Skycast
//!
//! This module contains the main application state, handling keyboard input,
//! fetch orchestration, preference changes, and transitions between the
//! search, dashboard, and favorites views.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::cli::StartupConfig;
use crate::data::{GeocodeClient, LocateClient, LocationMatch, WeatherClient, WeatherData};
use crate::fetch::{self, Clients, FetchMessage, FetchOutcome, FetchTarget};
use crate::prefs::{PrefStore, Preferences};

/// Capacity of the fetch completion channel
const FETCH_CHANNEL_CAPACITY: usize = 32;

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// City search input view
    Search,
    /// Main weather dashboard
    Dashboard,
    /// Saved favorites list
    Favorites,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// The most recently loaded weather, if any fetch ever succeeded
    pub weather: Option<WeatherData>,
    /// The location the weather belongs to
    pub location: Option<LocationMatch>,
    /// Inline error message from the last failed operation
    pub error: Option<String>,
    /// Whether a fetch is currently in flight
    pub loading: bool,
    /// User preferences (theme, unit, favorites)
    pub prefs: Preferences,
    /// Current text in the search input
    pub search_input: String,
    /// Index of the selected favorite in the favorites view
    pub selected_favorite: usize,
    /// Scroll offset into the hourly strip
    pub hourly_offset: usize,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of the last successful fetch
    pub last_refresh: Option<DateTime<Local>>,
    /// Preference persistence, absent when no config directory exists
    store: Option<PrefStore>,
    /// API clients handed to fetch tasks
    clients: Clients,
    /// Sender side of the fetch completion channel
    fetch_tx: mpsc::Sender<FetchMessage>,
    /// Receiver side of the fetch completion channel
    fetch_rx: mpsc::Receiver<FetchMessage>,
    /// Token of the most recently issued fetch; older completions are stale
    fetch_seq: u64,
}

impl App {
    /// Creates a new App instance from the startup configuration
    ///
    /// Loads preferences from disk and, when a startup city was given,
    /// immediately issues its fetch.
    pub fn new(config: StartupConfig) -> Self {
        let store = PrefStore::new();
        let prefs = store.as_ref().map(|s| s.load()).unwrap_or_default();
        Self::with_store(config, store, prefs)
    }

    /// Creates an App with an explicit store and preference set
    fn with_store(config: StartupConfig, store: Option<PrefStore>, mut prefs: Preferences) -> Self {
        if let Some(unit) = config.initial_unit {
            prefs.unit = unit;
        }

        let clients = Clients {
            weather: WeatherClient::new(config.api_key.clone()).with_shape(config.shape),
            geocode: GeocodeClient::new(config.api_key.clone()),
            locate: LocateClient::new(),
        };

        let (fetch_tx, fetch_rx) = mpsc::channel(FETCH_CHANNEL_CAPACITY);

        let mut app = Self {
            state: AppState::Search,
            weather: None,
            location: None,
            error: None,
            loading: false,
            prefs,
            search_input: String::new(),
            selected_favorite: 0,
            hourly_offset: 0,
            show_help: false,
            should_quit: false,
            last_refresh: None,
            store,
            clients,
            fetch_tx,
            fetch_rx,
            fetch_seq: 0,
        };

        if let Some(city) = config.initial_city {
            let target = target_for_query(city);
            app.begin_fetch(target);
            app.state = AppState::Dashboard;
        }

        app
    }

    /// Creates an App with no persistence for unit tests
    #[cfg(test)]
    pub fn test_app() -> Self {
        Self::with_store(StartupConfig::default(), None, Preferences::default())
    }

    /// Issues a new fetch, superseding any in-flight one
    fn begin_fetch(&mut self, target: FetchTarget) {
        self.fetch_seq += 1;
        self.loading = true;
        self.error = None;
        fetch::spawn_fetch(
            self.clients.clone(),
            self.fetch_tx.clone(),
            self.fetch_seq,
            target,
        );
    }

    /// Drains and applies any pending fetch completions
    ///
    /// Called once per event-loop tick.
    pub fn poll_fetch_messages(&mut self) {
        while let Ok(message) = self.fetch_rx.try_recv() {
            self.apply_fetch_message(message);
        }
    }

    /// Applies one fetch completion, discarding stale ones
    pub(crate) fn apply_fetch_message(&mut self, message: FetchMessage) {
        if message.seq != self.fetch_seq {
            // A newer fetch was issued after this one started; drop it.
            return;
        }

        self.loading = false;
        match message.outcome {
            FetchOutcome::Loaded { location, weather } => {
                self.location = Some(location);
                self.weather = Some(weather);
                self.error = None;
                self.hourly_offset = 0;
                self.last_refresh = Some(Local::now());
                self.state = AppState::Dashboard;
            }
            FetchOutcome::Failed { message } => {
                // Previously displayed weather stays in place; only the
                // error message changes.
                self.error = Some(message);
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` (outside Search): Quit the application
    /// - `/`: Open the search view
    /// - `f`: Open the favorites view
    /// - `r`: Refresh the current location
    /// - `g`: Fetch weather for the machine's own position
    /// - `u`: Toggle temperature unit
    /// - `t`: Toggle theme
    /// - `s`: Save/unsave the current location as a favorite
    /// - `h`/`l`, `←`/`→`: Scroll the hourly strip
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Search => self.handle_search_key(key_event),
            AppState::Dashboard => self.handle_dashboard_key(key_event),
            AppState::Favorites => self.handle_favorites_key(key_event),
        }
    }

    /// Key handling for the search view
    ///
    /// Characters feed the query; Enter submits; Esc returns to the
    /// dashboard (or quits when there is nothing to return to).
    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                if self.weather.is_some() {
                    self.state = AppState::Dashboard;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Enter => {
                let query = self.search_input.trim().to_string();
                if !query.is_empty() {
                    let target = target_for_query(query);
                    self.begin_fetch(target);
                    self.search_input.clear();
                    self.state = AppState::Dashboard;
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }

    /// Key handling for the dashboard view
    fn handle_dashboard_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') => {
                self.search_input.clear();
                self.state = AppState::Search;
            }
            KeyCode::Char('f') => {
                self.selected_favorite = 0;
                self.state = AppState::Favorites;
            }
            KeyCode::Char('r') => {
                if let Some(location) = self.location.clone() {
                    self.begin_fetch(FetchTarget::Location(location));
                }
            }
            KeyCode::Char('g') => {
                self.begin_fetch(FetchTarget::Geolocate);
            }
            KeyCode::Char('u') => {
                self.toggle_unit();
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
            }
            KeyCode::Char('s') => {
                self.toggle_current_favorite();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.hourly_offset = self.hourly_offset.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let max = self
                    .weather
                    .as_ref()
                    .map(|w| w.hourly.len().saturating_sub(1))
                    .unwrap_or(0);
                if self.hourly_offset < max {
                    self.hourly_offset += 1;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Key handling for the favorites view
    fn handle_favorites_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.state = if self.weather.is_some() {
                    AppState::Dashboard
                } else {
                    AppState::Search
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_favorite_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_favorite_selection_down();
            }
            KeyCode::Enter => {
                if let Some(favorite) = self.prefs.favorites.get(self.selected_favorite) {
                    let location = favorite.to_location();
                    self.begin_fetch(FetchTarget::Location(location));
                    self.state = AppState::Dashboard;
                }
            }
            KeyCode::Char('d') => {
                self.remove_selected_favorite();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    /// Moves the favorites selection up, wrapping to bottom if at top
    fn move_favorite_selection_up(&mut self) {
        let count = self.prefs.favorites.len();
        if count == 0 {
            return;
        }
        if self.selected_favorite == 0 {
            self.selected_favorite = count - 1;
        } else {
            self.selected_favorite -= 1;
        }
    }

    /// Moves the favorites selection down, wrapping to top if at bottom
    fn move_favorite_selection_down(&mut self) {
        let count = self.prefs.favorites.len();
        if count == 0 {
            return;
        }
        self.selected_favorite = (self.selected_favorite + 1) % count;
    }

    /// Removes the selected favorite and persists the list
    fn remove_selected_favorite(&mut self) {
        let Some(favorite) = self.prefs.favorites.get(self.selected_favorite) else {
            return;
        };
        let name = favorite.name.clone();
        self.prefs.remove_favorite(&name);

        if self.selected_favorite >= self.prefs.favorites.len() {
            self.selected_favorite = self.prefs.favorites.len().saturating_sub(1);
        }
        self.persist_favorites();
    }

    /// Toggles the display unit and persists the choice
    fn toggle_unit(&mut self) {
        self.prefs.unit = self.prefs.unit.toggled();
        if let Some(store) = &self.store {
            let _ = store.save_unit(self.prefs.unit);
        }
    }

    /// Toggles the theme and persists the choice
    fn toggle_theme(&mut self) {
        self.prefs.theme = self.prefs.theme.toggled();
        if let Some(store) = &self.store {
            let _ = store.save_theme(self.prefs.theme);
        }
    }

    /// Toggles favorite membership of the currently shown location
    fn toggle_current_favorite(&mut self) {
        let Some(location) = self.location.clone() else {
            return;
        };
        self.prefs.toggle_favorite(&location);
        self.persist_favorites();
    }

    /// Writes the favorites list through to disk
    fn persist_favorites(&self) {
        if let Some(store) = &self.store {
            let _ = store.save_favorites(&self.prefs.favorites);
        }
    }
}

/// Fetch target for a free-text query
///
/// A "lat,lon" pair (the direct-coordinates entry form) goes straight to a
/// reverse-geocoded coordinate fetch; anything else is a city search.
fn target_for_query(query: String) -> FetchTarget {
    match crate::cli::parse_coords(&query) {
        Some((lat, lon)) => FetchTarget::Coordinates { lat, lon },
        None => FetchTarget::City(query),
    }
}
