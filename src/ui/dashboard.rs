//! Weather dashboard screen UI
//!
//! Renders the main view for a loaded location: current conditions, a
//! details grid, the hourly strip with temperature sparkline, and the daily
//! forecast list.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{average_temperature, WeatherData};
use crate::ui::format::{
    clock_time, condition_color, condition_icon, day_name, format_temp, format_visibility,
    format_wind, temperature_color, uv_level,
};
use crate::ui::widgets::TempSparkline;

/// Color scheme for the dashboard
mod colors {
    use ratatui::style::Color;

    /// Section headers and borders
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Error messages
    pub const ERROR: Color = Color::Red;
    /// Alert banner
    pub const ALERT: Color = Color::LightRed;
    /// Loading indicator
    pub const LOADING: Color = Color::Yellow;
}

/// Hourly slots summarized by each average block
const SUMMARY_SLOT_COUNT: usize = 8;

/// Renders the dashboard screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let Some(weather) = app.weather.clone() else {
        render_placeholder(frame, area, app);
        return;
    };

    // Clamp the hourly cursor to the data we actually have
    let max_offset = weather.hourly.len().saturating_sub(1);
    if app.hourly_offset > max_offset {
        app.hourly_offset = max_offset;
    }

    let has_alert = !weather.alerts.is_empty();
    let has_error = app.error.is_some();

    let mut constraints = vec![Constraint::Length(1)]; // header
    if has_alert {
        constraints.push(Constraint::Length(1));
    }
    if has_error {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(7)); // current conditions
    constraints.push(Constraint::Length(6)); // hourly strip
    constraints.push(Constraint::Min(0)); // daily list
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut index = 0;
    render_header(frame, chunks[index], app);
    index += 1;

    if has_alert {
        render_alert_banner(frame, chunks[index], &weather);
        index += 1;
    }
    if has_error {
        render_error_line(frame, chunks[index], app);
        index += 1;
    }

    render_current(frame, chunks[index], app, &weather);
    render_hourly(frame, chunks[index + 1], app, &weather);
    render_daily(frame, chunks[index + 2], app, &weather);
    render_footer(frame, chunks[index + 3]);
}

/// Renders the view shown before any weather has loaded
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(area);

    let (text, style) = if app.loading {
        (
            "Loading weather...".to_string(),
            Style::default().fg(colors::LOADING),
        )
    } else if let Some(error) = &app.error {
        (error.clone(), Style::default().fg(colors::ERROR))
    } else {
        (
            "Press / to search for a city".to_string(),
            Style::default().fg(colors::SECONDARY),
        )
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, chunks[1]);
}

/// Renders the one-line header with location, refresh time, and unit
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let location = app
        .location
        .as_ref()
        .map(|l| l.display_name.clone())
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            format!(" {} ", location),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.prefs.unit.symbol().to_string(),
            Style::default().fg(colors::SECONDARY),
        ),
    ];

    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("  refreshed {}", refreshed.format("%H:%M")),
            Style::default().fg(colors::SECONDARY),
        ));
    }
    if app.loading {
        spans.push(Span::styled(
            "  fetching...",
            Style::default().fg(colors::LOADING),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the first active alert as a banner
fn render_alert_banner(frame: &mut Frame, area: Rect, weather: &WeatherData) {
    let Some(alert) = weather.alerts.first() else {
        return;
    };
    let text = format!(" ⚠ {} ({})", alert.event, alert.sender);
    let paragraph = Paragraph::new(text).style(
        Style::default()
            .fg(colors::ALERT)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

/// Renders the inline error line
fn render_error_line(frame: &mut Frame, area: Rect, app: &App) {
    let Some(error) = &app.error else {
        return;
    };
    let paragraph =
        Paragraph::new(format!(" {}", error)).style(Style::default().fg(colors::ERROR));
    frame.render_widget(paragraph, area);
}

/// Renders the current conditions card with the details grid
fn render_current(frame: &mut Frame, area: Rect, app: &App, weather: &WeatherData) {
    let current = &weather.current;
    let unit = app.prefs.unit;
    let accent = condition_color(current.condition, app.prefs.theme);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(" Current ");

    let star = if app
        .location
        .as_ref()
        .map(|l| app.prefs.is_favorite(&l.name))
        .unwrap_or(false)
    {
        " ★"
    } else {
        ""
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}", condition_icon(current.condition), format_temp(current.temp, unit)),
                Style::default()
                    .fg(temperature_color(current.temp))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}{}", current.description, star),
                Style::default().fg(accent),
            ),
        ]),
        Line::from(Span::styled(
            format!("Feels like {}", format_temp(current.feels_like, unit)),
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(Span::styled(
            format!(
                "Humidity {}%   Wind {}   Pressure {} hPa",
                current.humidity,
                format_wind(current.wind_kph),
                current.pressure
            ),
            Style::default().fg(colors::PRIMARY),
        )),
        Line::from(Span::styled(
            format!(
                "Visibility {}   UV {} ({})   Clouds {}%",
                format_visibility(current.visibility_km),
                current.uv_index,
                uv_level(current.uv_index),
                current.clouds
            ),
            Style::default().fg(colors::PRIMARY),
        )),
        Line::from(Span::styled(
            format!(
                "Sunrise {}   Sunset {}",
                clock_time(current.sunrise, weather.timezone_offset),
                clock_time(current.sunset, weather.timezone_offset)
            ),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the hourly strip: sparkline, cursor detail, and averages
fn render_hourly(frame: &mut Frame, area: Rect, app: &App, weather: &WeatherData) {
    let unit = app.prefs.unit;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(" Hourly ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if weather.hourly.is_empty() || inner.height < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let temps: Vec<i32> = weather.hourly.iter().map(|h| h.temp).collect();
    let sparkline = TempSparkline::new(&temps).current_position(app.hourly_offset);
    frame.render_widget(sparkline, rows[0]);

    if let Some(entry) = weather.hourly.get(app.hourly_offset) {
        let marker = if entry.is_current { " (now)" } else { "" };
        let detail = format!(
            "{}{}  {}  {} {}  rain {}%  wind {}",
            entry.label,
            marker,
            format_temp(entry.temp, unit),
            condition_icon(entry.condition),
            entry.condition.label(),
            entry.rain,
            format_wind(entry.wind_kph)
        );
        frame.render_widget(
            Paragraph::new(detail).style(Style::default().fg(colors::PRIMARY)),
            rows[1],
        );
    }

    let next = average_temperature(&weather.hourly, 0, SUMMARY_SLOT_COUNT);
    let later = average_temperature(&weather.hourly, SUMMARY_SLOT_COUNT, SUMMARY_SLOT_COUNT);
    let summary = format!(
        "Next hours avg {}   Later avg {}",
        format_temp(next, unit),
        format_temp(later, unit)
    );
    frame.render_widget(
        Paragraph::new(summary).style(Style::default().fg(colors::SECONDARY)),
        rows[2],
    );
}

/// Renders the daily forecast list
fn render_daily(frame: &mut Frame, area: Rect, app: &App, weather: &WeatherData) {
    let unit = app.prefs.unit;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(" Daily ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = weather
        .daily
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<9}", day_name(day.timestamp, index)),
                    Style::default().fg(colors::PRIMARY),
                ),
                Span::raw(format!("{}  ", condition_icon(day.condition))),
                Span::styled(
                    format!(
                        "{:>4} / {:<4}",
                        format_temp(day.temp_min, unit),
                        format_temp(day.temp_max, unit)
                    ),
                    Style::default().fg(temperature_color(day.temp_max)),
                ),
                Span::styled(
                    format!("  rain {:>3}%", day.rain),
                    Style::default().fg(colors::SECONDARY),
                ),
            ];
            if let Some(summary) = &day.summary {
                spans.push(Span::styled(
                    format!("  {}", summary),
                    Style::default().fg(condition_color(day.condition, app.prefs.theme)),
                ));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the one-line key hint footer
fn render_footer(frame: &mut Frame, area: Rect) {
    let hints =
        " / search  f favorites  r refresh  g locate  u unit  t theme  s save  ? help  q quit";
    let style = Style::default().fg(colors::SECONDARY);
    frame.render_widget(Paragraph::new(hints).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        CurrentConditions, DailyEntry, HourlyEntry, LocationMatch, WeatherAlert, WeatherCondition,
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_weather() -> WeatherData {
        WeatherData {
            current: CurrentConditions {
                temp: 22,
                feels_like: 24,
                condition: WeatherCondition::Clear,
                description: "clear sky".to_string(),
                humidity: 65,
                pressure: 1014,
                wind_kph: 13,
                visibility_km: 10,
                uv_index: 5,
                dew_point: 12,
                clouds: 10,
                sunrise: 1_721_045_000,
                sunset: 1_721_101_800,
            },
            hourly: (0..16)
                .map(|i| HourlyEntry {
                    timestamp: 1_721_045_000 + (i as i64) * 10_800,
                    label: format!("{:02}:00", (8 + 3 * i) % 24),
                    temp: 18 + (i % 5) as i32,
                    condition: WeatherCondition::Clear,
                    rain: (i * 5) as u8,
                    wind_kph: 10,
                    is_current: i == 0,
                })
                .collect(),
            daily: vec![
                DailyEntry {
                    timestamp: 1_721_045_000,
                    temp_min: 14,
                    temp_max: 24,
                    condition: WeatherCondition::Clear,
                    rain: 10,
                    summary: None,
                },
                DailyEntry {
                    timestamp: 1_721_131_400,
                    temp_min: 13,
                    temp_max: 21,
                    condition: WeatherCondition::Rain,
                    rain: 70,
                    summary: Some("Showers in the afternoon".to_string()),
                },
            ],
            timezone_offset: -25_200,
            alerts: Vec::new(),
        }
    }

    fn loaded_app() -> App {
        let mut app = App::test_app();
        app.weather = Some(sample_weather());
        app.location = Some(LocationMatch {
            name: "Vancouver".to_string(),
            country: "CA".to_string(),
            state: None,
            lat: 49.28,
            lon: -123.12,
            display_name: "Vancouver, CA".to_string(),
        });
        app
    }

    fn render_to_string(app: &mut App) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_dashboard_renders_location_and_sections() {
        let mut app = loaded_app();
        let content = render_to_string(&mut app);

        assert!(content.contains("Vancouver, CA"));
        assert!(content.contains("Current"));
        assert!(content.contains("Hourly"));
        assert!(content.contains("Daily"));
        assert!(content.contains("22°"));
        assert!(content.contains("clear sky"));
        assert!(content.contains("Today"));
        assert!(content.contains("Tomorrow"));
    }

    #[test]
    fn test_dashboard_renders_fahrenheit_when_selected() {
        use crate::prefs::TemperatureUnit;
        let mut app = loaded_app();
        app.prefs.unit = TemperatureUnit::Fahrenheit;

        let content = render_to_string(&mut app);
        // 22C = 72F
        assert!(content.contains("72°"));
    }

    #[test]
    fn test_dashboard_placeholder_prompts_for_search() {
        let mut app = App::test_app();
        let content = render_to_string(&mut app);
        assert!(content.contains("Press / to search"));
    }

    #[test]
    fn test_dashboard_placeholder_shows_loading() {
        let mut app = App::test_app();
        app.loading = true;
        let content = render_to_string(&mut app);
        assert!(content.contains("Loading weather"));
    }

    #[test]
    fn test_dashboard_placeholder_shows_first_fetch_error() {
        let mut app = App::test_app();
        app.error = Some("Location \"xyzzy\" not found".to_string());
        let content = render_to_string(&mut app);
        assert!(content.contains("not found"));
    }

    #[test]
    fn test_dashboard_shows_error_above_kept_weather() {
        let mut app = loaded_app();
        app.error = Some("Network is down".to_string());
        let content = render_to_string(&mut app);

        assert!(content.contains("Network is down"));
        assert!(content.contains("22°"), "Old weather stays visible");
    }

    #[test]
    fn test_dashboard_renders_alert_banner() {
        let mut app = loaded_app();
        if let Some(weather) = app.weather.as_mut() {
            weather.alerts.push(WeatherAlert {
                sender: "Environment Canada".to_string(),
                event: "Wind Warning".to_string(),
                start: 0,
                end: 0,
                description: "Strong winds".to_string(),
            });
        }
        let content = render_to_string(&mut app);
        assert!(content.contains("Wind Warning"));
    }

    #[test]
    fn test_dashboard_clamps_hourly_cursor() {
        let mut app = loaded_app();
        app.hourly_offset = 999;
        let _ = render_to_string(&mut app);
        assert_eq!(app.hourly_offset, 15);
    }

    #[test]
    fn test_dashboard_marks_saved_location() {
        let mut app = loaded_app();
        let location = app.location.clone().unwrap();
        app.prefs.add_favorite(&location);
        let content = render_to_string(&mut app);
        assert!(content.contains('★'));
    }
}
