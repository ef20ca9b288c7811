//! Favorites screen UI
//!
//! Renders the saved locations list with the current selection highlighted.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the favorites screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Favorites ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    if app.prefs.favorites.is_empty() {
        render_empty_state(frame, chunks[0]);
    } else {
        render_list(frame, chunks[0], app);
    }

    let hints = " Enter load  d delete  Esc back  q quit";
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Renders the saved locations with the selection marker
fn render_list(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let lines: Vec<Line> = app
        .prefs
        .favorites
        .iter()
        .enumerate()
        .map(|(index, favorite)| {
            let selected = index == app.selected_favorite;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!("{}★ {}", marker, favorite.display_name),
                style,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the hint shown when no favorites are saved yet
fn render_empty_state(frame: &mut Frame, area: ratatui::layout::Rect) {
    let text = "No favorites yet. Load a city and press s to save it.";
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LocationMatch;
    use ratatui::{backend::TestBackend, Terminal};

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

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_favorites_empty_state() {
        let app = App::test_app();
        let content = render_to_string(&app);
        assert!(content.contains("No favorites yet"));
    }

    #[test]
    fn test_favorites_lists_saved_locations() {
        let mut app = App::test_app();
        app.prefs.add_favorite(&location("Vancouver"));
        app.prefs.add_favorite(&location("Tokyo"));

        let content = render_to_string(&app);
        assert!(content.contains("Vancouver, CA"));
        assert!(content.contains("Tokyo, CA"));
    }

    #[test]
    fn test_favorites_marks_selection() {
        let mut app = App::test_app();
        app.prefs.add_favorite(&location("Vancouver"));
        app.prefs.add_favorite(&location("Tokyo"));
        app.selected_favorite = 1;

        let content = render_to_string(&app);
        assert!(content.contains("> ★ Tokyo, CA"));
    }
}
