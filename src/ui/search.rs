//! City search screen UI
//!
//! Renders a centered input box for the search query, with any pending
//! error shown inline below it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the search screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    render_input_box(frame, chunks[1], app);
    render_hint_or_error(frame, chunks[2], app);
}

/// Renders the bordered query input with a cursor marker
fn render_input_box(frame: &mut Frame, area: Rect, app: &App) {
    let input_area = centered_horizontal(60, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Search city ");

    let line = Line::from(vec![
        Span::styled(
            app.search_input.clone(),
            Style::default().fg(Color::White),
        ),
        Span::styled("█", Style::default().fg(Color::Cyan)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), input_area);
}

/// Renders the key hint line, replaced by the error when one is pending
fn render_hint_or_error(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match &app.error {
        Some(error) => (error.clone(), Style::default().fg(Color::Red)),
        None => (
            "Type a city name, Enter to search, Esc to go back".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(Span::styled(text, style.add_modifier(Modifier::DIM)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Centers a fixed-width rect horizontally within `area`
fn centered_horizontal(width: u16, area: Rect) -> Rect {
    let side = area.width.saturating_sub(width) / 2;
    Rect {
        x: area.x + side,
        y: area.y,
        width: width.min(area.width),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_search_renders_title_and_hint() {
        let app = App::test_app();
        let content = render_to_string(&app);
        assert!(content.contains("Search city"));
        assert!(content.contains("Enter to search"));
    }

    #[test]
    fn test_search_renders_typed_query() {
        let mut app = App::test_app();
        app.search_input = "Vancouver".to_string();
        let content = render_to_string(&app);
        assert!(content.contains("Vancouver"));
    }

    #[test]
    fn test_search_shows_error_instead_of_hint() {
        let mut app = App::test_app();
        app.error = Some("Location \"xyzzy\" not found".to_string());
        let content = render_to_string(&app);
        assert!(content.contains("not found"));
        assert!(!content.contains("Enter to search"));
    }
}
