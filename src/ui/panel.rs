//! Quote panel rendering
//!
//! Draws the small bordered panel with the current quote at the app's
//! position, or a one-line hint when the panel is hidden.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};

/// Panel size in terminal cells
pub const PANEL_WIDTH: u16 = 44;
pub const PANEL_HEIGHT: u16 = 10;

/// Gap between the panel and the terminal's top-right corner
const PANEL_MARGIN: (u16, u16) = (2, 1);

/// Accent color of the panel border
const ACCENT: Color = Color::Rgb(0xC9, 0x40, 0x70);

/// Renders the quote panel
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if !app.visible {
        render_hidden_hint(frame, area);
        return;
    }

    let panel_area = panel_rect(app.position, area);
    frame.render_widget(Clear, panel_area);

    let tag = match app.state {
        AppState::Loading => "",
        AppState::Today => " today ",
        AppState::Preview => " preview ",
    };

    let block = Block::default()
        .title(Span::styled(
            " \u{201C} Daily Quote ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(tag, Style::default().fg(Color::DarkGray))).right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let inner = block.inner(panel_area);
    frame.render_widget(block, panel_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    match &app.quote {
        None => {
            let loading = Paragraph::new("Loading today's quote...")
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[0]);
        }
        Some(quote) => {
            let text = Paragraph::new(quote.text.as_str())
                .style(Style::default().add_modifier(Modifier::ITALIC))
                .wrap(Wrap { trim: true });
            frame.render_widget(text, chunks[0]);

            let author = Paragraph::new(format!("\u{2014} {}", quote.author))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Right);
            frame.render_widget(author, chunks[1]);
        }
    }

    let help = Paragraph::new("r random  t today  ? help")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

/// Starting position that puts the panel in the top-right corner
pub fn default_position(terminal_width: u16) -> (u16, u16) {
    let x = terminal_width.saturating_sub(PANEL_WIDTH + PANEL_MARGIN.0);
    (x, PANEL_MARGIN.1)
}

/// Places the panel at `position`, shifted back inside `area` if it would overflow
fn panel_rect(position: (u16, u16), area: Rect) -> Rect {
    let width = PANEL_WIDTH.min(area.width);
    let height = PANEL_HEIGHT.min(area.height);
    let x = position.0.min(area.width - width);
    let y = position.1.min(area.height - height);
    Rect::new(area.x + x, area.y + y, width, height)
}

fn render_hidden_hint(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Panel hidden. ", Style::default().fg(Color::DarkGray)),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::styled(" show  ", Style::default().fg(Color::DarkGray)),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(hint, line);
}
