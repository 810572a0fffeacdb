//! TUI rendering with ratatui

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, Screen};

/// Colors used in the UI
mod colors {
    use ratatui::style::Color;

    pub const TITLE: Color = Color::Cyan;
    pub const HIGHLIGHT_BG: Color = Color::DarkGray;
    pub const HELP_BAR_BG: Color = Color::DarkGray;
    pub const CONNECTED: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const DIM: Color = Color::DarkGray;
}

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    match &app.screen {
        Screen::Scanning => render_message(
            frame,
            chunks[0],
            " tvremote ",
            "Scanning for Apple TVs...",
            Style::default().fg(Color::White),
        ),
        Screen::Selecting(picker) => render_device_list(frame, chunks[0], picker),
        Screen::NoDevices => render_message(
            frame,
            chunks[0],
            " tvremote ",
            "No Apple TVs found.",
            Style::default().fg(colors::DIM),
        ),
        Screen::Connecting(device) => render_message(
            frame,
            chunks[0],
            " tvremote ",
            &format!("Connecting to {}...", device),
            Style::default().fg(Color::Yellow),
        ),
        Screen::Controlling { device, last_sent } => {
            render_control(frame, chunks[0], device, *last_sent)
        }
        Screen::Disconnected { device, error } => render_message(
            frame,
            chunks[0],
            " Disconnected ",
            &format!("Lost session with {}:\n{}", device, error),
            Style::default().fg(colors::ERROR),
        ),
    }

    render_help_bar(frame, app, chunks[1]);
}

/// Render a full-pane centered message
///
/// Long lines (backend error strings, for one) wrap instead of being cut
/// off, and the centered band is sized for the wrapped line count.
fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str, style: Style) {
    let inner_width = area.width.saturating_sub(2);
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::TITLE))
                .title(title)
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(
        paragraph,
        vertically_centered(area, wrapped_line_count(text, inner_width)),
    );
}

/// Lines the text occupies once wrapped to the given width
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum::<usize>() as u16
}

/// Render the discovered device list with the current highlight
fn render_device_list(frame: &mut Frame, area: Rect, picker: &tvremote_core::DevicePicker) {
    let items: Vec<ListItem> = picker
        .devices()
        .iter()
        .enumerate()
        .map(|(i, device)| {
            let line = Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(colors::DIM)),
                Span::raw(device.name.clone()),
                Span::styled(
                    format!(" ({})", device.address),
                    Style::default().fg(colors::DIM),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::TITLE))
                .title(" Available Apple TVs ")
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .highlight_style(
            Style::default()
                .bg(colors::HIGHLIGHT_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(picker.selected()));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the control screen
fn render_control(
    frame: &mut Frame,
    area: Rect,
    device: &tvremote_core::DeviceDescriptor,
    last_sent: Option<tvremote_core::Direction>,
) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Connected to: ", Style::default().fg(colors::DIM)),
            Span::styled(
                device.to_string(),
                Style::default()
                    .fg(colors::CONNECTED)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from("Use the arrow keys to navigate the Apple TV."),
    ];
    if let Some(direction) = last_sent {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Last command: ", Style::default().fg(colors::DIM)),
            Span::raw(direction.to_string()),
        ]));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::CONNECTED))
            .title(" Remote Control ")
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(paragraph, area);
}

/// Render the bottom help bar
fn render_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.screen {
        Screen::Scanning => "Scanning...",
        Screen::Selecting(_) => "Up/Down: Navigate | Enter: Connect | Ctrl+C: Quit",
        Screen::NoDevices | Screen::Disconnected { .. } => "Press any key to exit",
        Screen::Connecting(_) => "Connecting...",
        Screen::Controlling { .. } => "Arrows: Navigate | q/Esc: Quit",
    };

    let paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(Color::White).bg(colors::HELP_BAR_BG))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Shrink an area to a band tall enough for `content_height` lines,
/// vertically centered, keeping room for the border rows
fn vertically_centered(area: Rect, content_height: u16) -> Rect {
    let wanted = content_height.saturating_add(2).max(3);
    if area.height <= wanted {
        return area;
    }
    let top = (area.height - wanted) / 2;
    Rect::new(area.x, area.y + top, area.width, wanted)
}
