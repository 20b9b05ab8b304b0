use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, HitBox};
use crate::theme::ColorScheme;
use crate::view::{Body, ImageView, OverlayView, RowView, ScreenView};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ===============================
// Top-level draw
// ===============================

/// Draw `view` and report list/button geometry back to `app` for mouse input.
pub fn draw(f: &mut Frame, app: &mut App, view: &ScreenView, colors: &ColorScheme) {
    const MIN_WIDTH: u16 = 30;
    const MIN_HEIGHT: u16 = 8;

    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        app.clear_list_area();
        app.set_close_button(None);
        too_small(f, area, colors);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(2), // header
        Constraint::Min(0),    // body
        Constraint::Length(2), // footer
    ])
    .split(area);

    header(f, chunks[0], view, colors);
    match &view.body {
        Body::Progress { frame } => {
            app.clear_list_area();
            progress(f, chunks[1], *frame, colors);
        }
        Body::Error { message } => {
            app.clear_list_area();
            error_line(f, chunks[1], message, colors);
        }
        Body::List { rows, .. } => card_list(f, chunks[1], app, rows, colors),
    }
    footer(f, chunks[2], view, colors);

    // Overlay renders last
    let close = view.overlay.as_ref().map(|o| overlay(f, area, o, colors));
    app.set_close_button(close);
}

fn too_small(f: &mut Frame, area: Rect, colors: &ColorScheme) {
    let warning = Paragraph::new("Terminal too small!\nPlease resize.")
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.error).add_modifier(Modifier::BOLD));
    f.render_widget(Clear, area);
    f.render_widget(warning, area);
}

// ===============================
// Header / Footer
// ===============================
fn header(f: &mut Frame, area: Rect, view: &ScreenView, colors: &ColorScheme) {
    let title = Paragraph::new(Line::from(Span::styled(
        view.title.as_str(),
        Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(colors.border)),
    );
    f.render_widget(title, area);
}

fn footer(f: &mut Frame, area: Rect, view: &ScreenView, colors: &ColorScheme) {
    let key = Style::default().fg(colors.accent);
    let dim = Style::default().fg(colors.text_dim);

    let mut spans = vec![
        Span::styled("↑/↓", key),
        Span::styled(" move │ ", dim),
        Span::styled("Enter", key),
        Span::styled(" details │ ", dim),
        Span::styled("Esc", key),
        Span::styled(" close │ ", dim),
        Span::styled("q", key),
        Span::styled(" quit", dim),
    ];
    if !view.background.is_empty() {
        spans.push(Span::styled(format!(" │ bg {}", view.background), dim));
    }

    let w = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(colors.border)),
    );
    f.render_widget(w, area);
}

// ===============================
// Body
// ===============================
fn centered_row(area: Rect) -> Rect {
    let rows = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .split(area);
    rows[1]
}

fn progress(f: &mut Frame, area: Rect, frame: usize, colors: &ColorScheme) {
    let glyph = SPINNER[frame % SPINNER.len()];
    let p = Paragraph::new(Line::from(Span::styled(
        glyph,
        Style::default().fg(colors.spinner).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(p, centered_row(area));
}

fn error_line(f: &mut Frame, area: Rect, message: &str, colors: &ColorScheme) {
    let p = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(colors.error));
    f.render_widget(p, centered_row(area));
}

fn card_list(f: &mut Frame, area: Rect, app: &mut App, rows: &[RowView], colors: &ColorScheme) {
    let block = Block::default()
        .title(format!(" {} cards ", rows.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if rows.is_empty() {
        app.clear_list_area();
        let p = Paragraph::new("No cards")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.text_dim));
        f.render_widget(p, inner);
        return;
    }

    let offset = app.set_list_area(HitBox {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: inner.height,
    });

    let items: Vec<ListItem> = rows
        .iter()
        .map(|r| ListItem::new(r.label.as_str()).style(Style::default().fg(colors.text)))
        .collect();
    let list = List::new(items).highlight_style(
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default()
        .with_offset(offset)
        .with_selected(Some(app.cursor()));
    f.render_stateful_widget(list, inner, &mut state);
}

// ===============================
// Overlay
// ===============================

/// Draw the detail modal and return the hit box of its close control.
fn overlay(f: &mut Frame, area: Rect, o: &OverlayView, colors: &ColorScheme) -> HitBox {
    let width = ((area.width * 6) / 10).max(24).min(area.width);
    let height = 9u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal = Rect { x, y, width, height };

    f.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(colors.accent))
        .style(Style::default().bg(colors.background));
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    let text = Style::default().fg(colors.text);
    let image = match &o.image {
        ImageView::Uri(uri) => Line::from(vec![
            Span::styled("Image: ", text),
            Span::styled(uri.as_str(), Style::default().fg(colors.text_dim)),
        ]),
        ImageView::Placeholder(label) => Line::from(Span::styled(
            label.as_str(),
            Style::default().fg(colors.text_dim).add_modifier(Modifier::ITALIC),
        )),
    };
    let lines = vec![
        Line::from(Span::styled(
            o.title.as_str(),
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(o.type_line.as_str(), text)),
        Line::from(Span::styled(o.rarity_line.as_str(), text)),
        image,
    ];

    let parts = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        parts[0],
    );

    let label = format!("[ {} ]", o.close_label);
    let bw = (label.chars().count() as u16).min(parts[1].width);
    let button = Rect {
        x: parts[1].x + (parts[1].width.saturating_sub(bw)) / 2,
        y: parts[1].y,
        width: bw,
        height: parts[1].height,
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default()
                .fg(colors.selection_fg)
                .bg(colors.selection_bg)
                .add_modifier(Modifier::BOLD),
        )),
        button,
    );

    HitBox {
        x: button.x,
        y: button.y,
        width: button.width,
        height: button.height,
    }
}
