//! UI rendering

use mash_core::format;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::Stylize,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

const TAGLINE: &str = "A customizable command launcher\nfor storing and executing commands";

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    if app.show_intro {
        draw_intro(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(2), // Status
            Constraint::Min(0),    // List
            Constraint::Length(2), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_status(f, app, chunks[1]);
    draw_list(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(" mash ", app.styles.root)));
    f.render_widget(header, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let controller = &app.controller;
    let line = if controller.is_filtering() || !controller.filter_text().is_empty() {
        let mut spans = vec![
            Span::styled("Filter: ", app.styles.key_hint),
            Span::raw(controller.filter_text().to_string()),
        ];
        if controller.is_filtering() {
            spans.push(Span::styled("_", app.styles.muted));
        }
        spans.push(Span::styled(
            format!(
                "  {} of {}",
                controller.visible_len(),
                format::count(controller.total(), "item")
            ),
            app.styles.muted,
        ));
        Line::from(spans)
    } else {
        Line::from(Span::styled(
            format::count(controller.total(), "item"),
            app.styles.muted,
        ))
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_list(f: &mut Frame, app: &mut App, area: Rect) {
    if app.controller.visible_len() == 0 {
        let empty = Paragraph::new(Span::styled("No items.", app.styles.muted));
        f.render_widget(empty, area);
        return;
    }

    let cursor = app.controller.cursor();
    let width = area.width.saturating_sub(2) as usize;
    let styles = &app.styles;

    let items: Vec<ListItem> = app
        .visible_entries()
        .enumerate()
        .map(|(pos, entry)| {
            let selected = pos == cursor;
            let (gutter, title_style, desc_style) = if selected {
                (
                    Span::styled("│ ", styles.selected_title),
                    styles.selected_title,
                    styles.selected_description,
                )
            } else {
                (Span::raw("  "), styles.title, styles.description)
            };

            let mut title = entry.title_line(title_style, styles);
            title.spans.insert(0, gutter.clone());

            let description = Line::from(vec![
                gutter,
                Span::styled(format::truncate(entry.description, width), desc_style),
            ]);

            ListItem::new(Text::from(vec![title, description]))
        })
        .collect();

    let list = List::new(items);
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = app.styles.key_hint;
    let help = if app.controller.is_filtering() {
        Line::from(vec![
            Span::styled("enter", hint),
            Span::raw(" apply  "),
            Span::styled("esc", hint),
            Span::raw(" clear  "),
            Span::styled("q", hint),
            Span::raw(" quit"),
        ])
    } else {
        Line::from(vec![
            Span::styled("↑/k", hint),
            Span::raw(" up  "),
            Span::styled("↓/j", hint),
            Span::raw(" down  "),
            Span::styled("/", hint),
            Span::raw(" filter  "),
            Span::styled("enter", hint),
            Span::raw(" run  "),
            Span::styled("q", hint),
            Span::raw(" quit"),
        ])
    };

    let footer = Paragraph::new(vec![Line::from(""), help]).style(app.styles.muted);
    f.render_widget(footer, area);
}

fn draw_intro(f: &mut Frame, app: &App) {
    let area = centered(f.area(), 42, 8);

    let mut text = vec![
        Line::from(Span::styled(" mash ", app.styles.root)).centered(),
        Line::from(""),
    ];
    text.extend(TAGLINE.lines().map(|l| Line::from(l).centered()));
    text.push(Line::from(""));
    text.push(
        Line::from(Span::styled("press any key", app.styles.muted.italic())).centered(),
    );

    let card = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(app.styles.enumerator),
    );

    f.render_widget(card, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
