//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state
//! ([`App`]) and input handling ([`crate::input`]). The layout is four
//! rows: a tab bar, the active tab's body, the one-line notification
//! region, and a hint line that doubles as the text-entry prompt and
//! confirmation question.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Mode, Tab};
use crate::notify::Kind;

/// Draw the complete UI for one frame.
pub fn draw(app: &App, frame: &mut Frame) {
    let [tabs_area, body_area, notice_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tab_bar(app, frame, tabs_area);
    match app.tab {
        Tab::Status => draw_status_tab(app, frame, body_area),
        Tab::Display => draw_display_tab(app, frame, body_area),
        Tab::Content => draw_content_tab(app, frame, body_area),
        Tab::Rss => draw_rss_tab(app, frame, body_area),
        Tab::Feeds => draw_feeds_tab(app, frame, body_area),
    }
    draw_notice(app, frame, notice_area);
    draw_hint_line(app, frame, hint_area);
}

fn draw_tab_bar(app: &App, frame: &mut Frame, area: Rect) {
    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Render rows as a list with the cursor row highlighted.
fn draw_rows(frame: &mut Frame, area: Rect, title: &str, rows: Vec<Line>, cursor: usize) {
    let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_tab(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Current time   ", Style::default().fg(Color::DarkGray)),
            Span::styled(&app.time_text, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Free memory    ", Style::default().fg(Color::DarkGray)),
            Span::raw(&app.free_memory),
        ]),
        Line::from(vec![
            Span::styled("WiFi           ", Style::default().fg(Color::DarkGray)),
            Span::raw(&app.wifi),
        ]),
    ];
    if let Some(refreshed) = app.status_refreshed {
        lines.push(Line::from(Span::styled(
            format!("refreshed {}", refreshed.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Device status ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn field_row<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<24}"), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn draw_display_tab(app: &App, frame: &mut Frame, area: Rect) {
    let form = &app.display;
    let rows = vec![
        field_row("Brightness", form.brightness.clone()),
        field_row("Scroll speed", form.scroll_speed.clone()),
        field_row("Scroll direction", form.scroll_direction.clone()),
        field_row("Panel type", form.panel_type.clone()),
        field_row("Font type", form.font_type.clone()),
        field_row("Animation type", form.animation_type.clone()),
        field_row("Animation", checkbox(form.animation_enabled).to_string()),
    ];
    draw_rows(frame, area, " Display settings ", rows, app.display_cursor);
}

fn draw_content_tab(app: &App, frame: &mut Frame, area: Rect) {
    let flags = &app.content;
    let rows = vec![
        field_row("Time", checkbox(flags.time).to_string()),
        field_row("Date", checkbox(flags.date).to_string()),
        field_row("RSS headlines", checkbox(flags.rss).to_string()),
        field_row("Quotes", checkbox(flags.quotes).to_string()),
        field_row("Facts", checkbox(flags.facts).to_string()),
    ];
    draw_rows(frame, area, " Scroll content ", rows, app.content_cursor);
}

fn draw_rss_tab(app: &App, frame: &mut Frame, area: Rect) {
    let form = &app.rss;
    let rows = vec![
        field_row("Fetch interval (s)", form.fetch_interval.clone()),
        field_row("Max news age (h)", form.max_news_age_hours.clone()),
        field_row("Max headlines per feed", form.max_headlines_per_feed.clone()),
        field_row("Timezone", form.timezone.clone()),
    ];
    draw_rows(frame, area, " RSS settings ", rows, app.rss_cursor);
}

fn draw_feeds_tab(app: &App, frame: &mut Frame, area: Rect) {
    let rows: Vec<Line> = app
        .feeds
        .iter()
        .map(|feed| {
            let name_style = if feed.enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::raw(checkbox(feed.enabled)),
                Span::raw(" "),
                Span::styled(format!("{:<20}", feed.name), name_style),
                Span::raw(" "),
                Span::styled(feed.url.clone(), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();
    draw_rows(frame, area, " RSS feeds ", rows, app.feed_cursor);
}

fn draw_notice(app: &App, frame: &mut Frame, area: Rect) {
    let Some(notice) = app.notifier.current() else {
        return;
    };
    let style = match notice.kind {
        Kind::Success => Style::default().fg(Color::Green),
        Kind::Error => Style::default().fg(Color::Red),
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {}", notice.text), style)));
    frame.render_widget(paragraph, area);
}

fn draw_hint_line(app: &App, frame: &mut Frame, area: Rect) {
    let line = match &app.mode {
        Mode::Input { target, buffer } => Line::from(vec![
            Span::styled(
                format!(" {}: ", target.prompt()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(format!("{buffer}▏"), Style::default().fg(Color::White)),
            Span::styled("  Enter: apply  Esc: cancel", Style::default().fg(Color::DarkGray)),
        ]),
        Mode::Confirm(target) => Line::from(Span::styled(
            format!(" {} (y/n)", target.question()),
            Style::default().fg(Color::Yellow),
        )),
        Mode::Normal => {
            let hints = match app.tab {
                Tab::Status => "t: set time  Tab: switch  q: quit",
                Tab::Display => "↑/↓: select  Enter: edit  s: save  Tab: switch  q: quit",
                Tab::Content => "↑/↓: select  space: toggle  s: save  Tab: switch  q: quit",
                Tab::Rss => "↑/↓: select  Enter: edit  s: save  Tab: switch  q: quit",
                Tab::Feeds => {
                    "a: add  d: remove  space: toggle  Enter: edit URL  f: fetch now  R: reset  q: quit"
                }
            };
            Line::from(Span::styled(
                format!(" {hints}"),
                Style::default().fg(Color::DarkGray),
            ))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
