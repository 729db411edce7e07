//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a three-row split: the site header bar, the scrollable
//!   page, and a one-line status bar.  The mobile menu draws as a popup on
//!   top when open.
//! * Colours come from [`Palette`], picked by the current theme.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Row};
use crate::theme::Theme;

/// Colours for one theme.
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::DarkGray,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::Gray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let palette = Palette::for_theme(app.theme());
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(app, &palette, frame, header_area);
    draw_page(app, &palette, frame, main_area);
    draw_status_bar(app, &palette, frame, status_area);

    if app.menu_open() {
        draw_menu(app, &palette, frame, main_area);
    }
}

/// Brand, desktop links and the theme switch.
fn draw_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let Some(header) = &app.page.header else {
        return;
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", header.brand()),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    for link in header.links() {
        spans.push(Span::styled(link.label.clone(), Style::default().fg(palette.fg)));
        spans.push(Span::raw("  "));
    }
    let knob = match app.theme() {
        Theme::Dark => "[☾ dark]",
        Theme::Light => "[☀ light]",
    };
    spans.push(Span::styled(knob, Style::default().fg(palette.muted)));
    spans.push(Span::styled("  ☰", Style::default().fg(palette.fg)));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), area);
}

/// Hero, grids and footer as one scrollable list.
fn draw_page(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .rows()
        .into_iter()
        .map(|row| ListItem::new(row_line(row, palette)))
        .collect();

    let list = List::new(list_items)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
        .style(palette.base())
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(palette.highlight),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn row_line(row: Row, palette: &Palette) -> Line<'static> {
    let muted = Style::default().fg(palette.muted);
    match row {
        Row::HeroTitle(title) => Line::from(Span::styled(
            title,
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )),
        Row::Text(text) => Line::from(Span::styled(text, Style::default().fg(palette.fg))),
        Row::Heading(heading) => Line::from(Span::styled(
            format!("## {heading}"),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Row::Subheading(sub) | Row::Placeholder(sub) => Line::from(Span::styled(sub, muted)),
        Row::Card(card) => {
            let mut spans = vec![Span::styled(
                format!("{:<14}", card.date.unwrap_or_default()),
                muted,
            )];
            spans.push(Span::styled(card.title, Style::default().fg(palette.fg)));
            if let Some(desc) = card.desc {
                spans.push(Span::styled(format!(" — {desc}"), muted));
            }
            spans.push(Span::styled(
                format!("  [{}]", card.href),
                Style::default().fg(palette.accent),
            ));
            Line::from(spans)
        }
        Row::ViewAll(href) => Line::from(Span::styled(
            format!("View all → {href}"),
            Style::default().fg(palette.accent),
        )),
        Row::Footer(text) => Line::from(Span::styled(text, muted)),
    }
}

/// Mobile menu popup over the page.
fn draw_menu(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let Some(header) = &app.page.header else {
        return;
    };
    let items: Vec<ListItem> = header
        .links()
        .iter()
        .map(|l| ListItem::new(l.label.clone()))
        .collect();
    let height = u16::try_from(items.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let [popup] = Layout::horizontal([Constraint::Length(30)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(popup);

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Menu (Esc ✕) ")
                .borders(Borders::ALL),
        )
        .style(palette.base())
        .highlight_style(Style::default().bg(palette.highlight))
        .highlight_symbol("▸ ");

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut app.menu_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.status.clone(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} cards", app.card_count()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  ↑/↓: scroll  t: theme  m: menu  r: refresh"),
    ]))
    .style(palette.base());
    frame.render_widget(status, area);
}
