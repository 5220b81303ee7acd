//! TUI rendering logic for the movie browser.

use cinesmart_view::{DetailBody, Fragment, ModalState};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::state::BrowseState;

/// Draws the browser UI, with the detail modal on top when visible.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowseState, fragments: &[Fragment], modal: &ModalState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Min(5),    // movie list
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_input(frame, chunks[0], state);
    draw_movies(frame, chunks[1], state, fragments);
    draw_footer(frame, chunks[2], modal.visible);

    if modal.visible
        && let Some(body) = &modal.body
    {
        draw_modal(frame, frame.area(), body);
    }
}

/// Draws the search input.
fn draw_input(frame: &mut Frame, area: Rect, state: &BrowseState) {
    let input = Paragraph::new(state.query.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    frame.render_widget(input, area);
}

/// Draws the movie list.
fn draw_movies(frame: &mut Frame, area: Rect, state: &BrowseState, fragments: &[Fragment]) {
    let items: Vec<ListItem> = fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| match fragment {
            Fragment::Card(card) => {
                let selected = i == state.cursor;
                let marker = if selected { "\u{25b8} " } else { "  " };
                let style = if selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let mut spans = vec![
                    Span::raw(String::from(marker)),
                    Span::styled(card.title.clone(), style),
                    Span::raw("  "),
                    Span::styled(card.rating_label(), Style::default().fg(Color::Yellow)),
                ];
                if let Some(date) = &card.release_date {
                    spans.push(Span::styled(
                        format!("  {date}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            }
            Fragment::Placeholder(message) => ListItem::new(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::DarkGray),
            ))),
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Movies ({}) ", count_cards(fragments))),
    );
    frame.render_widget(list, area);
}

/// Draws the detail modal over `area`.
fn draw_modal(frame: &mut Frame, area: Rect, body: &DetailBody) {
    let popup = centered_rect(70, 70, area);

    let mut lines = vec![
        Line::from(Span::styled(
            body.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(body.rating_label()),
        Line::from(body.release_label()),
    ];
    if !body.genres.is_empty() {
        lines.push(Line::from(Span::styled(
            body.genres.join(", "),
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(body.overview.clone()));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        body.image_url.clone(),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Details "),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, modal_visible: bool) {
    let help_text = if modal_visible {
        "Esc/c: close  o: open in browser  Ctrl-C: quit"
    } else {
        "Type to search  \u{2191}\u{2193}: move  Enter: details  Esc: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Number of cards among `fragments`.
fn count_cards(fragments: &[Fragment]) -> usize {
    fragments.iter().filter(|f| f.as_card().is_some()).count()
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
