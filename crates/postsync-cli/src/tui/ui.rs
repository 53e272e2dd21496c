//! UI rendering
//!
//! The store decides what is shown: a loading line, the error alone, or the
//! post list with either a detail pane or the create/edit form beside it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use postsync_core::{Gateway, Post, View};

use super::app::{App, Field, InputMode};

/// Main UI rendering function
pub fn draw<G: Gateway>(frame: &mut Frame, app: &App<G>) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match app.controller.store().view() {
        View::Loading => draw_message(frame, outer_chunks[0], "Loading posts...", Style::default()),
        View::Error(reason) => draw_error(frame, outer_chunks[0], reason),
        View::Posts(posts) => {
            let pane_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(outer_chunks[0]);

            draw_list_pane(frame, app, posts, pane_chunks[0]);
            if app.controller.store().is_form_open() {
                draw_form_pane(frame, app, pane_chunks[1]);
            } else {
                draw_detail_pane(frame, app.selected_post(), pane_chunks[1]);
            }
        }
    }

    draw_status_bar(frame, app, outer_chunks[1]);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Centered single message
fn draw_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message.to_string(), style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" postsync "));
    frame.render_widget(paragraph, area);
}

fn draw_error(frame: &mut Frame, area: Rect, reason: &str) {
    let text = vec![
        Line::from(Span::styled(
            format!("Error: {}", reason),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r: reload   q: quit   any other key: dismiss",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" postsync "));
    frame.render_widget(paragraph, area);
}

/// Draw the post list (left)
fn draw_list_pane<G: Gateway>(frame: &mut Frame, app: &App<G>, posts: &[Post], area: Rect) {
    let block = Block::default()
        .title(format!(" Posts ({}) ", posts.len()))
        .borders(Borders::ALL);

    if posts.is_empty() {
        let paragraph = Paragraph::new("No posts available.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let max_len = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = posts
        .iter()
        .map(|post| {
            let title = fit(&post.title, max_len);
            let preview = fit(post.body.lines().next().unwrap_or(""), max_len);
            ListItem::new(vec![
                Line::from(Span::styled(title, Style::default())),
                Line::from(Span::styled(
                    preview,
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let highlight_style = if app.input_mode() == InputMode::Normal {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items).block(block).highlight_style(highlight_style);

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the selected post (right)
fn draw_detail_pane(frame: &mut Frame, post: Option<&Post>, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL);

    let Some(post) = post else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("id {} · user {}", post.id, post.user_id),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
    ];
    lines.extend(post.body.lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draw the create/edit form (right)
fn draw_form_pane<G: Gateway>(frame: &mut Frame, app: &App<G>, area: Rect) {
    let draft = app.controller.store().draft();
    let title = if draft.is_editing() {
        " Edit Post "
    } else {
        " Create New Post "
    };

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_field(frame, chunks[0], "Title", &draft.title, app.field == Field::Title);
    draw_field(frame, chunks[1], "Body", &draft.body, app.field == Field::Body);

    let action = if draft.is_editing() {
        "Enter: update post"
    } else {
        "Enter: create post"
    };
    let hint = Paragraph::new(Span::styled(
        format!("{}   Tab: switch field   Esc: cancel", action),
        Style::default().add_modifier(Modifier::DIM),
    ));
    frame.render_widget(hint, chunks[2]);
}

fn draw_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let text = if focused {
        format!("{}█", value)
    } else {
        value.to_string()
    };
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(paragraph, area);
}

/// Draw the bottom status line
fn draw_status_bar<G: Gateway>(frame: &mut Frame, app: &App<G>, area: Rect) {
    let line = if app.busy {
        Line::from(Span::styled(
            "Working...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let InputMode::ConfirmDelete(id) = app.input_mode() {
        Line::from(Span::styled(
            format!("Delete post {}? (y/n)", id),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(ref message) = app.status_message {
        Line::from(message.as_str())
    } else {
        Line::from(Span::styled(
            "n: new  e: edit  d: delete  r: reload  ?: help  q: quit",
            Style::default().add_modifier(Modifier::DIM),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("j/k, ↑/↓    Move selection"),
        Line::from("g/G         First / last post"),
        Line::from("n, a        New post"),
        Line::from("e, Enter    Edit selected post"),
        Line::from("d           Delete selected post"),
        Line::from("r           Reload posts"),
        Line::from("?           Toggle this help"),
        Line::from("q, Ctrl-C   Quit"),
        Line::from(""),
        Line::from(Span::styled("Form", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Tab         Switch field"),
        Line::from("Enter       Submit"),
        Line::from("Esc         Cancel"),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(help).block(Block::default().title(" Help ").borders(Borders::ALL)),
        area,
    );
}

/// Rectangle centered in `area` taking the given percentages
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

/// Shorten to `max_len` characters with an ellipsis
fn fit(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("exactly ten", 11), "exactly ten");
        assert_eq!(fit("a longer title", 6), "a lon…");
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 25);
    }
}
