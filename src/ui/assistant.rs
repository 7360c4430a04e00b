//! Assistant console rendering.
//!
//! Model sidebar on the left, transcript plus input line on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::sim::assistant::{MODELS, SAMPLE_QUERIES};
use crate::sim::Role;

/// Render the Assistant view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Length(30), // Sidebar
        Constraint::Min(40),    // Console
    ])
    .split(area);

    render_sidebar(frame, app, columns[0]);
    render_console(frame, app, columns[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Min(8),    // Models
        Constraint::Length(7), // Sample queries
    ])
    .split(area);

    let mut model_lines = Vec::new();
    for (i, model) in MODELS.iter().enumerate() {
        let marker = if i == app.chat.selected_model { "▶ " } else { "  " };
        let name_style = if i == app.chat.selected_model {
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        model_lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(model.name, name_style),
        ]));
        model_lines.push(Line::from(Span::styled(
            format!("  {}", model.description),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let models_block = Block::default()
        .title(" AI Models [^N] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(model_lines).wrap(Wrap { trim: false }).block(models_block),
        rows[0],
    );

    let query_lines: Vec<Line> = SAMPLE_QUERIES
        .iter()
        .map(|query| Line::from(Span::styled(format!(" {}", query), Style::default())))
        .collect();

    let queries_block = Block::default()
        .title(" Sample Queries [^R] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(query_lines).block(queries_block), rows[1]);
}

fn render_console(frame: &mut Frame, app: &App, area: Rect) {
    let staged_height = if app.chat.staged.is_empty() { 0 } else { 1 };
    let rows = Layout::vertical([
        Constraint::Min(4),                // Transcript
        Constraint::Length(staged_height), // Staged attachments
        Constraint::Length(3),             // Input line
    ])
    .split(area);

    render_transcript(frame, app, rows[0]);
    if staged_height > 0 {
        render_staged(frame, app, rows[1]);
    }
    render_input(frame, app, rows[2]);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for message in &app.chat.messages {
        let (label, style) = match message.role {
            Role::User => ("You", app.theme.chat_user),
            Role::Assistant => ("Assistant", app.theme.chat_assistant),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("┃ {}", label), style.add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" · {}", message.timestamp),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]));

        for attachment in &message.attachments {
            lines.push(Line::from(Span::styled(
                format!("┃   ⎙ {} ({})", attachment.name, attachment.size),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }

        lines.push(Line::from(format!("┃ {}", message.content)));
        lines.push(Line::from(""));
    }

    if app.responder.is_waiting() {
        lines.push(Line::from(Span::styled(
            "┃ Analyzing...",
            app.theme.chat_assistant.add_modifier(Modifier::DIM),
        )));
    }

    let block = Block::default()
        .title(format!(" Medical AI Assistant · {} · Online ", app.chat.model().name))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let inner_width = area.width.saturating_sub(2).max(1);
    let inner_height = area.height.saturating_sub(2) as usize;
    let total = estimated_rows(&lines, inner_width);

    // Pin to the bottom, then back off by the user's scroll amount
    let max_offset = total.saturating_sub(inner_height);
    let offset = max_offset.saturating_sub(app.transcript_scroll);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset as u16, 0))
        .block(block);

    frame.render_widget(paragraph, area);
}

/// Rows the paragraph will occupy after wrapping at `width`.
fn estimated_rows(lines: &[Line], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let len = line.width();
            len.div_ceil(width).max(1)
        })
        .sum()
}

fn render_staged(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Attached: ",
        Style::default().add_modifier(Modifier::DIM),
    )];
    for attachment in &app.chat.staged {
        spans.push(Span::styled(
            format!("⎙ {} ({}) ", attachment.name, attachment.size),
            Style::default().fg(app.theme.highlight),
        ));
    }
    spans.push(Span::styled("[^X removes]", Style::default().add_modifier(Modifier::DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let (title, content, style) = if let Some(path) = &app.attach_prompt {
        (
            " Attach file (.pdf .jpg .jpeg .png .dcm .txt) ",
            format!("{}_", path),
            Style::default().fg(app.theme.warning),
        )
    } else {
        (
            " Message ",
            format!("{}_", app.chat.input),
            Style::default(),
        )
    };

    // Dim the frame while a send would be a no-op
    let border_style = if app.chat.can_send() || app.attach_prompt.is_some() {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).style(style).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_rows_counts_wrapping() {
        let lines = vec![Line::from("a".repeat(25)), Line::from("short"), Line::from("")];
        // 25 chars at width 10 -> 3 rows, "short" -> 1, empty -> 1
        assert_eq!(estimated_rows(&lines, 10), 5);
    }
}
