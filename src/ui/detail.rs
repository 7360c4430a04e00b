//! Detail overlay rendering.
//!
//! Displays a modal overlay with detailed information about the selected bed.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the bed detail as a modal overlay.
///
/// Shows the occupant's demographics, medical information and spot
/// vitals.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(bed) = app.selected_bed() else {
        return;
    };

    // Width: 70% of screen, clamped to [MIN_OVERLAY_WIDTH, 80]
    let overlay_width = (area.width * 70 / 100).clamp(MIN_OVERLAY_WIDTH, 80);
    // Height: 80% of screen, clamped to [MIN_OVERLAY_HEIGHT, 26]
    let overlay_height = (area.height * 80 / 100).clamp(MIN_OVERLAY_HEIGHT, 26);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(5), // Header with patient identity
        Constraint::Min(9),    // Medical info and vitals
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let status_style = app.theme.status_style(bed.status);

    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", bed.name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", bed.status.label().to_uppercase()),
                status_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Bed: "),
            Span::styled(&bed.bed_number, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "    Floor {}    {} years · {}",
                bed.floor, bed.age, bed.gender
            )),
        ]),
    ];

    let header_block = Block::default()
        .title(" Patient Details ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    // ===== CONTENT SECTION =====
    let content_chunks = Layout::vertical([
        Constraint::Length(6), // Medical information
        Constraint::Min(4),    // Spot vitals
    ])
    .split(chunks[1]);

    let info_lines = vec![
        Line::from(vec![
            Span::styled(" Diagnosis: ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(bed.diagnosis, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(" Assigned Doctor: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(bed.doctor),
        ]),
        Line::from(vec![
            Span::styled(" Admitted: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(bed.admitted.as_str()),
        ]),
        Line::from(vec![
            Span::styled(" Last checkup: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(bed.last_checkup.as_str()),
        ]),
    ];

    let info_block = Block::default()
        .title(" Medical Information ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(info_lines).block(info_block), content_chunks[0]);

    let vitals_lines = vec![
        Line::from(vec![
            Span::styled(" Heart Rate      ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                format!("{} bpm", bed.vitals.heart_rate),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Blood Pressure  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                bed.vitals.blood_pressure.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Temperature     ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                format!("{:.1}°C", bed.vitals.temperature),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Oxygen Sat      ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                format!("{}%", bed.vitals.oxygen_sat),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let vitals_block = Block::default()
        .title(" Current Vitals ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(vitals_lines).block(vitals_block), content_chunks[1]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
