//! Beds view rendering.
//!
//! Occupancy stat tiles on top, then a sortable, filterable table of all
//! occupied beds.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::sim::ward::BedSortColumn;
use crate::sim::BedStatus;

/// Render the Beds view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Stat tiles
        Constraint::Min(6),    // Bed table
    ])
    .split(area);

    render_stat_tiles(frame, app, chunks[0]);
    render_bed_table(frame, app, chunks[1]);
}

fn render_stat_tiles(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.ward.stats();
    let tiles = [
        ("Occupied Beds", stats.occupied, Style::default().fg(app.theme.highlight)),
        ("Available Beds", stats.available, Style::default().fg(app.theme.healthy)),
        ("Critical Patients", stats.critical, Style::default().fg(app.theme.critical)),
        ("Stable Patients", stats.stable, Style::default().fg(app.theme.healthy)),
    ];

    let columns = Layout::horizontal([Constraint::Fill(1); 4]).split(area);

    for ((label, value, style), column) in tiles.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border));

        let lines = vec![
            Line::from(Span::styled(
                format!("{}", value),
                style.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().add_modifier(Modifier::DIM))),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

fn render_bed_table(frame: &mut Frame, app: &App, area: Rect) {
    let beds = app.visible_beds();

    if beds.is_empty() {
        render_empty_message(frame, app, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(format_header("Bed", BedSortColumn::Bed, app)),
        Cell::from(format_header("Patient", BedSortColumn::Name, app)),
        Cell::from(format_header("Age", BedSortColumn::Age, app)),
        Cell::from("Diagnosis"),
        Cell::from("HR"),
        Cell::from("SpO2"),
        Cell::from("Doctor"),
        Cell::from(format_header("Status", BedSortColumn::Status, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = beds
        .iter()
        .map(|bed| {
            let status_style = app.theme.status_style(bed.status);
            Row::new(vec![
                Cell::from(bed.bed_number.clone()),
                Cell::from(bed.name.clone()),
                Cell::from(format!("{}y {}", bed.age, &bed.gender[..1])),
                Cell::from(bed.diagnosis),
                Cell::from(format!("{}", bed.vitals.heart_rate)),
                Cell::from(format!("{}%", bed.vitals.oxygen_sat)),
                Cell::from(bed.doctor),
                Cell::from(bed.status.label()).style(status_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),  // Bed
        Constraint::Fill(2),    // Patient
        Constraint::Length(7),  // Age
        Constraint::Fill(2),    // Diagnosis
        Constraint::Length(4),  // HR
        Constraint::Length(5),  // SpO2
        Constraint::Fill(1),    // Doctor
        Constraint::Min(11),    // Status
    ];

    let selected = app.selected_bed_index.min(beds.len().saturating_sub(1));

    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(
        " Hospital Beds ({}/{}) [f:{} s:sort {}{}]{} [{}/{}] ",
        beds.len(),
        app.ward.beds.len(),
        app.status_filter.label(),
        app.sort_column.label(),
        sort_dir,
        filter_info,
        selected + 1,
        beds.len(),
    );

    // Tint the border when critical patients are on screen
    let border_color = if beds.iter().any(|b| b.status == BedStatus::Critical) {
        app.theme.critical
    } else {
        app.theme.border
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border_color)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_empty_message(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Hospital Beds (0) ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "    No beds match the current filter.",
            Style::default().add_modifier(Modifier::DIM),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "      c clears the search, f resets the status filter.",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn format_header(name: &str, col: BedSortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}
