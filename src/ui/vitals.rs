//! Vitals view rendering.
//!
//! Patient strip, five reading cards with sparkline trends, two
//! multi-series charts fed by the chart window, and the recent-alerts
//! panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::sim::vitals::{AlertKind, VitalReading, MONITORED_PATIENTS, RECENT_ALERTS};

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the Vitals view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Patient strip
        Constraint::Length(5), // Reading cards
        Constraint::Min(8),    // Charts
        Constraint::Length(4), // Recent alerts
    ])
    .split(area);

    render_patient_strip(frame, app, chunks[0]);
    render_cards(frame, app, chunks[1]);
    render_charts(frame, app, chunks[2]);
    render_alerts(frame, app, chunks[3]);
}

/// One-line strip of the monitored patients; ↑/↓ moves the highlight.
fn render_patient_strip(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Patient: ",
        Style::default().add_modifier(Modifier::DIM),
    )];

    for (i, patient) in MONITORED_PATIENTS.iter().enumerate() {
        let label = format!(" {} {} · {} ", patient.id, patient.name, patient.room);
        if i == app.selected_patient_index {
            spans.push(Span::styled(label, app.theme.selected));
        } else {
            spans.push(Span::styled(label, app.theme.status_style(patient.status)));
        }
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::horizontal(vec![Constraint::Fill(1); app.board.readings.len()])
        .split(area);

    for (reading, column) in app.board.readings.iter().zip(columns.iter()) {
        render_card(frame, app, reading, *column);
    }
}

fn render_card(frame: &mut Frame, app: &App, reading: &VitalReading, area: Rect) {
    // Out-of-band readings get an alarm border
    let border_style = if reading.is_normal() {
        Style::default().fg(app.theme.border)
    } else {
        Style::default().fg(app.theme.critical)
    };

    let block = Block::default()
        .title(format!(" {} ", reading.name))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    let value_style = if reading.is_normal() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:.1}", reading.value), value_style),
            Span::styled(format!(" {}", reading.unit), Style::default().add_modifier(Modifier::DIM)),
        ]),
        Line::from(Span::styled(
            trend_sparkline(reading),
            Style::default().fg(app.theme.highlight),
        )),
        Line::from(Span::styled(
            format!("Normal: {:.0}-{:.0} {}", reading.normal.min, reading.normal.max, reading.unit),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render a card's trend window as bar glyphs, scaled over its normal band.
fn trend_sparkline(reading: &VitalReading) -> String {
    let range = (reading.normal.max - reading.normal.min).max(f64::EPSILON);
    reading
        .trend
        .iter()
        .map(|value| {
            let normalized = ((value - reading.normal.min) / range * 7.0).round();
            let level = (normalized.clamp(0.0, 7.0)) as usize;
            SPARKLINE_CHARS[level]
        })
        .collect()
}

fn render_charts(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let window = &app.board.chart;
    let hr: Vec<(f64, f64)> =
        window.iter().enumerate().map(|(i, s)| (i as f64, s.heart_rate)).collect();
    let bp: Vec<(f64, f64)> =
        window.iter().enumerate().map(|(i, s)| (i as f64, s.blood_pressure)).collect();
    let spo2: Vec<(f64, f64)> =
        window.iter().enumerate().map(|(i, s)| (i as f64, s.oxygen_sat)).collect();
    let temp: Vec<(f64, f64)> =
        window.iter().enumerate().map(|(i, s)| (i as f64, s.temperature)).collect();

    let x_labels = time_axis_labels(app);
    let x_bounds = [0.0, (window.len().saturating_sub(1)) as f64];

    let left = Chart::new(vec![
        Dataset::default()
            .name("Heart Rate (bpm)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.critical))
            .data(&hr),
        Dataset::default()
            .name("Blood Pressure (mmHg)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.highlight))
            .data(&bp),
    ])
    .block(chart_block(app, " Heart Rate & Blood Pressure "))
    .x_axis(
        Axis::default()
            .style(Style::default().fg(app.theme.border))
            .bounds(x_bounds)
            .labels(x_labels.clone()),
    )
    .y_axis(
        Axis::default()
            .style(Style::default().fg(app.theme.border))
            .bounds([60.0, 130.0])
            .labels(vec!["60".to_string(), "95".to_string(), "130".to_string()]),
    );

    frame.render_widget(left, halves[0]);

    let right = Chart::new(vec![
        Dataset::default()
            .name("Oxygen Saturation (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.healthy))
            .data(&spo2),
        Dataset::default()
            .name("Temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.warning))
            .data(&temp),
    ])
    .block(chart_block(app, " Oxygen Saturation & Temperature "))
    .x_axis(
        Axis::default()
            .style(Style::default().fg(app.theme.border))
            .bounds(x_bounds)
            .labels(x_labels),
    )
    .y_axis(
        Axis::default()
            .style(Style::default().fg(app.theme.border))
            .bounds([30.0, 100.0])
            .labels(vec!["30".to_string(), "65".to_string(), "100".to_string()]),
    );

    frame.render_widget(right, halves[1]);
}

fn chart_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// First, middle and last time labels of the chart window.
fn time_axis_labels(app: &App) -> Vec<String> {
    let labels: Vec<&str> = app.board.chart.iter().map(|s| s.time.as_str()).collect();
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].to_string()],
        n => vec![
            labels[0].to_string(),
            labels[n / 2].to_string(),
            labels[n - 1].to_string(),
        ],
    }
}

fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = RECENT_ALERTS
        .iter()
        .map(|alert| {
            let (icon, style) = match alert.kind {
                AlertKind::Warning => ("▲", Style::default().fg(app.theme.warning)),
                AlertKind::Info => ("✓", Style::default().fg(app.theme.healthy)),
            };
            Line::from(vec![
                Span::styled(format!(" {} ", icon), style),
                Span::styled(alert.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", alert.detail),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Recent Alerts ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vitals::Band;
    use std::collections::VecDeque;

    fn reading(trend: &[f64], min: f64, max: f64) -> VitalReading {
        VitalReading {
            id: "hr",
            name: "Heart Rate",
            value: *trend.last().unwrap(),
            unit: "bpm",
            normal: Band { min, max },
            trend: trend.iter().copied().collect::<VecDeque<f64>>(),
        }
    }

    #[test]
    fn test_sparkline_spans_the_band() {
        let low_high = reading(&[60.0, 100.0], 60.0, 100.0);
        let glyphs: Vec<char> = trend_sparkline(&low_high).chars().collect();
        assert_eq!(glyphs[0], SPARKLINE_CHARS[0]);
        assert_eq!(glyphs[1], SPARKLINE_CHARS[7]);
    }

    #[test]
    fn test_sparkline_has_one_glyph_per_point() {
        let r = reading(&[70.0, 68.0, 72.0, 75.0, 71.0, 72.0], 60.0, 100.0);
        assert_eq!(trend_sparkline(&r).chars().count(), 6);
    }

    #[test]
    fn test_sparkline_clamps_out_of_band_points() {
        let r = reading(&[150.0, 40.0], 60.0, 100.0);
        let glyphs: Vec<char> = trend_sparkline(&r).chars().collect();
        assert_eq!(glyphs[0], SPARKLINE_CHARS[7]);
        assert_eq!(glyphs[1], SPARKLINE_CHARS[0]);
    }
}
