//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::sim::duration::format_duration;

/// Render the header bar with a ward occupancy overview.
///
/// Displays: status indicator, occupancy counts, critical count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.ward.stats();

    // Overall status indicator: worst state present in the ward
    let status_style = if stats.critical > 0 {
        Style::default().fg(app.theme.critical)
    } else if stats.occupied > stats.stable {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().fg(app.theme.healthy)
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("MEDICARE ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", stats.occupied),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" occupied "),
        Span::styled(format!("{}", stats.available), Style::default().fg(app.theme.healthy)),
        Span::raw(" free "),
        if stats.critical > 0 {
            Span::styled(
                format!("{}", stats.critical),
                Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" crit │ "),
        Span::raw(format!(
            "{} stable │ Dr. Sarah Johnson · Chief Medical Officer",
            stats.stable
        )),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Vitals "),
        Line::from(" 2:Beds "),
        Line::from(" 3:Assistant "),
    ];

    let selected = match app.current_view {
        View::Vitals => 0,
        View::Beds => 1,
        View::Assistant => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since the chart last rolled, available
/// controls. Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    // Context-sensitive controls
    let controls = match app.current_view {
        View::Vitals => "↑↓:patient Tab:switch r:reset e:export ?:help q:quit",
        View::Beds => {
            if app.filter_active {
                "Type to search | Enter:apply Esc:cancel"
            } else {
                "/:search f:status s:sort Enter:detail Tab:switch ?:help q:quit"
            }
        }
        View::Assistant => {
            if app.attach_prompt.is_some() {
                "Type a file path | Enter:attach Esc:cancel"
            } else {
                "Enter:send ^O:attach ^N:model ^R:sample Esc:back ^C:quit"
            }
        }
    };

    let status = format!(
        " {} | Chart rolled {} ago | {}",
        app.current_view.label(),
        format_duration(app.chart_updated.elapsed()),
        controls,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Bed detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Beds",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Search name/bed/diagnosis"),
        Line::from("  f         Cycle status filter"),
        Line::from("  c         Clear search"),
        Line::from("  s / S     Sort column / direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Assistant",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Enter     Send message"),
        Line::from("  Ctrl+O    Attach a file"),
        Line::from("  Ctrl+N    Cycle model"),
        Line::from("  Ctrl+R    Insert sample query"),
        Line::from("  Ctrl+X    Drop last attachment"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Regenerate simulation"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 34u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
