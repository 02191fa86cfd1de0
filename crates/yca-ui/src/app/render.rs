//! Dashboard rendering

use ratatui::{prelude::*, widgets::*};
use yca_core::classify::Sentiment;
use yca_core::report::AnalysisReport;

use super::state::{AppMode, AppState};
use crate::theme::Theme;

/// Draw the whole dashboard into a frame
pub fn render_dashboard(frame: &mut Frame, report: &AnalysisReport, state: &AppState, theme: &Theme) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    render_title_bar(frame, chunks[0], report, theme);
    render_metric_cards(frame, chunks[1], report, theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    render_bar_chart(frame, body[0], report, theme);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(4)])
        .split(body[1]);
    render_proportions(frame, side[0], report, theme);
    render_channel(frame, side[1], report, theme);

    render_status_bar(frame, chunks[3], report, state, theme);

    if state.mode == AppMode::Help {
        render_help(frame, area, theme);
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
}

fn render_title_bar(frame: &mut Frame, area: Rect, report: &AnalysisReport, theme: &Theme) {
    let mut title = String::from(" yca - Comment Sentiment");
    match report.video_id {
        Some(ref video) => title.push_str(&format!(" | Video {}", video)),
        None => title.push_str(" | Local file"),
    }
    if let Some(channel) = report.channel_title() {
        title.push_str(&format!(" | {}", channel));
    }

    frame.render_widget(
        Paragraph::new(title).style(
            Style::default()
                .bg(theme.title_bg)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        area,
    );
}

fn render_metric_cards(frame: &mut Frame, area: Rect, report: &AnalysisReport, theme: &Theme) {
    let s = &report.summary;
    let cards = [
        ("Total Comments", s.total_analyzed(), Color::White),
        ("Positive", s.num_positive(), theme.positive),
        ("Negative", s.num_negative(), theme.negative),
        ("Irrelevant", s.num_irrelevant(), theme.irrelevant),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value, color), column) in cards.iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(panel(title, theme));
        frame.render_widget(card, *column);
    }
}

fn render_bar_chart(frame: &mut Frame, area: Rect, report: &AnalysisReport, theme: &Theme) {
    let s = &report.summary;
    let block = panel("Sentiment Distribution", theme);

    if s.is_empty() {
        frame.render_widget(
            Paragraph::new("No comments to analyze")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted))
                .block(block),
            area,
        );
        return;
    }

    let bars: Vec<Bar> = Sentiment::ALL
        .iter()
        .map(|bucket| {
            let color = theme.sentiment(*bucket);
            Bar::default()
                .value(s.count(*bucket) as u64)
                .label(Line::from(bucket.label()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(3);
    frame.render_widget(chart, area);
}

fn render_proportions(frame: &mut Frame, area: Rect, report: &AnalysisReport, theme: &Theme) {
    let s = &report.summary;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 3])
        .split(area);

    for (bucket, row) in Sentiment::ALL.iter().zip(rows.iter()) {
        let pct = s.percentage(*bucket);
        let gauge = Gauge::default()
            .block(panel(bucket.label(), theme))
            .gauge_style(Style::default().fg(theme.sentiment(*bucket)).bg(Color::Black))
            .ratio((pct / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.1}%", pct));
        frame.render_widget(gauge, *row);
    }
}

fn render_channel(frame: &mut Frame, area: Rect, report: &AnalysisReport, theme: &Theme) {
    let block = panel("Channel", theme);

    if report.channel.is_none() && report.stats.is_none() {
        frame.render_widget(
            Paragraph::new("No channel details")
                .style(Style::default().fg(theme.muted))
                .block(block),
            area,
        );
        return;
    }

    let na = "N/A";
    let field = |label: &'static str, value: Option<&str>| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<13}", label), Style::default().fg(theme.heading)),
            Span::raw(value.unwrap_or(na).to_string()),
        ])
    };

    let mut lines = Vec::new();
    if let Some(ref channel) = report.channel {
        lines.push(field("Title", channel.title.as_deref()));
        lines.push(field("Subscribers", channel.subscriber_count.as_deref()));
        lines.push(field("Videos", channel.video_count.as_deref()));
        lines.push(field("Created", channel.created_date()));
    }
    if let Some(ref stats) = report.stats {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(field("Views", stats.view_count.as_deref()));
        lines.push(field("Likes", stats.like_count.as_deref()));
        lines.push(field("Comments", stats.comment_count.as_deref()));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    report: &AnalysisReport,
    state: &AppState,
    theme: &Theme,
) {
    let text = state.message.clone().unwrap_or_else(|| {
        format!(
            " {} analyzed | lexicon {} | {} | q quit  ? help ",
            report.summary.total_analyzed(),
            report.lexicon,
            report.id
        )
    });

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bg).fg(Color::White)),
        area,
    );
}

fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let heading = Style::default().fg(theme.heading);
    let text = vec![
        Line::from(Span::styled(
            "yca - Comment Sentiment Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Keys", heading)),
        Line::from("  q / Esc     Quit"),
        Line::from("  Ctrl-c      Quit"),
        Line::from("  ?           Toggle this help"),
        Line::from(""),
        Line::from(Span::styled("Buckets", heading)),
        Line::from("  Positive    score at or above the positive threshold"),
        Line::from("  Negative    score at or below the negative threshold"),
        Line::from("  Irrelevant  off-topic noise and neutral comments"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(theme.muted))),
    ];

    let help_area = centered_rect(70, 60, area);
    frame.render_widget(Clear, help_area);
    frame.render_widget(
        Paragraph::new(text).block(panel("Help", theme)),
        help_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup[1])[1]
}
