//! Dashboard screen layout

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
        Row, Table, Tabs, Wrap,
    },
};
use stockdash_core::formatter::{
    FORECAST_HEADERS, METRICS_HEADERS, PLACEHOLDER_NOTE, forecast_cells, metrics_cells,
};
use stockdash_core::{PriceSeries, Sector};

use crate::app::App;

const KEY_HELP: &str =
    " ←/→ sector  ↑/↓ move  Space toggle  r refresh  c clear  q quit ";

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Sector tabs
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Status / keys
        ])
        .split(f.area());

    let title = Paragraph::new(app.title.as_str()).bold().cyan();
    f.render_widget(title, chunks[0]);

    render_sectors(f, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(20)])
        .split(chunks[2]);

    render_tickers(f, app, body[0]);
    if app.selection().is_empty() {
        let hint = Paragraph::new("Select one or more tickers to compare.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, body[1]);
    } else if !app.report_is_current() {
        let pending = Paragraph::new("Fetching price history...")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(pending, body[1]);
    } else {
        render_report(f, app, body[1]);
    }

    render_footer(f, app, chunks[3]);
}

fn render_sectors(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Sector::ALL
        .iter()
        .map(|s| Line::from(format!(" {} ", s.name())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Sector "))
        .select(app.sector().index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider("|");

    f.render_widget(tabs, area);
}

fn render_tickers(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .sector()
        .tickers()
        .iter()
        .map(|ticker| {
            let mark = if app.selection().contains(ticker) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(format!("{mark} {ticker}"))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Tickers "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default().with_selected(Some(app.cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_report(f: &mut Frame, app: &App, area: Rect) {
    let report = app.report();

    let mut messages: Vec<Line> = Vec::new();
    if let Some(notice) = &report.notice {
        messages.push(Line::from(Span::styled(
            format!("⚠ {notice}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    for warning in &report.warnings {
        messages.push(Line::from(Span::styled(
            format!("⚠ {}: {}", warning.symbol, warning.message),
            Style::default().fg(Color::Yellow),
        )));
    }

    let message_height = messages.len() as u16;
    let metrics_height = report.metrics.len() as u16 + 4; // borders, header, note
    let forecast_height = report.forecasts.len() as u16 + 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(message_height),
            Constraint::Min(6),
            Constraint::Length(metrics_height),
            Constraint::Length(forecast_height),
        ])
        .split(area);

    if !messages.is_empty() {
        f.render_widget(Paragraph::new(messages).wrap(Wrap { trim: true }), chunks[0]);
    }

    render_charts(f, &report.charts, chunks[1]);

    let metrics_rows = report.metrics.iter().map(|row| Row::new(metrics_cells(row)));
    let metrics = Table::new(
        metrics_rows,
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Min(8),
        ],
    )
    .header(Row::new(METRICS_HEADERS).style(Style::default().add_modifier(Modifier::BOLD)))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Valuation metrics ")
            .title_bottom(Line::from(PLACEHOLDER_NOTE).dark_gray()),
    );
    f.render_widget(metrics, chunks[2]);

    let forecast_rows = report.forecasts.iter().map(|row| Row::new(forecast_cells(row)));
    let forecasts = Table::new(forecast_rows, [Constraint::Length(8), Constraint::Min(22)])
        .header(Row::new(FORECAST_HEADERS).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 6-month price forecast "),
        );
    f.render_widget(forecasts, chunks[3]);
}

fn render_charts(f: &mut Frame, charts: &[PriceSeries], area: Rect) {
    if charts.is_empty() {
        let empty = Paragraph::new("  No price data to chart")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Closing prices "));
        f.render_widget(empty, area);
        return;
    }

    let n = charts.len() as u32;
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (series, slot) in charts.iter().zip(slots.iter()) {
        render_chart(f, series, *slot);
    }
}

fn render_chart(f: &mut Frame, series: &PriceSeries, area: Rect) {
    let (Some(first), Some(last), Some((low, high))) =
        (series.first(), series.last(), series.close_range())
    else {
        return;
    };

    // x = calendar days since the first close
    let data: Vec<(f64, f64)> = series
        .days_elapsed()
        .into_iter()
        .zip(series.closes())
        .map(|(day, close)| (day as f64, close))
        .collect();

    let max_x = data.last().map_or(1.0, |(x, _)| x.max(1.0));
    let min_y = low * 0.98;
    let max_y = high * 1.02;

    let datasets = vec![
        Dataset::default()
            .name(series.symbol.as_str())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} close ", series.symbol)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_x])
                .labels([first.date.to_string(), last.date.to_string()]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([min_y, max_y])
                .labels([format!("{min_y:.1}"), format!("{max_y:.1}")]),
        );

    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(app.status.as_str(), Style::default().fg(Color::Green)),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}
