use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(10),   // Charts
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_monthly_overview(f, charts[0], app);
    render_category_breakdown(f, charts[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let snapshot = app.snapshot();
    let count = app.ledger.len();

    render_card(
        f,
        cards[0],
        "Total Expenses",
        snapshot.total_expenses(),
        Some(format!("{count} txns")),
    );
    render_card(
        f,
        cards[1],
        "This Month",
        snapshot.current_month_expenses(app.reference_date),
        Some(app.reference_date.format("%B").to_string()),
    );
    render_card(
        f,
        cards[2],
        "Average Transaction",
        snapshot.average_transaction(),
        None,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, subtitle: Option<String>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn empty_chart(f: &mut Frame, area: Rect, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));
    let msg = Paragraph::new(Line::from(Span::styled(
        "No transactions yet. Add one with :add-txn",
        theme::dim_style(),
    )))
    .centered()
    .block(block);
    f.render_widget(msg, area);
}

fn chart<'a>(title: &'a str, bars: &'a [Bar<'a>], bar_width: u16) -> BarChart<'a> {
    BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(format!(" {title} "), theme::title_style())),
        )
        .data(BarGroup::default().bars(bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT))
}

fn bar<'a>(label: String, amount: Decimal, color: ratatui::style::Color) -> Bar<'a> {
    Bar::default()
        .value(amount.round().to_u64().unwrap_or(0))
        .text_value(format_amount(amount))
        .label(Line::from(label))
        .style(Style::default().fg(color))
        .value_style(
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
}

fn render_monthly_overview(f: &mut Frame, area: Rect, app: &App) {
    let series = app.snapshot().monthly_series();
    if series.is_empty() {
        empty_chart(f, area, "Monthly Overview");
        return;
    }

    // Keep the most recent months that fit.
    let fits = (area.width.saturating_sub(2) / 9).max(1) as usize;
    let bars: Vec<Bar> = series
        .iter()
        .skip(series.len().saturating_sub(fits))
        .map(|b| {
            let label = format!("{} {:02}", b.label(), b.year % 100);
            bar(label, b.total, theme::ACCENT)
        })
        .collect();

    f.render_widget(chart("Monthly Overview", &bars, 8), area);
}

fn render_category_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = app.snapshot().category_breakdown();
    if breakdown.is_empty() {
        empty_chart(f, area, "Category Breakdown");
        return;
    }

    let colors = [
        theme::ACCENT,
        theme::GREEN,
        theme::YELLOW,
        theme::RED,
        theme::TEXT_DIM,
    ];
    let fits = (area.width.saturating_sub(2) / 11).max(1) as usize;
    let bars: Vec<Bar> = breakdown
        .iter()
        .take(fits)
        .enumerate()
        .map(|(i, (name, total))| bar(truncate(name, 10), *total, colors[i % colors.len()]))
        .collect();

    f.render_widget(chart("Category Breakdown", &bars, 10), area);
}
