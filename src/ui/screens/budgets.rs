use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::insights::BudgetRow;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let comparison_height = app.snapshot().budget_comparison().len().max(1) as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(comparison_height.min(area.height / 2)),
        ])
        .split(area);

    render_overview(f, chunks[0], app);
    render_comparison(f, chunks[1], app);
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.snapshot().budget_overview();
    let visible = area.height.saturating_sub(2) as usize;
    let skip = (app.budget_index + 1).saturating_sub(visible);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(i, row)| {
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            overview_line(row, style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Budget Overview ", theme::title_style())),
    );
    f.render_widget(list, area);
}

fn overview_line(row: &BudgetRow, style: Style) -> ListItem<'static> {
    let name = format!("{:<18}", truncate(&row.category, 17));

    if !row.has_budget() {
        return ListItem::new(Line::from(vec![
            Span::styled(name, style),
            Span::styled(
                format!("{} spent  ", format_amount(row.spent)),
                theme::dim_style(),
            ),
            Span::styled("No budget set", theme::dim_style()),
        ]));
    }

    let color = theme::utilization_color(row.utilization);
    ListItem::new(Line::from(vec![
        Span::styled(name, style),
        Span::styled(
            format!(
                "{}/{} ",
                format_amount(row.spent),
                format_amount(row.budget)
            ),
            Style::default().fg(color),
        ),
        Span::styled(progress_bar(row.utilization, 20), Style::default().fg(color)),
        Span::styled(
            format!(" {}", format_percent(row.utilization)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]))
}

fn render_comparison(f: &mut Frame, area: Rect, app: &App) {
    let comparison = app.snapshot().budget_comparison();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Budget vs Actual ", theme::title_style()));

    if comparison.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Use :budget <category> <amount> to set a spending limit",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = comparison
        .iter()
        .map(|c| {
            let (flag, color) = if c.is_over_budget() {
                ("OVER", theme::RED)
            } else {
                ("ok", theme::GREEN)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<18}", truncate(&c.category, 17)),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!("budget {:>12}  ", format_amount(c.budget)),
                    theme::dim_style(),
                ),
                Span::styled(
                    format!("actual {:>12}  ", format_amount(c.spent)),
                    Style::default().fg(color),
                ),
                Span::styled(flag, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
