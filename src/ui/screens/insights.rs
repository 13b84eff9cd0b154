use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let insights = app.snapshot().generate_insights(app.reference_date);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Insights for {} ", app.reference_date.format("%B %Y")),
            theme::title_style(),
        ));

    if insights.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Not enough data to generate insights yet. Add more transactions!",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let mut lines = Vec::with_capacity(insights.len() * 2);
    for insight in &insights {
        let color = theme::severity_color(insight.severity);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<8}", insight.severity.as_str().to_uppercase()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<16}", insight.category), theme::dim_style()),
            Span::styled(&insight.message, theme::normal_style()),
        ]));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(list, area);
}
