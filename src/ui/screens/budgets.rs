use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Budgets: {} ", app.period_label()),
            theme::title_style(),
        ));

    if app.view.breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budgets defined", theme::dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .view
        .breakdown
        .iter()
        .enumerate()
        .skip(app.budget_cursor.scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let ratio = row.ratio();
            let color = theme::breakdown_color(row);

            let name_style = if i == app.budget_cursor.index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let remaining = if row.is_over() {
                format!(" {} over", format_amount(-row.remaining))
            } else {
                format!(" {} left", format_amount(row.remaining))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", truncate(&row.category, 15)), name_style),
                Span::styled(
                    format!(
                        "{:>12} / {:<12}",
                        format_amount(row.spent),
                        format_amount(row.limit)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>4.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(remaining, theme::dim_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
