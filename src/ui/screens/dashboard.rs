use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::engine;
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
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_spending_chart(f, charts[0], app);
    render_budget_vs_actual(f, charts[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = &app.view.totals;
    let income_count = app.view.filtered.iter().filter(|t| t.is_income()).count();
    let expense_count = app.view.filtered.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Income",
        totals.income,
        theme::GREEN,
        format!("{income_count} txns"),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        totals.expenses,
        theme::RED,
        format!("{expense_count} txns"),
    );
    render_card(
        f,
        cards[2],
        "Net",
        totals.net,
        theme::amount_color(totals.net),
        app.period_label(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, msg: &str) {
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(chart_block(title));
    f.render_widget(p, area);
}

fn to_bar_value(amount: Decimal) -> u64 {
    amount.round().to_u64().unwrap_or(0)
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Spending by Category";

    let mut slices: Vec<(String, Decimal)> = app
        .view
        .breakdown
        .iter()
        .filter(|row| row.spent > Decimal::ZERO)
        .map(|row| (row.category.clone(), row.spent))
        .collect();
    let unbudgeted = engine::uncategorized_spending(&app.view.filtered, &app.budgets);
    if unbudgeted > Decimal::ZERO {
        slices.push(("Unbudgeted".to_string(), unbudgeted));
    }

    if slices.is_empty() {
        render_empty(f, area, TITLE, "No spending in this period. Add one with :add-txn");
        return;
    }

    let total = app.view.totals.expenses;
    let bars: Vec<Bar> = slices
        .iter()
        .map(|(name, amt)| {
            let share = if total > Decimal::ZERO {
                (*amt / total * Decimal::from(100)).round()
            } else {
                Decimal::ZERO
            };
            Bar::default()
                .value(to_bar_value(*amt))
                .text_value(format!("{share}%"))
                .label(Line::from(truncate(name, 9)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(TITLE))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_budget_vs_actual(f: &mut Frame, area: Rect, app: &App) {
    const TITLE: &str = "Budget vs Actual";

    if app.view.breakdown.is_empty() {
        render_empty(f, area, TITLE, "No budgets defined");
        return;
    }

    let mut chart = BarChart::default()
        .block(chart_block(TITLE))
        .bar_width(4)
        .bar_gap(0)
        .group_gap(2);

    for row in &app.view.breakdown {
        let bars = [
            Bar::default()
                .value(to_bar_value(row.limit))
                .text_value(String::new())
                .style(Style::default().fg(theme::OVERLAY)),
            Bar::default()
                .value(to_bar_value(row.spent))
                .text_value(String::new())
                .style(Style::default().fg(theme::breakdown_color(row))),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate(&row.category, 10)))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}
