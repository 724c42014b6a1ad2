use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_share, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.breakdown.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Expenses by Category ", theme::title_style()));
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses to show statistics.",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_chart(f, chunks[0], app);
    render_breakdown(f, chunks[1], app);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .breakdown
        .iter()
        .enumerate()
        .take(12)
        .map(|(i, entry)| {
            // Bars are scaled in cents so small amounts still show
            let cents = entry
                .amount
                .max(Decimal::ZERO)
                .saturating_mul(Decimal::ONE_HUNDRED)
                .round()
                .to_u64()
                .unwrap_or(0);
            Bar::default()
                .value(cents)
                .text_value(format_share(entry.share))
                .label(Line::from(truncate(&entry.category, 10)))
                .style(Style::default().fg(theme::chart_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::chart_color(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(" Expenses by Category ", theme::title_style())),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<Row> = app
        .breakdown
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Row::new(vec![
                Cell::from(Span::styled(
                    "■",
                    Style::default().fg(theme::chart_color(i)),
                )),
                Cell::from(truncate(&entry.category, 18)),
                Cell::from(app.amount(entry.amount)),
                Cell::from(format_share(entry.share)),
            ])
            .style(theme::normal_style())
        })
        .chain(std::iter::once(
            Row::new(vec![
                Cell::from(""),
                Cell::from("Total"),
                Cell::from(app.amount(app.total)),
                Cell::from(""),
            ])
            .style(theme::total_style()),
        ))
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(10),
        Constraint::Length(16),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Breakdown ", theme::title_style())),
    );
    f.render_widget(table, area);
}
