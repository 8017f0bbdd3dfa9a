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
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.summaries.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one on the Entry screen (1) to see the breakdown",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Analysis ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Length(4), // Proportional breakdown strip
            Constraint::Min(10),   // Bar chart + share table
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_breakdown_strip(f, chunks[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_subtotal_chart(f, bottom[0], app);
    render_share_table(f, bottom[1], app);
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

    render_card(
        f,
        cards[0],
        "Total Balance",
        format_amount(app.total),
        theme::ACCENT,
        None,
    );
    render_card(
        f,
        cards[1],
        "Entries",
        app.expense_count.to_string(),
        theme::GREEN,
        Some("all time".into()),
    );
    render_card(
        f,
        cards[2],
        "Categories",
        app.summaries.len().to_string(),
        theme::YELLOW,
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

/// One row of colored segments, each category's width proportional to its
/// share of the grand total.
fn render_breakdown_strip(f: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let mut bar_spans: Vec<Span> = Vec::new();
    let mut used = 0usize;
    for (i, summary) in app.summaries.iter().enumerate() {
        let share = (summary.percentage / Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0);
        let width = ((inner_width as f64) * share).round() as usize;
        let width = width.min(inner_width.saturating_sub(used));
        if width == 0 {
            continue;
        }
        bar_spans.push(Span::styled(
            "█".repeat(width),
            Style::default().fg(theme::category_color(i)),
        ));
        used += width;
    }
    if used < inner_width {
        bar_spans.push(Span::styled("░".repeat(inner_width - used), theme::dim_style()));
    }

    let mut legend_spans: Vec<Span> = Vec::new();
    for (i, summary) in app.summaries.iter().take(6).enumerate() {
        legend_spans.push(Span::styled(
            "■ ",
            Style::default().fg(theme::category_color(i)),
        ));
        legend_spans.push(Span::styled(
            format!(
                "{} {}  ",
                truncate(&summary.category, 12),
                format_percent(summary.percentage)
            ),
            theme::normal_style(),
        ));
    }
    if app.summaries.len() > 6 {
        legend_spans.push(Span::styled(
            format!("+{} more", app.summaries.len() - 6),
            theme::dim_style(),
        ));
    }

    let text = Paragraph::new(vec![Line::from(bar_spans), Line::from(legend_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Total Amount by Category ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(text, area);
}

fn render_subtotal_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .summaries
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, summary)| {
            let val = summary.subtotal.to_u64().unwrap_or(0);
            let label = truncate(&summary.category, 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(theme::category_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Subtotal by Category ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_share_table(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Category", "Subtotal", "Share"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .summaries
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, summary)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&summary.category, 18)),
                Cell::from(Span::styled(
                    format_amount(summary.subtotal),
                    theme::amount_style(),
                )),
                Cell::from(format_percent(summary.percentage)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Breakdown ({} categories) ", app.summaries.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
