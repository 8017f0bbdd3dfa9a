use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_timestamp, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Entry form
            Constraint::Min(5),    // Recent expenses
        ])
        .split(area);

    render_form(f, chunks[0], app);
    render_recent(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let items: Vec<ListItem> = FormField::all()
        .iter()
        .map(|&field| {
            let focused = field == app.form.focus;
            let label_style = if focused {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            };
            let value = app.form.value(field);
            let value_style = if focused && editing {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            let mut spans = vec![
                Span::styled(format!("{:<10}", field.label()), label_style),
                Span::styled(value.to_string(), value_style),
            ];
            if field == FormField::Memo && value.is_empty() {
                spans.push(Span::styled(" (optional)", theme::dim_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " New Expense ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);

    // Cursor sits at the end of the focused field while typing
    if editing {
        let field_row = FormField::all()
            .iter()
            .position(|&fld| fld == app.form.focus)
            .unwrap_or(0) as u16;
        let value_len = app.form.value(app.form.focus).chars().count() as u16;
        let x = (area.x + 11 + value_len).min(area.x + area.width.saturating_sub(2));
        let y = area.y + 1 + field_row;
        f.set_cursor_position((x, y));
    }
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press i to add your first expense",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Recent Expenses (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Title", "Category", "Amount", "Memo"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .take(area.height.saturating_sub(3) as usize)
        .enumerate()
        .map(|(i, expense)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(format_timestamp(&expense.created_at)),
                Cell::from(truncate(&expense.title, 30)),
                Cell::from(truncate(&expense.category, 14)),
                Cell::from(Span::styled(
                    format_amount(expense.amount),
                    theme::amount_style(),
                )),
                Cell::from(truncate(&expense.memo, 24)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(17),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Recent Expenses ({}) ", app.expense_count),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
