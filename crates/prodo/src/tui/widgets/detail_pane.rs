use prodo_app::TaskStore;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::super::view::Ui;
use super::util::priority_color;

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_task_details(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("詳細").borders(Borders::ALL);

        let Some(task) = self.selected_task() else {
            let placeholder = Paragraph::new("タスクが選択されていません").block(block);
            f.render_widget(placeholder, area);
            return;
        };

        let today = OffsetDateTime::now_utc().date();
        let due_style = if task.is_overdue(today) {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let created = task
            .created_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "-".to_owned());

        let mut lines = vec![
            Line::from(Span::styled(
                task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!("#{}", task.id), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(
                    task.priority.as_str(),
                    Style::default().fg(priority_color(task.priority)),
                ),
                Span::raw("  "),
                Span::raw(task.status.as_str()),
            ]),
            Line::from(Span::styled(format!("期限: {}", task.due_date), due_style)),
            Line::from(Span::styled(
                format!("作成: {created}"),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];
        match task.description.as_deref() {
            Some(description) => {
                for text_line in description.lines() {
                    lines.push(Line::from(text_line.to_owned()));
                }
            }
            None => lines.push(Line::from(Span::styled(
                "(説明なし)",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}
