use prodo_app::TaskStore;
use prodo_core::Status;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use time::OffsetDateTime;

use super::super::view::Ui;
use super::util::priority_color;

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let today = OffsetDateTime::now_utc().date();
        let items = if self.app.has_visible_tasks() {
            self.app
                .visible_tasks()
                .map(|task| {
                    let title_style = if task.status == Status::Completed {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    let title = Span::styled(&task.title, title_style);

                    let due_style = if task.status == Status::Pending && task.is_overdue(today) {
                        Style::default().fg(Color::Red)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    let meta = vec![
                        Span::styled(format!("#{} ", task.id), Style::default().fg(Color::DarkGray)),
                        Span::styled(
                            task.priority.as_str(),
                            Style::default().fg(priority_color(task.priority)),
                        ),
                        Span::styled(format!(" | 期限: {}", task.due_date), due_style),
                        Span::styled(
                            format!(" | {}", task.status.as_str()),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ];
                    ListItem::new(vec![Line::from(vec![title]), Line::from(meta)])
                })
                .collect()
        } else {
            let message = if self.app.filter().is_empty() {
                "タスクがありません"
            } else {
                "フィルタに一致するタスクがありません"
            };
            vec![ListItem::new(Line::from(message))]
        };

        let list = List::new(items)
            .block(Block::default().title("タスクリスト").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        if self.app.has_visible_tasks() {
            state.select(Some(self.app.selected));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}
