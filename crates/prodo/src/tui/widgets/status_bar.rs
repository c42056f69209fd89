use std::borrow::Cow;

use prodo_app::TaskStore;
use prodo_core::{Priority, Status};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::{Message, Overlay, Ui};

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(Self::status_layout_constraints())
            .split(area);

        let instructions = Paragraph::new(self.instructions())
            .block(Block::default().title("操作").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, rows[0]);

        let filter = Paragraph::new(self.filter_summary_text())
            .block(Block::default().title("フィルタ").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(filter, rows[1]);

        let message = Paragraph::new(self.status_text())
            .block(Block::default().title("ステータス").borders(Borders::ALL))
            .style(self.status_style());
        f.render_widget(message, rows[2]);
    }

    pub(in crate::tui) const fn status_layout_constraints() -> [Constraint; 3] {
        [
            Constraint::Length(Self::INSTRUCTIONS_HEIGHT),
            Constraint::Length(Self::FILTER_HEIGHT),
            Constraint::Min(Self::STATUS_MESSAGE_MIN_HEIGHT),
        ]
    }

    pub(in crate::tui) fn instructions(&self) -> &'static str {
        match self.overlay {
            Overlay::None => {
                "a: 追加 | e: 編集 | Space: 完了切替 | d: 削除 | /: 検索 | p: 優先度 | s: 状態 | c: クリア | r: 再読込 | q: 終了"
            }
            Overlay::Form(_) => {
                "Tab: 次の項目 | Shift+Tab: 前の項目 | ←/→: 優先度 | Enter: 保存 | Esc: キャンセル"
            }
            Overlay::ConfirmDelete { .. } => "y/Enter: 削除 | n/Esc: キャンセル",
            Overlay::Search { .. } => "Enter: 検索を適用 | Esc: キャンセル",
        }
    }

    fn filter_summary_text(&self) -> String {
        let filter = self.app.filter();
        let text = filter.text.as_deref().unwrap_or("-");
        let priority = filter.priority.map_or("All", Priority::as_str);
        let status = filter.status.map_or("All", Status::as_str);
        format!("検索: {text} | 優先度: {priority} | ステータス: {status}")
    }

    fn status_text(&self) -> Cow<'_, str> {
        self.message.as_ref().map_or(
            Cow::Borrowed("ステータスメッセージはありません"),
            |msg| Cow::Borrowed(msg.text.as_str()),
        )
    }

    fn status_style(&self) -> Style {
        self.message.as_ref().map_or_else(Style::default, Message::style)
    }
}
