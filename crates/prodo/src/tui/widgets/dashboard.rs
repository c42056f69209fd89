use prodo_app::TaskStore;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::super::view::Ui;

impl<S: TaskStore> Ui<S> {
    /// Dashboard header: the four counters plus a completion gauge, all
    /// measured over the unfiltered list.
    pub(in crate::tui) fn draw_dashboard(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let metrics = self.app.metrics();
        let tiles = [
            ("合計", metrics.total.to_string()),
            ("完了", metrics.completed.to_string()),
            ("未完了", metrics.pending.to_string()),
            ("達成率", format!("{:.2}%", metrics.completion_rate())),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(rows[0]);

        for (column, (title, value)) in columns.iter().zip(tiles) {
            let tile = Paragraph::new(value).block(Block::default().title(title).borders(Borders::ALL));
            f.render_widget(tile, *column);
        }

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio((metrics.completion_rate() / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.2}%", metrics.completion_rate()));
        f.render_widget(gauge, rows[1]);
    }
}
