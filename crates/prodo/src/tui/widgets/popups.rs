use prodo_app::TaskStore;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::form::{FormFocus, TaskForm};
use super::super::view::Ui;
use super::util::{centered_rect, truncate_with_ellipsis};

const FORM_POPUP_HEIGHT: u16 = 14;
const CONFIRM_POPUP_HEIGHT: u16 = 5;
const SEARCH_POPUP_HEIGHT: u16 = 3;

impl<S: TaskStore> Ui<S> {
    pub(in crate::tui) fn draw_form_popup(&self, f: &mut Frame<'_>, form: &TaskForm) {
        let popup_area = centered_rect(f.area(), 60, FORM_POPUP_HEIGHT);

        let block = Block::default()
            .title(form.popup_title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        f.render_widget(Clear, popup_area);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(inner);

        draw_form_field(f, rows[0], "タイトル", &form.title, form.focus == FormFocus::Title);
        draw_form_field(
            f,
            rows[1],
            "説明",
            &form.description,
            form.focus == FormFocus::Description,
        );
        draw_form_field(
            f,
            rows[2],
            "期限 (YYYY-MM-DD)",
            &form.due_date,
            form.focus == FormFocus::DueDate,
        );

        let focused = form.focus == FormFocus::Priority;
        let priority = Paragraph::new(Line::from(vec![
            Span::raw("◀ "),
            Span::styled(
                form.priority.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ▶"),
        ]))
        .block(field_block("優先度", focused));
        f.render_widget(priority, rows[3]);
    }

    pub(in crate::tui) fn draw_confirm_popup(&self, f: &mut Frame<'_>, title: &str) {
        let popup_area = centered_rect(f.area(), 50, CONFIRM_POPUP_HEIGHT);

        let block = Block::default()
            .title("タスク削除")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        f.render_widget(Clear, popup_area);
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let prompt = Paragraph::new(vec![
            Line::from(format!("「{}」を削除しますか?", truncate_with_ellipsis(title, 40))),
            Line::from(Span::styled(
                "この操作は取り消せません",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        f.render_widget(prompt, inner);
    }

    pub(in crate::tui) fn draw_search_popup(&self, f: &mut Frame<'_>, input: &str) {
        let popup_area = centered_rect(f.area(), 50, SEARCH_POPUP_HEIGHT);

        f.render_widget(Clear, popup_area);
        let field = Paragraph::new(format!("{input}▏")).block(
            Block::default()
                .title("検索")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(field, popup_area);
    }
}

fn draw_form_field(
    f: &mut Frame<'_>,
    area: ratatui::layout::Rect,
    title: &str,
    value: &str,
    focused: bool,
) {
    let visible_width = usize::from(area.width.saturating_sub(2));
    let shown = truncate_with_ellipsis(value, visible_width);
    let mut text = shown.into_owned();
    if focused {
        text.push('▏');
    }
    let field = Paragraph::new(text).block(field_block(title, focused));
    f.render_widget(field, area);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title.to_owned())
        .borders(Borders::ALL)
        .border_style(border_style)
}
