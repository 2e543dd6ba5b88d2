use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::Component;
use crate::action::Action;
use crate::state::{Dialog, DialogKind};

/// Modal message box for validation warnings and fetch errors.
/// Any Enter/Esc keypress dismisses it; everything else is swallowed.
pub struct MessageDialog {
    modal: Modal,
}

pub struct MessageDialogProps<'a> {
    pub dialog: &'a Dialog,
    pub is_focused: bool,
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl MessageDialog {
    pub fn new() -> Self {
        Self::default()
    }

    fn title_style(kind: DialogKind) -> Style {
        match kind {
            DialogKind::Warning => Style::default().fg(Color::Yellow).bold(),
            DialogKind::Error => Style::default().fg(Color::Red).bold(),
        }
    }
}

impl Component<Action> for MessageDialog {
    type Props<'a> = MessageDialogProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::DialogDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 24 || area.height < 7 {
            return;
        }

        let modal_area = centered_rect(46, 7, area);
        let dialog = props.dialog;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(2), // Message (may wrap to two lines)
                Constraint::Length(1), // Hint
            ])
            .split(content_area);

            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(
                        dialog.title.clone(),
                        Self::title_style(dialog.kind),
                    ))
                    .centered(),
                ),
                chunks[0],
            );
            frame.render_widget(
                Paragraph::new(Line::from(dialog.message.clone()).centered())
                    .wrap(ratatui::widgets::Wrap { trim: true }),
                chunks[1],
            );
            frame.render_widget(
                Paragraph::new(
                    Line::from(vec![
                        Span::styled("Enter", Style::default().fg(Color::Cyan)),
                        Span::styled(" dismiss", Style::default().fg(Color::DarkGray)),
                    ])
                    .centered(),
                ),
                chunks[2],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(45, 35, 35)),
                        padding: Padding::xy(2, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::DialogDismiss,
                render_content: &mut render_content,
            },
        );
    }
}
