use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
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
use crate::state::CityInput;

/// Modal with the city field. The placeholder behavior lives in
/// `CityInput`; this component only maps keystrokes to actions and renders
/// the field in its muted or normal color.
pub struct SearchOverlay {
    modal: Modal,
}

pub struct SearchOverlayProps<'a> {
    pub input: &'a CityInput,
    pub is_focused: bool,
    // Action constructor
    pub on_change: fn(String) -> Action,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editable content: user text, or empty when the field somehow still
    /// shows the placeholder
    fn edit_text(input: &CityInput) -> &str {
        match input {
            CityInput::Placeholder => "",
            CityInput::UserText(text) => text,
        }
    }
}

impl Component<Action> for SearchOverlay {
    type Props<'a> = SearchOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc => Some(Action::SearchClose),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => {
                let mut text = Self::edit_text(props.input).to_string();
                text.pop();
                Some((props.on_change)(text))
            }
            KeyCode::Char(c) => {
                let mut text = Self::edit_text(props.input).to_string();
                text.push(c);
                Some((props.on_change)(text))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 24 || area.height < 7 {
            return;
        }

        let modal_area = centered_rect(44, 7, area);
        let input = props.input;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hints
            ])
            .split(content_area);

            frame.render_widget(
                Paragraph::new(Line::from("Search city").centered()),
                chunks[0],
            );

            let (text_style, cursor) = if input.is_muted() {
                (Style::default().fg(Color::DarkGray), None)
            } else {
                (
                    Style::default().fg(Color::Reset),
                    Some(Span::styled(
                        "█",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::SLOW_BLINK),
                    )),
                )
            };
            let mut spans = vec![
                Span::raw("> "),
                Span::styled(input.display_text().to_string(), text_style),
            ];
            if let Some(cursor) = cursor {
                spans.push(cursor);
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

            let hints = Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::styled(" search  ", Style::default().fg(Color::DarkGray)),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
            ])
            .centered();
            frame.render_widget(Paragraph::new(hints), chunks[3]);
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
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::xy(2, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::SearchClose,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn props(input: &CityInput) -> SearchOverlayProps<'_> {
        SearchOverlayProps {
            input,
            is_focused: true,
            on_change: Action::SearchInputChange,
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut component = SearchOverlay::new();
        let input = CityInput::UserText("Lond".into());

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::from(KeyCode::Char('o'))),
                props(&input),
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInputChange("Londo".into()));
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut component = SearchOverlay::new();
        let input = CityInput::UserText("Lo".into());

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::from(KeyCode::Backspace)),
                props(&input),
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInputChange("L".into()));
    }

    #[test]
    fn test_enter_submits_and_esc_closes() {
        let mut component = SearchOverlay::new();
        let input = CityInput::UserText("London".into());

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::from(KeyCode::Enter)),
                props(&input),
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchSubmit);

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::from(KeyCode::Esc)),
                props(&input),
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchClose);
    }

    #[test]
    fn test_placeholder_edits_start_empty() {
        // The reducer clears the placeholder on focus, but a stray
        // keystroke must never type into the prompt text itself
        let mut component = SearchOverlay::new();
        let input = CityInput::Placeholder;

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(KeyEvent::from(KeyCode::Char('L'))),
                props(&input),
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInputChange("L".into()));
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut component = SearchOverlay::new();
        let input = CityInput::UserText("x".into());
        let props = SearchOverlayProps {
            input: &input,
            is_focused: false,
            on_change: Action::SearchInputChange,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("a")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
