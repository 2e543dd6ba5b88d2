use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::ForecastDay;

/// Width of one forecast card, borders included
const CARD_WIDTH: u16 = 18;

/// Row of one bordered card per forecast day
pub struct ForecastRow;

pub struct ForecastRowProps<'a> {
    pub forecast: &'a [ForecastDay],
}

impl Component<Action> for ForecastRow {
    type Props<'a> = ForecastRowProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.forecast.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = props
            .forecast
            .iter()
            .map(|_| Constraint::Length(CARD_WIDTH.min(area.width)))
            .collect();
        let cards = Layout::horizontal(constraints)
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        for (day, card_area) in props.forecast.iter().zip(cards.iter()) {
            let card = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded);
            frame.render_widget(
                Paragraph::new(day.display())
                    .alignment(Alignment::Center)
                    .block(card),
                *card_area,
            );
        }
    }
}
