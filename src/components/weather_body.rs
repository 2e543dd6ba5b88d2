use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};
use tui_dispatch::DataResource;

use super::{Component, ForecastRow, ForecastRowProps};
use crate::action::Action;
use crate::state::{spinner_frame, AppState, WeatherReport};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = WeatherView::from_state(props.state);
        match view {
            WeatherView::Ready(report) => render_ready(frame, area, props.state, report),
            WeatherView::Loading => render_loading(frame, area, props.state),
            WeatherView::Error(error) => render_error(frame, area, error),
            WeatherView::Empty => render_empty_hint(frame, area),
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, report: &WeatherReport) {
    let mut spans = vec![Span::styled(
        report.city.clone(),
        Style::default().fg(Color::Cyan).bold(),
    )];
    if state.is_refreshing {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            spinner_frame(state.tick_count),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
}

fn render_ready(frame: &mut Frame, area: Rect, state: &AppState, report: &WeatherReport) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // City header
        Constraint::Length(9), // Current conditions card
        Constraint::Length(1), // Forecast title
        Constraint::Length(7), // Forecast cards
    ])
    .flex(Flex::Center)
    .split(area);

    render_header(frame, chunks[0], state, report);

    let card = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::horizontal(2));
    frame.render_widget(
        Paragraph::new(report.current.display())
            .alignment(Alignment::Left)
            .block(card),
        centered_columns(chunks[1], 44),
    );

    frame.render_widget(
        Paragraph::new(Line::from("3-Day Forecast").bold().centered()),
        chunks[2],
    );

    let mut row = ForecastRow;
    row.render(
        frame,
        chunks[3],
        ForecastRowProps {
            forecast: &report.forecast,
        },
    );
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let line = Line::from(vec![
        Span::styled(
            spinner_frame(state.tick_count),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" Fetching weather...", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_empty_hint(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to search for a city", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}

// ============================================================================
// Helpers
// ============================================================================

enum WeatherView<'a> {
    Ready(&'a WeatherReport),
    Loading,
    Error(&'a str),
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            DataResource::Loaded(report) => WeatherView::Ready(report),
            DataResource::Loading => WeatherView::Loading,
            DataResource::Failed(error) => WeatherView::Error(error),
            DataResource::Empty => WeatherView::Empty,
        }
    }
}

/// Clamp a rect to `width` columns, centered
fn centered_columns(area: Rect, width: u16) -> Rect {
    Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(area)[0]
}
