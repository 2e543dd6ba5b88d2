//! wttr-tui - terminal weather viewer backed by wttr.in

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use wttr_tui::action::Action;
use wttr_tui::api;
use wttr_tui::components::{
    Component, MessageDialog, MessageDialogProps, SearchOverlay, SearchOverlayProps,
    WeatherDisplay, WeatherDisplayProps,
};
use wttr_tui::effect::Effect;
use wttr_tui::reducer::reducer;
use wttr_tui::state::{AppState, LOADING_TICK_MS};

/// Terminal weather for any city, courtesy of wttr.in
#[derive(Parser, Debug)]
#[command(name = "wttr-tui")]
#[command(about = "Type a city, get current weather and a 3-day forecast")]
struct Args {
    /// City to fetch on startup (otherwise use the in-app search)
    #[arg(long, short)]
    city: Option<String>,

    /// Refresh interval in seconds (minimum 1)
    #[arg(long, short, default_value = "300", value_parser = clap::value_parser!(u64).range(1..))]
    refresh_interval: u64,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WttrComponentId {
    Display,
    Search,
    Dialog,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WttrContext {
    Main,
    Search,
    Dialog,
}

impl EventRoutingState<WttrComponentId, WttrContext> for AppState {
    fn focused(&self) -> Option<WttrComponentId> {
        if self.dialog.is_some() {
            Some(WttrComponentId::Dialog)
        } else if self.search_mode {
            Some(WttrComponentId::Search)
        } else {
            Some(WttrComponentId::Display)
        }
    }

    fn modal(&self) -> Option<WttrComponentId> {
        if self.dialog.is_some() {
            Some(WttrComponentId::Dialog)
        } else if self.search_mode {
            Some(WttrComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WttrComponentId) -> WttrContext {
        match id {
            WttrComponentId::Display => WttrContext::Main,
            WttrComponentId::Search => WttrContext::Search,
            WttrComponentId::Dialog => WttrContext::Dialog,
        }
    }

    fn default_context(&self) -> WttrContext {
        WttrContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        refresh_interval,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let has_initial_city = city.is_some();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(city))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        refresh_interval,
        has_initial_city,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct WttrUi {
    display: WeatherDisplay,
    search: SearchOverlay,
    dialog: MessageDialog,
}

impl WttrUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay,
            search: SearchOverlay::new(),
            dialog: MessageDialog::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WttrComponentId>,
    ) {
        event_ctx.set_component_area(WttrComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode && state.dialog.is_none(),
        };
        self.display.render(frame, area, props);

        if state.search_mode {
            let modal_area = centered_rect(44, 7, area);
            event_ctx.set_component_area(WttrComponentId::Search, modal_area);
            let props = SearchOverlayProps {
                input: &state.input,
                is_focused: render_ctx.is_focused() && state.dialog.is_none(),
                on_change: Action::SearchInputChange,
            };
            self.search.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&WttrComponentId::Search);
        }

        if let Some(dialog) = &state.dialog {
            let modal_area = centered_rect(46, 7, area);
            event_ctx.set_component_area(WttrComponentId::Dialog, modal_area);
            let props = MessageDialogProps {
                dialog,
                is_focused: render_ctx.is_focused(),
            };
            self.dialog.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&WttrComponentId::Dialog);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchOverlayProps {
            input: &state.input,
            is_focused: true,
            on_change: Action::SearchInputChange,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }

    fn handle_dialog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(dialog) = &state.dialog else {
            return HandlerResponse::ignored();
        };
        let props = MessageDialogProps {
            dialog,
            is_focused: true,
        };
        let actions: Vec<_> = self.dialog.handle_event(event, props).into_iter().collect();
        // A modal dialog swallows everything, matched or not
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    refresh_interval: u64,
    has_initial_city: bool,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WttrUi::new()));
    let mut bus: EventBus<AppState, Action, WttrComponentId, WttrContext> = EventBus::new();
    let keybindings: Keybindings<WttrContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(WttrComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(WttrComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_dialog = Rc::clone(&ui);
    bus.register(WttrComponentId::Dialog, move |event, state| {
        ui_dialog
            .borrow_mut()
            .handle_dialog_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    let initial_action = has_initial_city.then_some(Action::WeatherFetch);

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
                    || Action::Tick,
                );

                runtime.subscriptions().interval(
                    "refresh",
                    Duration::from_secs(refresh_interval),
                    || Action::WeatherFetch,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. Re-spawning under the same key
/// replaces any fetch still in flight, so searches never overlap.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchWeather { city } => {
            ctx.tasks().spawn("weather", async move {
                match api::fetch_weather(&city).await {
                    Ok(report) => Action::WeatherDidLoad(report),
                    Err(e) => Action::WeatherDidError(e.to_string()),
                }
            });
        }
    }
}
