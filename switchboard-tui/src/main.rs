//! Switchboard console entry point.

use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tokio::sync::mpsc;

use switchboard_client::queries::{api_keys, channels, session, traces, usage, users};
use switchboard_client::transport::Credentials;
use switchboard_client::{ConnectionFetcher, FetchSpec, HttpTransport};
use switchboard_core::SessionUser;
use switchboard_tui::config::TuiConfig;
use switchboard_tui::error::TuiError;
use switchboard_tui::events::{PageResult, TuiEvent};
use switchboard_tui::keys::{map_filter_key, map_key, Action};
use switchboard_tui::nav::View;
use switchboard_tui::notifications::NotificationLevel;
use switchboard_tui::state::{App, FilterEditOutcome, Modal};
use switchboard_tui::views::render_view;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let _ = color_eyre::install();
    let config = TuiConfig::load()?;
    init_tracing(&config)?;

    let credentials = Credentials {
        api_key: config.auth.api_key.clone(),
        bearer_token: config.auth.bearer_token.clone(),
    };
    let transport = HttpTransport::new(
        &config.graphql_url,
        &credentials,
        Duration::from_millis(config.request_timeout_ms),
    )?;
    let fetcher = Arc::new(ConnectionFetcher::new(Arc::new(transport)));
    let mut app = App::new(config, fetcher);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());
    spawn_session_fetch(Arc::clone(&app.fetcher), event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                let _ = event_tx.send(TuiEvent::Tick).await;
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &TuiConfig) -> Result<(), TuiError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

fn spawn_session_fetch(fetcher: Arc<ConnectionFetcher>, sender: mpsc::Sender<TuiEvent>) {
    let spec = match session::viewer_spec() {
        Ok(spec) => spec,
        Err(err) => {
            tracing::error!(error = %err, "viewer query failed to compose");
            return;
        }
    };
    tokio::spawn(async move {
        match fetcher.fetch_object::<SessionUser>(&spec).await {
            Ok(user) => {
                let _ = sender.send(TuiEvent::SessionLoaded(Box::new(user))).await;
            }
            Err(err) => {
                let _ = sender
                    .send(TuiEvent::SessionFailed(format!("Session load failed: {}", err)))
                    .await;
            }
        }
    });
}

async fn handle_event(
    app: &mut App,
    event: TuiEvent,
    sender: &mpsc::Sender<TuiEvent>,
) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if app.filter_editor.is_some() {
                if let Some(filter_key) = map_filter_key(key) {
                    if let FilterEditOutcome::Committed { changed: true } =
                        app.filter_edit_key(filter_key)
                    {
                        refresh_view(app, sender);
                    }
                }
                return Ok(false);
            }
            if let Some(action) = map_key(key) {
                return handle_action(app, action, sender).await;
            }
        }
        TuiEvent::SessionLoaded(user) => {
            app.notify(
                NotificationLevel::Success,
                format!("Signed in as {}", user.display_name),
            );
            app.set_session(*user);
            refresh_view(app, sender);
        }
        TuiEvent::SessionFailed(message) => {
            app.notify(NotificationLevel::Error, message);
        }
        TuiEvent::PageLoaded { key, page } => {
            if !app.apply_page(key, *page) {
                tracing::debug!(key = %key, "discarded superseded page");
            }
        }
        TuiEvent::FetchFailed { key, message } => {
            app.fetch_failed(key, message);
        }
        TuiEvent::Resize { .. } | TuiEvent::Tick => {}
    }
    Ok(false)
}

async fn handle_action(
    app: &mut App,
    action: Action,
    sender: &mpsc::Sender<TuiEvent>,
) -> Result<bool, TuiError> {
    match action {
        Action::Quit => return Ok(true),
        Action::NextView => {
            app.active_view = app.active_view.next();
            refresh_view(app, sender);
        }
        Action::PrevView => {
            app.active_view = app.active_view.previous();
            refresh_view(app, sender);
        }
        Action::SwitchView(index) => {
            if let Some(view) = View::from_index(index) {
                app.active_view = view;
                refresh_view(app, sender);
            }
        }
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::NextPage => {
            if app.next_page() {
                refresh_view(app, sender);
            }
        }
        Action::PrevPage => {
            if app.previous_page() {
                refresh_view(app, sender);
            }
        }
        Action::GrowPageSize => {
            if app.step_page_size(true) {
                refresh_view(app, sender);
            }
        }
        Action::ShrinkPageSize => {
            if app.step_page_size(false) {
                refresh_view(app, sender);
            }
        }
        Action::EditFilter => app.begin_filter_edit(),
        Action::ClearFilters => {
            if app.clear_active_filters() {
                refresh_view(app, sender);
            }
        }
        Action::Refresh => {
            let entity = active_entity(app.active_view);
            let evicted = app.fetcher.invalidate_entity(entity).await;
            tracing::debug!(entity, evicted, "manual refresh");
            refresh_view(app, sender);
        }
        Action::OpenHelp => {
            app.modal = Some(Modal {
                title: "Keybindings".to_string(),
                message: "j/k move • Tab switch view • [ ] page • +/- page size • \
                          f edit filters • F clear filters • r refresh • q quit"
                    .to_string(),
            });
        }
        Action::Confirm | Action::Cancel => app.modal = None,
    }
    Ok(false)
}

fn active_entity(view: View) -> &'static str {
    match view {
        View::ApiKeys => api_keys::ENTITY,
        View::Channels => channels::ENTITY,
        View::Users => users::ENTITY,
        View::UsageLogs => usage::ENTITY,
        View::RequestTraces => traces::ENTITY,
    }
}

/// Kick off a fetch for the active screen. The screen records the request's
/// key; results arriving under any other key are discarded on receipt.
fn refresh_view(app: &mut App, sender: &mpsc::Sender<TuiEvent>) {
    if !app.active_view_permitted() {
        tracing::debug!(view = ?app.active_view, "view not permitted; skipping fetch");
        return;
    }
    match app.active_view {
        View::ApiKeys => {
            match api_keys::list_spec(
                &app.api_key_view.filters,
                &app.api_key_view.pager,
                app.capabilities,
            ) {
                Ok(spec) => {
                    app.api_key_view.begin_fetch(spec.key());
                    spawn_page_fetch(app, spec, sender, PageResult::ApiKeys);
                }
                Err(err) => app.notify(NotificationLevel::Error, err.to_string()),
            }
        }
        View::Channels => {
            match channels::list_spec(
                &app.channel_view.filters,
                &app.channel_view.pager,
                app.capabilities,
            ) {
                Ok(spec) => {
                    app.channel_view.begin_fetch(spec.key());
                    spawn_page_fetch(app, spec, sender, PageResult::Channels);
                }
                Err(err) => app.notify(NotificationLevel::Error, err.to_string()),
            }
        }
        View::Users => {
            match users::list_spec(&app.user_view.filters, &app.user_view.pager, app.capabilities)
            {
                Ok(spec) => {
                    app.user_view.begin_fetch(spec.key());
                    spawn_page_fetch(app, spec, sender, PageResult::Users);
                }
                Err(err) => app.notify(NotificationLevel::Error, err.to_string()),
            }
        }
        View::UsageLogs => {
            match usage::list_spec(&app.usage_view.filters, &app.usage_view.pager, app.capabilities)
            {
                Ok(spec) => {
                    app.usage_view.begin_fetch(spec.key());
                    spawn_page_fetch(app, spec, sender, PageResult::Usage);
                }
                Err(err) => app.notify(NotificationLevel::Error, err.to_string()),
            }
        }
        View::RequestTraces => {
            match traces::list_spec(
                &app.trace_view.filters,
                &app.trace_view.pager,
                app.capabilities,
            ) {
                Ok(spec) => {
                    app.trace_view.begin_fetch(spec.key());
                    spawn_page_fetch(app, spec, sender, PageResult::Traces);
                }
                Err(err) => app.notify(NotificationLevel::Error, err.to_string()),
            }
        }
    }
}

fn spawn_page_fetch<T, W>(
    app: &App,
    spec: FetchSpec,
    sender: &mpsc::Sender<TuiEvent>,
    wrap: W,
) where
    T: serde::de::DeserializeOwned + Send + 'static,
    W: FnOnce(switchboard_client::Connection<T>) -> PageResult + Send + 'static,
{
    let fetcher = Arc::clone(&app.fetcher);
    let sender = sender.clone();
    let key = spec.key();
    tokio::spawn(async move {
        match fetcher.fetch_connection::<T>(&spec).await {
            Ok(connection) => {
                let _ = sender
                    .send(TuiEvent::PageLoaded {
                        key,
                        page: Box::new(wrap(connection)),
                    })
                    .await;
            }
            Err(err) => {
                tracing::warn!(key = %key, context = err.context(), error = %err, "fetch failed");
                let _ = sender
                    .send(TuiEvent::FetchFailed {
                        key,
                        message: err.to_string(),
                    })
                    .await;
            }
        }
    });
}
