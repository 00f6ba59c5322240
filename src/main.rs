use rtc_debug_panel::adapters::{HttpMediaAdapter, ReqwestHttpClient, SimulatedAdapter};
use rtc_debug_panel::app::App;
use rtc_debug_panel::cli::{parse_args, usage, CliCommand};
use rtc_debug_panel::config::{AdapterSource, PanelConfig};
use rtc_debug_panel::i18n::Localizer;
use rtc_debug_panel::logging::init_logging;
use rtc_debug_panel::poller::StatsPoller;
use rtc_debug_panel::store::SnapshotStore;
use rtc_debug_panel::terminal::{install_panic_hook, TerminalManager};
use rtc_debug_panel::traits::{MediaAdapter, Roster, SharedRoster};
use rtc_debug_panel::ui;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// UI loop wake-up interval when nothing happens
const FRAME_TICK: Duration = Duration::from_millis(16);

fn build_adapter(config: &PanelConfig) -> (Arc<dyn MediaAdapter>, Arc<dyn Roster>) {
    match &config.adapter {
        AdapterSource::Simulated => {
            tracing::info!("using simulated adapter");
            (
                Arc::new(SimulatedAdapter::new()),
                Arc::new(SharedRoster::new()),
            )
        }
        AdapterSource::Bridge(url) => {
            tracing::info!(url = %url, "using adapter bridge");
            let adapter = HttpMediaAdapter::new(ReqwestHttpClient::new(), url.clone());
            let roster = adapter.roster();
            (Arc::new(adapter), Arc::new(roster))
        }
    }
}

/// Two cycles one period apart, so speeds are populated, then print JSON.
async fn print_once(poller: &StatsPoller) -> Result<()> {
    poller.poll_once().await?;
    tokio::time::sleep(poller.period()).await;
    poller.poll_once().await?;

    let snapshot = poller.store().current();
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("app message receiver already taken"))?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }
        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(FRAME_TICK) => {}

            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) => app.handle_key_event(key),
                Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(err)) => tracing::warn!("terminal event error: {}", err),
                None => app.quit(),
            },

            Some(msg) = message_rx.recv() => app.handle_message(msg),
        }
    }
}

async fn run_tui(config: PanelConfig, adapter: Arc<dyn MediaAdapter>, poller: StatsPoller) -> Result<()> {
    install_panic_hook();
    let mut manager = TerminalManager::new().wrap_err("failed to set up the terminal")?;

    let mut app = App::new(adapter, poller, Localizer::new(config.locale));
    app.start_polling();

    let result = run_app(manager.terminal(), &mut app).await;

    app.shutdown();
    manager.restore();
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let overrides = match parse_args(std::env::args())? {
        CliCommand::Version => {
            println!("rtcdbg {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        }
        CliCommand::Run(overrides) => overrides,
    };

    let config = PanelConfig::from_env()?.apply_cli(&overrides);
    if let Err(err) = init_logging(config.log_file.as_deref()) {
        eprintln!("rtcdbg: logging disabled: {}", err);
        init_logging(None)?;
    }
    tracing::info!(version = VERSION, adapter = ?config.adapter, "starting");

    let (adapter, roster) = build_adapter(&config);
    let poller =
        StatsPoller::new(adapter.clone(), roster, SnapshotStore::new()).with_period(config.refresh);

    if config.once {
        return print_once(&poller).await;
    }
    run_tui(config, adapter, poller).await
}
