use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, DisableBracketedPaste, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, EventStream,
};
use crossterm::execute;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::UnboundedReceiver;

use search_suggest::app::App;
use search_suggest::cli::Cli;
use search_suggest::config::load_config;
use search_suggest::controller::Wakeup;
use search_suggest::fetch::CkanClient;
use search_suggest::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = cli.log_file.clone().or_else(logging::default_log_path)
        && !logging::init(&path)
    {
        eprintln!(
            "search-suggest: cannot write log file {}, logging disabled",
            path.display()
        );
    }

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    let site = config.site_url()?;
    let client = CkanClient::new(&site)?;
    log::info!("Suggesting from {}", client.endpoint());

    let (app, wakeups) = App::new(&config, site, Arc::new(client));

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    execute!(
        stdout(),
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;

    let result = run(terminal, app, wakeups).await;

    // Restore terminal before printing anything
    let _ = execute!(
        stdout(),
        DisableBracketedPaste,
        DisableFocusChange,
        DisableMouseCapture
    );
    ratatui::restore();

    if let Some(url) = result? {
        println!("{}", url);
    }
    Ok(())
}

/// Drive the app until it quits; returns the chosen URL, if any
async fn run(
    mut terminal: DefaultTerminal,
    mut app: App,
    mut wakeups: UnboundedReceiver<Wakeup>,
) -> Result<Option<String>> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            Some(wakeup) = wakeups.recv() => app.on_wakeup(wakeup),
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_terminal_event(event),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }

        if app.should_quit() {
            break;
        }
    }

    app.controller.detach();
    Ok(app.take_target())
}
