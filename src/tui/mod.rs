pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};

use self::app::TuiApp;
use self::event::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Rows reserved below the page for the status bar.
const STATUS_ROWS: u16 = 1;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn page_area(width: u16, height: u16) -> (usize, usize) {
    (width as usize, height.saturating_sub(STATUS_ROWS) as usize)
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let size = terminal.size()?;
    let (width, height) = page_area(size.width, size.height);
    let mut tui_app = TuiApp::new(ctx.controller(width, height)?);
    let event_handler = EventHandler::new();
    let colors = &ctx.config.colors;

    tui_app.is_loading = true;
    terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;
    tui_app.controller.start().await;
    tui_app.is_loading = false;

    loop {
        terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = ctx.config.keybindings.get_action(&key);

                if TuiApp::fetches(action) {
                    tui_app.is_loading = true;
                    terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;
                }
                let external = tui_app.handle(action).await;
                tui_app.is_loading = false;

                if let Some(url) = external {
                    if let Err(e) = open::that(&url) {
                        tui_app.set_status(format!("Failed to open browser: {}", e));
                    } else {
                        tui_app.set_status(format!("Opened {}", url));
                    }
                }
            }
            AppEvent::Resize(width, height) => {
                let (width, height) = page_area(width, height);
                tui_app.controller.resize(width, height);
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}
