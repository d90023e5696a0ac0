use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

#[derive(Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Block until a key press or a resize arrives.
    pub fn next(&self) -> Result<AppEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(AppEvent::Key(key));
                }
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    LinkUp,
    LinkDown,
    Back,
    Activate,
    NextBookmark,
    PrevBookmark,
    NextScreen,
    PrevScreen,
    NextPage,
    PrevPage,
    Reload,
    OpenInBrowser,
    None,
}
