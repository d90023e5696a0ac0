use crate::nav::{Activation, Direction, NavigationController};
use crate::tui::event::Action;

pub struct TuiApp {
    pub controller: NavigationController,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub is_loading: bool,
}

impl TuiApp {
    pub fn new(controller: NavigationController) -> Self {
        Self {
            controller,
            should_quit: false,
            status_message: None,
            is_loading: false,
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Whether `action` fetches a page before it completes.
    pub fn fetches(action: Action) -> bool {
        matches!(
            action,
            Action::Back
                | Action::Activate
                | Action::NextBookmark
                | Action::PrevBookmark
                | Action::NextPage
                | Action::PrevPage
                | Action::Reload
        )
    }

    /// Apply `action`. Returns a URL the caller should open outside the
    /// terminal.
    pub async fn handle(&mut self, action: Action) -> Option<String> {
        self.clear_status();
        match action {
            Action::Quit => self.should_quit = true,
            Action::LinkUp => self.controller.prev_link_pos(),
            Action::LinkDown => self.controller.next_link_pos(),
            Action::Back => self.controller.back().await,
            Action::Activate => match self.controller.activate().await {
                Activation::External(url) => return Some(url),
                Activation::Navigated | Activation::Nothing => {}
            },
            Action::NextBookmark => self.controller.cycle_bookmark(Direction::Next).await,
            Action::PrevBookmark => self.controller.cycle_bookmark(Direction::Prev).await,
            Action::NextScreen => {
                if !self.controller.next_screen() {
                    self.set_status("Last screen".to_string());
                }
            }
            Action::PrevScreen => {
                if !self.controller.prev_screen() {
                    self.set_status("First screen".to_string());
                }
            }
            Action::NextPage => self.controller.page_page(Direction::Next).await,
            Action::PrevPage => self.controller.page_page(Direction::Prev).await,
            Action::Reload => self.controller.reload().await,
            Action::OpenInBrowser => {
                let url = self.controller.current_url();
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
            Action::None => {}
        }
        None
    }
}
