//! Page navigation.
//!
//! [`NavigationController`] owns the back-stack, the current URL, the link
//! cursor and the cached [`PageView`] of the page being shown. Every
//! transition is total: transport failures degrade to an empty page and
//! cursor or page moves at the edges are no-ops.

use std::sync::Arc;

use url::Url;

use crate::app::Result;
use crate::config::SiteConfig;
use crate::domain::{split_page_suffix, with_page_suffix, LinkPositionState, Page, PageKind};
use crate::extract;
use crate::fetcher::Fetcher;
use crate::layout::WidthRule;
use crate::view::{PageView, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// What [`NavigationController::activate`] did with the selected link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Navigated,
    /// The link leaves the forum; the caller decides how to open it.
    External(String),
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub history: Vec<String>,
    pub current_url: String,
    pub links: LinkPositionState,
}

pub struct NavigationController {
    fetcher: Arc<dyn Fetcher>,
    base: Url,
    bookmarks: Vec<String>,
    state: NavigationState,
    view: PageView,
}

impl NavigationController {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        site: &SiteConfig,
        rule: WidthRule,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            base: site.base()?,
            bookmarks: site.bookmark_urls()?,
            state: NavigationState::default(),
            view: PageView::new(Page::empty(PageKind::Section), width, height, rule),
        })
    }

    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    pub fn current_url(&self) -> &str {
        &self.state.current_url
    }

    pub fn links(&self) -> &LinkPositionState {
        &self.state.links
    }

    pub fn page(&self) -> &Page {
        self.view.page()
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn bookmarks(&self) -> &[String] {
        &self.bookmarks
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    /// Start at the first bookmark root.
    pub async fn start(&mut self) {
        if let Some(first) = self.bookmarks.first().cloned() {
            self.go_to(&first).await;
        }
    }

    /// Navigate to `url`, recording it in history.
    pub async fn go_to(&mut self, url: &str) {
        let url = self.resolve(url);
        tracing::info!("Navigating to {}", url);
        self.record_history(&url);
        self.load(&url).await;
    }

    /// Return to the previous history entry.
    pub async fn back(&mut self) {
        if self.state.history.len() <= 1 {
            return;
        }
        self.state.history.pop();
        if let Some(top) = self.state.history.last().cloned() {
            tracing::info!("Back to {}", top);
            self.load(&top).await;
        }
    }

    /// Re-fetch the current URL. History is untouched.
    pub async fn reload(&mut self) {
        if self.state.current_url.is_empty() {
            return;
        }
        let url = self.state.current_url.clone();
        self.load(&url).await;
    }

    /// Step through the bookmark roots, wrapping at either end. Only
    /// applies while a bookmark root is being shown.
    pub async fn cycle_bookmark(&mut self, direction: Direction) {
        let Some(index) = self.bookmark_index(&self.state.current_url) else {
            return;
        };
        let len = self.bookmarks.len();
        let target = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        };
        let url = self.bookmarks[target].clone();
        self.go_to(&url).await;
    }

    /// Move to the neighbouring page of a multi-page board or article.
    pub async fn page_page(&mut self, direction: Direction) {
        let Some((index, count)) = self.view.page().pagination() else {
            return;
        };
        let target = match direction {
            Direction::Next if index < count => index + 1,
            Direction::Prev if index > 1 => index - 1,
            _ => return,
        };
        let (base, _) = split_page_suffix(&self.state.current_url);
        let url = with_page_suffix(base, target);
        self.go_to(&url).await;
    }

    /// Follow the selected link.
    pub async fn activate(&mut self) -> Activation {
        let Some(url) = self.state.links.url().map(str::to_string) else {
            return Activation::Nothing;
        };
        if !self.is_same_site(&url) {
            tracing::info!("External link {}", url);
            return Activation::External(url);
        }
        self.go_to(&url).await;
        Activation::Navigated
    }

    pub fn next_link_pos(&mut self) {
        self.state.links.next_pos();
    }

    pub fn prev_link_pos(&mut self) {
        self.state.links.prev_pos();
    }

    pub fn next_screen(&mut self) -> bool {
        let moved = self.view.next_screen();
        if moved {
            self.refresh_links();
        }
        moved
    }

    pub fn prev_screen(&mut self) -> bool {
        let moved = self.view.prev_screen();
        if moved {
            self.refresh_links();
        }
        moved
    }

    /// Lay the cached page out again for a new viewport.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.view.resize(width, height);
        self.refresh_links();
    }

    async fn load(&mut self, url: &str) {
        self.state.links.clear();
        self.state.current_url = url.to_string();

        let html = match self.fetcher.get(url).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                String::new()
            }
        };

        let page = extract::extract_for_url(url, &html);
        let (width, height, rule) = self.view.geometry();
        self.view = PageView::new(page, width, height, rule);
        self.refresh_links();
    }

    fn refresh_links(&mut self) {
        let mut positions = self.view.screen().links;
        for pos in &mut positions {
            pos.url = self.resolve(&pos.url);
        }
        self.state.links.reset(positions);
    }

    fn record_history(&mut self, url: &str) {
        let Some(top) = self.state.history.last().cloned() else {
            self.state.history.push(url.to_string());
            return;
        };
        if top == url {
            return;
        }

        if self.bookmark_index(url).is_some() {
            self.state.history.pop();
        }

        let (base, _) = split_page_suffix(url);
        let same_resource = [top.as_str(), self.state.current_url.as_str()]
            .iter()
            .any(|other| split_page_suffix(other).0 == base);
        if same_resource {
            if self.state.history.is_empty() {
                self.state.history.push(url.to_string());
            }
            return;
        }

        if self.state.history.last().map(String::as_str) != Some(url) {
            self.state.history.push(url.to_string());
        }
    }

    fn bookmark_index(&self, url: &str) -> Option<usize> {
        self.bookmarks.iter().position(|b| b == url)
    }

    fn resolve(&self, url: &str) -> String {
        self.base
            .join(url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| url.to_string())
    }

    fn is_same_site(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed.host_str() == self.base.host_str(),
            Err(_) => true,
        }
    }
}
