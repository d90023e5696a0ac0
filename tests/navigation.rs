use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use smth::app::{Result, SmthError};
use smth::config::SiteConfig;
use smth::domain::{Page, PageKind};
use smth::fetcher::Fetcher;
use smth::layout::WidthRule;
use smth::nav::{Direction, NavigationController};

#[derive(Default)]
struct CannedSite {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl CannedSite {
    fn page(mut self, path: &str, html: &str) -> Self {
        self.pages
            .insert(format!("https://m.newsmth.net{}", path), html.to_string());
        self
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for CannedSite {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .map(|html| html.as_bytes().to_vec())
            .ok_or_else(|| SmthError::Other(format!("404 {}", url)))
    }

    async fn post_form(&self, _url: &str, _form: &[(&str, &str)]) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

const BOARD: &str = r#"<html><body>
<div class="menu sp">Python编程(Python)</div>
<div class="sec nav"><a class="plant">3/3</a></div>
<ul class="list sec">
<li class="top"><div><a href="/article/Python/1">版规</a></div><div>2017-05-01&nbsp;<a href="/user/query/SYSOP">SYSOP</a>|2017-05-02&nbsp;<a href="/user/query/bob">bob</a></div></li>
<li><div><a href="/article/Python/42">asyncio 求助(12)</a></div><div>10:01:02&nbsp;<a href="/user/query/alice">alice</a>|11:22:33&nbsp;<a href="/user/query/carol">carol</a></div></li>
</ul>
</body></html>"#;

const ARTICLE: &str = r#"<html><body>
<div class="menu sp">Python</div>
<div class="sec nav"><a class="plant">1/2</a></div>
<ul class="list sec">
<li class="f">主题:asyncio 求助</li>
<li><div class="nav hl"><div><a href="/user/query/alice">alice</a></div></div><div class="sp">怎么取消任务?<br/>--<br/>※ 来源:·水木社区 m.newsmth.net</div></li>
</ul>
</body></html>"#;

fn site() -> Arc<CannedSite> {
    Arc::new(
        CannedSite::default()
            .page("/board/Python", BOARD)
            .page("/article/Python/42", ARTICLE)
            .page("/article/Python/42?p=2", ARTICLE),
    )
}

fn controller(fetcher: Arc<CannedSite>) -> NavigationController {
    NavigationController::new(fetcher, &SiteConfig::default(), WidthRule::Ascii, 80, 23).unwrap()
}

#[tokio::test]
async fn test_board_cursor_walk() {
    let mut nav = controller(site());
    nav.go_to("/board/Python").await;

    let Page::Board(board) = nav.page() else {
        panic!("expected a board page");
    };
    assert_eq!(board.items.len(), 2);
    assert!(board.items[0].is_pinned);
    assert!(!board.items[1].is_pinned);

    nav.next_link_pos();
    nav.next_link_pos();
    nav.prev_link_pos();
    assert_eq!(nav.links().cursor_index(), 0);

    nav.next_link_pos();
    nav.next_link_pos();
    assert_eq!(nav.links().cursor_index(), 1);
    assert_eq!(nav.links().len(), 2);
}

#[tokio::test]
async fn test_sub_page_keeps_history_depth() {
    let mut nav = controller(site());
    nav.go_to("/board/Python").await;
    nav.go_to("/article/Python/42").await;
    let depth = nav.history().len();

    nav.go_to("/article/Python/42?p=2").await;
    assert_eq!(nav.history().len(), depth);
    assert_eq!(
        nav.current_url(),
        "https://m.newsmth.net/article/Python/42?p=2"
    );
    assert_eq!(nav.page().kind(), PageKind::Article);

    nav.back().await;
    assert_eq!(nav.current_url(), "https://m.newsmth.net/board/Python");
}

#[tokio::test]
async fn test_back_on_single_entry_is_noop() {
    let fetcher = site();
    let mut nav = controller(fetcher.clone());
    nav.go_to("/article/Python/42").await;

    nav.back().await;
    assert_eq!(nav.history().len(), 1);
    assert_eq!(nav.current_url(), "https://m.newsmth.net/article/Python/42");
    assert_eq!(fetcher.request_count(), 1);
}

#[tokio::test]
async fn test_next_page_at_last_page_is_noop() {
    let fetcher = site();
    let mut nav = controller(fetcher.clone());
    nav.go_to("/board/Python").await;
    assert_eq!(nav.page().pagination(), Some((3, 3)));

    nav.page_page(Direction::Next).await;
    assert_eq!(nav.current_url(), "https://m.newsmth.net/board/Python");
    assert_eq!(fetcher.request_count(), 1);

    nav.page_page(Direction::Prev).await;
    assert_eq!(nav.current_url(), "https://m.newsmth.net/board/Python?p=2");
}
