use crate::domain::{ArticlePage, BoardPage, SectionPage};

/// Page category, inferred from the URL path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageKind {
    #[default]
    Section,
    Board,
    Article,
}

impl PageKind {
    const PRIORITY: [(PageKind, &'static str); 3] = [
        (PageKind::Section, "section"),
        (PageKind::Board, "board"),
        (PageKind::Article, "article"),
    ];

    /// Classify a URL by the first of `section`, `board`, `article` found as
    /// a path segment. Anything else is a section-style listing.
    pub fn from_url(url: &str) -> Self {
        let (path, _) = split_page_suffix(url);
        let segments: Vec<&str> = path.split(['/', '?', '#']).collect();

        Self::PRIORITY
            .iter()
            .find(|(_, literal)| segments.contains(literal))
            .map(|(kind, _)| *kind)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            PageKind::Section => "section",
            PageKind::Board => "board",
            PageKind::Article => "article",
        }
    }
}

/// A fully extracted page of any category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Section(SectionPage),
    Board(BoardPage),
    Article(ArticlePage),
}

impl Page {
    pub fn empty(kind: PageKind) -> Self {
        match kind {
            PageKind::Section => Page::Section(SectionPage::default()),
            PageKind::Board => Page::Board(BoardPage::default()),
            PageKind::Article => Page::Article(ArticlePage::default()),
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            Page::Section(_) => PageKind::Section,
            Page::Board(_) => PageKind::Board,
            Page::Article(_) => PageKind::Article,
        }
    }

    /// `(page_index, page_count)` for paginated pages.
    pub fn pagination(&self) -> Option<(usize, usize)> {
        match self {
            Page::Section(_) => None,
            Page::Board(board) => Some((board.page_index, board.page_count)),
            Page::Article(article) => Some((article.page_index, article.page_count)),
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Page::Section(section) => section.items.len(),
            Page::Board(board) => board.items.len(),
            Page::Article(article) => article.items.len(),
        }
    }
}

/// Split a trailing `?p=N` sub-page suffix off a URL.
pub fn split_page_suffix(url: &str) -> (&str, Option<usize>) {
    if let Some(idx) = url.rfind("?p=") {
        let digits = &url[idx + 3..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(page) = digits.parse::<usize>() {
                return (&url[..idx], Some(page));
            }
        }
    }
    (url, None)
}

/// Build the URL of page `page` of a paginated resource. Page 1 has no suffix.
pub fn with_page_suffix(base: &str, page: usize) -> String {
    if page <= 1 {
        base.to_string()
    } else {
        format!("{}?p={}", base, page)
    }
}
