use crate::domain::PageKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItem {
    pub kind: PageKind,
    pub url: String,
    pub title: String,
}

impl SectionItem {
    pub fn new(url: String, title: String) -> Self {
        Self {
            kind: PageKind::from_url(&url),
            url,
            title,
        }
    }
}

/// A directory listing of sub-sections, boards and articles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPage {
    pub name: String,
    pub items: Vec<SectionItem>,
}
