pub mod article;
pub mod board;
pub mod link;
pub mod page;
pub mod section;

pub use article::{ArticleItem, ArticlePage};
pub use board::{BoardItem, BoardPage};
pub use link::{LinkPos, LinkPositionState};
pub use page::{split_page_suffix, with_page_suffix, Page, PageKind};
pub use section::{SectionItem, SectionPage};
