/*
 * Responsibility
 * - service 層が所有するドメインモデル (Post / Comment)
 * - ページング要求 (PageRequest) と結果 (Page<T>) の定義
 * - DTO (api/v1/dto) はここから変換する。逆方向の依存は持たない
 */
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub comments: Vec<Comment>,
}

/// Create and full-replace payload for a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub content: String,
}

/// Create and full-replace payload for a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Description,
    Content,
}

impl SortField {
    /// Only whitelisted fields are sortable; the name ends up in SQL.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "content" => Some(Self::Content),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => r#""postId""#,
            Self::Title => "title",
            Self::Description => "description",
            Self::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    // anything other than "asc" sorts descending
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: u32,
    pub page_size: u32,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
}

impl PageRequest {
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page_no) * i64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_no: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let page_size = u64::from(request.page_size.max(1));
        let total_pages = total_elements.div_ceil(page_size);
        let last = u64::from(request.page_no) + 1 >= total_pages;

        Self {
            content,
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements,
            total_pages,
            last,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_no: self.page_no,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page_no: u32, page_size: u32) -> PageRequest {
        PageRequest {
            page_no,
            page_size,
            sort_by: SortField::Id,
            sort_dir: SortDirection::Asc,
        }
    }

    #[test]
    fn page_metadata_rounds_total_pages_up() {
        let page = Page::new(vec![1, 2], &request(2, 5), 12);

        assert_eq!(page.total_pages, 3);
        assert!(page.last);
    }

    #[test]
    fn first_page_of_many_is_not_last() {
        let page = Page::new(vec![1; 10], &request(0, 10), 25);

        assert_eq!(page.total_pages, 3);
        assert!(!page.last);
    }

    #[test]
    fn empty_result_is_last_with_zero_pages() {
        let page: Page<i32> = Page::new(vec![], &request(0, 10), 0);

        assert_eq!(page.total_pages, 0);
        assert!(page.last);
    }

    #[test]
    fn offset_is_page_times_size() {
        let req = request(3, 20);
        assert_eq!(req.offset(), 60);
        assert_eq!(req.limit(), 20);
    }

    #[test]
    fn sort_direction_defaults_to_desc_for_unknown_values() {
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Desc);
    }

    #[test]
    fn sort_field_rejects_unknown_columns() {
        assert_eq!(SortField::parse("title"), Some(SortField::Title));
        assert_eq!(SortField::parse("title; DROP TABLE posts"), None);
    }
}
