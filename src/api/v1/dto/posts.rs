/*
 * Responsibility
 * - Posts の request/response DTO (v1 / v2 の 2 形状)
 * - 一覧用 query parameter (pageNo / pageSize / sortBy / sortDir) の解釈
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::v1::dto::comments::CommentDto;
use crate::services::model::{NewPost, Page, PageRequest, Post, SortDirection, SortField};

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "id";
pub const DEFAULT_SORT_DIRECTION: &str = "asc";

/// Body of `POST /posts` and `PUT /posts/{post_id}` (full replace).
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequest {
    pub title: String,
    pub description: String,
    pub content: String,
}

impl PostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().chars().count() < 2 {
            return Err("Post title should have at least 2 characters");
        }
        if self.description.trim().chars().count() < 10 {
            return Err("Post description should have at least 10 characters");
        }
        if self.content.trim().is_empty() {
            return Err("Post content should not be empty");
        }

        Ok(())
    }

    pub fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title,
            description: self.description,
            content: self.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub comments: Vec<CommentDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            content: post.content,
            comments: post.comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

/// Version 2 shape: comments are replaced by tags.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostV2Dto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl PostV2Dto {
    pub fn from_post(post: Post, tags: &[String]) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            content: post.content,
            tags: tags.to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostPageDto {
    pub content: Vec<PostDto>,
    pub page_no: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

impl From<Page<Post>> for PostPageDto {
    fn from(page: Page<Post>) -> Self {
        let page = page.map(PostDto::from);
        Self {
            content: page.content,
            page_no: page.page_no,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            last: page.last,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page_no: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl PostListQuery {
    pub fn to_page_request(&self) -> Result<PageRequest, &'static str> {
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err("pageSize must be at least 1");
        }

        let sort_by = SortField::parse(self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY))
            .ok_or("sortBy must be one of: id, title, description, content")?;

        Ok(PageRequest {
            page_no: self.page_no.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size,
            sort_by,
            sort_dir: SortDirection::parse(
                self.sort_dir.as_deref().unwrap_or(DEFAULT_SORT_DIRECTION),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, description: &str, content: &str) -> PostRequest {
        PostRequest {
            title: title.into(),
            description: description.into(),
            content: content.into(),
        }
    }

    #[test]
    fn valid_post_passes() {
        assert!(request("Hi", "ten chars!", "x").validate().is_ok());
    }

    #[test]
    fn short_fields_are_rejected() {
        assert_eq!(
            request("H", "long enough description", "x").validate(),
            Err("Post title should have at least 2 characters")
        );
        assert_eq!(
            request("Hello", "too short", "x").validate(),
            Err("Post description should have at least 10 characters")
        );
        assert_eq!(
            request("Hello", "long enough description", "   ").validate(),
            Err("Post content should not be empty")
        );
    }

    #[test]
    fn list_query_defaults() {
        let page = PostListQuery::default().to_page_request().unwrap();

        assert_eq!(page.page_no, 0);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.sort_by, SortField::Id);
        assert_eq!(page.sort_dir, SortDirection::Asc);
    }

    #[test]
    fn list_query_rejects_zero_page_size_and_unknown_sort() {
        let zero = PostListQuery {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(zero.to_page_request().is_err());

        let unknown = PostListQuery {
            sort_by: Some("author".into()),
            ..Default::default()
        };
        assert!(unknown.to_page_request().is_err());
    }

    #[test]
    fn page_dto_uses_camel_case_keys() {
        let dto = PostPageDto {
            content: vec![],
            page_no: 0,
            page_size: 10,
            total_elements: 0,
            total_pages: 0,
            last: true,
        };
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["pageNo"], 0);
        assert_eq!(json["totalElements"], 0);
        assert_eq!(json["last"], true);
    }
}
