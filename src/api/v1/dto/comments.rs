/*
 * Responsibility
 * - Comments の request/response DTO
 * - 所属 post の id は path から受けるので body には持たない
 */
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::model::{Comment, NewComment};

/// Body of `POST /posts/{post_id}/comments` and `PUT .../comments/{comment_id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub name: String,
    pub email: String,
    pub body: String,
}

// local@domain, no whitespace, exactly one '@'
fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

impl CommentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name should not be null or empty");
        }
        if self.email.trim().is_empty() {
            return Err("Email should not be null or empty");
        }
        if !is_email(self.email.trim()) {
            return Err("Email should be a well-formed email address");
        }
        if self.body.trim().chars().count() < 10 {
            return Err("Comment body must be minimum 10 characters");
        }

        Ok(())
    }

    pub fn into_new_comment(self) -> NewComment {
        NewComment {
            name: self.name,
            email: self.email.trim().to_string(),
            body: self.body,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            body: c.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, body: &str) -> CommentRequest {
        CommentRequest {
            name: name.into(),
            email: email.into(),
            body: body.into(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("reader@example.com"));
        assert!(is_email("a@b"));
        assert!(!is_email("reader.example.com"));
        assert!(!is_email("a@b@c"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("reader@"));
        assert!(!is_email("read er@example.com"));
    }

    #[test]
    fn validate_checks_each_field() {
        assert!(request("ann", "ann@example.com", "nice post, thanks").validate().is_ok());
        assert_eq!(
            request(" ", "ann@example.com", "nice post, thanks").validate(),
            Err("Name should not be null or empty")
        );
        assert_eq!(
            request("ann", "", "nice post, thanks").validate(),
            Err("Email should not be null or empty")
        );
        assert_eq!(
            request("ann", "not-an-email", "nice post, thanks").validate(),
            Err("Email should be a well-formed email address")
        );
        assert_eq!(
            request("ann", "ann@example.com", "short").validate(),
            Err("Comment body must be minimum 10 characters")
        );
    }
}
