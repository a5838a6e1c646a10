/*
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - route の path parameter 名とタグ型を 1 箇所で対応づける
 *
 * 置かないもの
 *  - parse ロジック
 *  - extractor 実装
 */
use super::core::{IdParam, PathId};

// posts: /posts/{post_id}
pub enum PostTag {}
impl IdParam for PostTag {
    const PARAM: &'static str = "post_id";
}
pub type PostId = PathId<PostTag>;

// comments: /posts/{post_id}/comments/{comment_id}
pub enum CommentTag {}
impl IdParam for CommentTag {
    const PARAM: &'static str = "comment_id";
}
pub type CommentId = PathId<CommentTag>;
