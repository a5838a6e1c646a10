/*
 * Responsibility
 * - Postgres (sqlx) 向けの repo 関数群
 * - service::pg からのみ呼ばれる
 */
pub mod comment_repo;
pub mod error;
pub mod post_repo;
