/*
 * Responsibility
 * - middleware の公開インターフェース
 * - transport 系 (http / cors / security_headers) と認証 (auth) を分ける
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
