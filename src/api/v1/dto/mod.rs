/*
 * Responsibility
 * - v1 の request/response DTO
 */
pub mod comments;
pub mod posts;
