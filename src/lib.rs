/*
 * Responsibility
 * - モジュール構成の宣言
 * - tests/ から Router と AppState を組み立てられるように公開する
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
