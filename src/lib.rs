pub mod cli;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod services;
pub mod storage;
