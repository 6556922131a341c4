//! Error types for the feed core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Fetching page {page} failed: {message}")]
    FetchFailed { page: usize, message: String },
}

pub type FeedResult<T> = Result<T, FeedError>;
