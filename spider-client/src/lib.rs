//! Spider console client.
//!
//! [`Gateway`] is the single funnel for calls to the spider backend. It owns
//! the credential token (mirrored into a [`TokenStore`]) and reports every
//! failure as a [`spider_common::ApiError`].

pub mod config;
pub mod format;
pub mod gateway;
pub mod token;

pub use config::Config;
pub use gateway::{ApiResult, Gateway, RequestOptions, SearchOptions, SpiderUserOptions, TOKEN_HEADER};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError, TOKEN_STORAGE_KEY};
