//! Core library modules for tabmon.
//!
//! - **Activity log**: [`store`], [`dispatch`], [`timer`], [`signal`]
//! - **Runtime**: [`monitor`] event loop and its signal sources
//!   ([`input`], [`terminal`], [`feed`]) plus [`clipboard`] access
//! - **Presentation**: [`view`], [`formatter`], [`messages`]
//! - **Infrastructure**: [`config`], [`data_storage`], [`console`]

pub mod clipboard;
pub mod config;
pub mod console;
pub mod data_storage;
pub mod dispatch;
pub mod feed;
pub mod formatter;
pub mod input;
pub mod messages;
pub mod monitor;
pub mod signal;
pub mod store;
pub mod terminal;
pub mod timer;
pub mod view;
