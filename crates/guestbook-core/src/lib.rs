//! Core types and trait definitions for the guestbook.
//!
//! This crate is free of HTTP and database dependencies. The storage
//! backends, the JSON API and the presentation surfaces all depend on it.

// Native `async fn` in traits; the trait spells out `Send` futures itself.
#![allow(async_fn_in_trait)]

pub mod comment;
pub mod error;
pub mod memory;
pub mod store;

pub use error::{Error, Result};
