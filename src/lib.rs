// File: src/lib.rs
//! Client layer for a course and ebook learning platform.
//!
//! The crate talks to the platform's JSON backend, keeps the homepage
//! content store in memory and turns it into view models. The terminal
//! front end under [`tui`] is a thin drawing step on top of those.
pub mod api;
pub mod client;
pub mod color_utils;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod model;
pub mod pages;
pub mod render;
pub mod session;
pub mod store;
pub mod view;

#[cfg(feature = "tui")]
pub mod tui;
