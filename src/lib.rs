//! json2slides
//!
//! Batch CLI that converts a JSON-described slide deck into a Google Slides
//! presentation and files the resulting document into a named Google Drive
//! folder.
//!
//! The pipeline is a straight sequence: deck loader → text composer →
//! request builder → presentation driver → filing step. Remote calls are
//! synchronous and strictly sequential; the first failure aborts the run.

pub mod api;
pub mod auth;
pub mod builder;
pub mod compose;
pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
