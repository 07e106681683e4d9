#![forbid(unsafe_code)]

pub mod build;
pub mod cli;
pub mod config;
pub mod r#gen;
pub mod logging;
pub mod render;
pub mod sitemap;
pub mod store;
