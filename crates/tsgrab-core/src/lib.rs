pub mod config;
pub mod logging;

pub mod checksum;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod http;
pub mod manifest;
pub mod page;
pub mod pipeline;
pub mod progress;
pub mod url_template;
