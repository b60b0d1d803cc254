#![forbid(unsafe_code)]

pub mod attrs;
pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod formats;
pub mod headings;
pub mod jsonld;
pub mod logging;
pub mod responsive;
pub mod slug;
pub mod toc;

pub use content::{process_content, render_post};
pub use headings::inject_ids;
pub use jsonld::{split_content_and_json_ld, strip_json_ld};
pub use responsive::make_responsive;
pub use slug::slugify;
pub use toc::extract_toc;
