//! Configuration module for ptt-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; [`Config::default`] describes the built-in
//! behavior (八卦 board, 30 pushes, 5 posts, UTC+8).
//!
//! # Example
//!
//! ```no_run
//! use ptt_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Will keep at most {} posts", config.crawler.max_articles);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{BoardEntry, Config, CrawlerConfig, SiteConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
