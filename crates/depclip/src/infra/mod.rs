//! Infrastructure adapters: git discovery, ignore rules, config, clipboard.

pub mod clipboard;
pub mod config;
pub mod git;
pub mod ignore;
