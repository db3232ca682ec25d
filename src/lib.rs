//! Hallmap Library
//!
//! This library provides core functionality for the Hallmap terminal
//! catalog browser, including parsing catalog snapshots and visit
//! lists, venue map hit-testing, and the visited-overlay renderer.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod map;
pub mod models;
pub mod parser;
pub mod services;
pub mod tui;
