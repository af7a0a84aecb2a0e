//! Demonstration driver for the inventory core.

pub mod config;
pub mod demo;
