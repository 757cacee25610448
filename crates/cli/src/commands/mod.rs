//! CLI Commands

pub mod api;
pub mod catalog;
pub mod input;
