//! Thin transport adapters. Transport owns parsing and presentation only;
//! all behavior lives in the application layer.

pub mod cli;
