//! Library components of the `tuma` command-line demo.

pub mod cli;
pub mod commands;
pub mod example;
pub mod logging;
pub mod summary;
