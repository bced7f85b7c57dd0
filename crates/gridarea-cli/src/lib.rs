#![forbid(unsafe_code)]

//! Library half of the `gridarea` binary: argument parsing and reports.

pub mod cli;
pub mod report;
