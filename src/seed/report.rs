// src/seed/report.rs

//! Rendering a seed run into the status string returned over the channel.
//!
//! - output produced → the combined output, verbatim
//! - no output → `Seeder finished with code N`
//! - any error → `Seeder failed: <message>`

use crate::errors::SeedError;
use crate::seed::model::SeedReport;

pub const FAILED_PREFIX: &str = "Seeder failed: ";

pub fn finished_message(code: i32) -> String {
    format!("Seeder finished with code {code}")
}

pub fn failed_message(err: &SeedError) -> String {
    format!("{FAILED_PREFIX}{err}")
}

pub fn render_report(report: &SeedReport) -> String {
    if report.output.is_empty() {
        finished_message(report.code())
    } else {
        report.output.clone()
    }
}

pub fn render_result(result: &Result<SeedReport, SeedError>) -> String {
    match result {
        Ok(report) => render_report(report),
        Err(err) => failed_message(err),
    }
}
