use serde::Serialize;

use crate::client::commands::{Comparison, FitReport, SumReport};

#[allow(clippy::upper_case_acronyms)]
#[derive(clap::ValueEnum, Clone)]
pub enum Outputs {
    CLI,
    JSON,
}

pub trait Output {
    fn print_sum(&self, report: &SumReport);
    fn print_comparison(&self, comparison: &Comparison);
    fn print_fit_report(&self, report: &FitReport);
}

pub fn create_output(mode: &Outputs) -> Box<dyn Output> {
    match mode {
        Outputs::CLI => Box::<CliOutput>::default(),
        Outputs::JSON => Box::<JsonOutput>::default(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[derive(Default)]
pub struct CliOutput;

impl Output for CliOutput {
    fn print_sum(&self, report: &SumReport) {
        println!("Total: {}", report.total);
        println!("Empty: {}", yes_no(report.empty));
    }

    fn print_comparison(&self, comparison: &Comparison) {
        println!("Left:  {}", comparison.left);
        println!("Right: {}", comparison.right);
        println!("Left < right: {}", yes_no(comparison.less));
        println!("Left <= right: {}", yes_no(comparison.less_equal));
        println!(
            "Left can be subtracted from right: {}",
            yes_no(comparison.can_subtract)
        );
    }

    fn print_fit_report(&self, report: &FitReport) {
        println!("Capacity: {}", report.capacity);
        for (index, decision) in report.decisions.iter().enumerate() {
            println!(
                "Request #{index} ({}): {}",
                decision.request,
                if decision.admitted {
                    "admitted"
                } else {
                    "rejected"
                }
            );
        }
        println!("Remaining: {}", report.remaining);
        println!("Exhausted: {}", yes_no(report.exhausted));
    }
}

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print<T: Serialize>(&self, data: &T) {
        println!("{}", serde_json::json!(data));
    }
}

impl Output for JsonOutput {
    fn print_sum(&self, report: &SumReport) {
        self.print(report);
    }

    fn print_comparison(&self, comparison: &Comparison) {
        self.print(comparison);
    }

    fn print_fit_report(&self, report: &FitReport) {
        self.print(report);
    }
}
