//! Result reporting for the chkdomain CLI.
//!
//! Results are printed one line at a time as they arrive. Stdout carries
//! only domain lines so it can be piped; failures go to stderr.

use chkdomain_lib::DomainResult;
use console::style;
use std::time::{Duration, Instant};

/// A rendered result line and the stream it belongs on.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Stdout(String),
    Stderr(String),
}

/// Render one result, or `None` when nothing should be printed.
///
/// `elapsed` is the time since the run started and only shows in debug mode.
pub fn render_result(result: &DomainResult, debug: bool, elapsed: Duration) -> Option<Line> {
    match result {
        DomainResult::Failure { domain, error } => {
            Some(Line::Stderr(format!("{}: {}", domain, error)))
        }
        DomainResult::Success {
            domain, available, ..
        } => {
            let label = if *available { "AVAILABLE" } else { "UNAVAILABLE" };
            match (debug, available) {
                (true, _) => Some(Line::Stdout(format!(
                    "[{}]\t{}\t{}",
                    elapsed.as_millis(),
                    label,
                    domain
                ))),
                (false, true) => Some(Line::Stdout(domain.clone())),
                (false, false) => None,
            }
        }
    }
}

/// Running tally of reported results.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub available: usize,
    pub unavailable: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, result: &DomainResult) {
        match result.available() {
            Some(true) => self.available += 1,
            Some(false) => self.unavailable += 1,
            None => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.available + self.unavailable + self.failed
    }
}

/// Prints results as they complete.
pub struct Reporter {
    debug: bool,
    started: Instant,
    summary: Summary,
}

impl Reporter {
    pub fn new(debug: bool, started: Instant) -> Self {
        Self {
            debug,
            started,
            summary: Summary::default(),
        }
    }

    /// Print the line for `result`, if any, and count it.
    pub fn report(&mut self, result: &DomainResult) {
        self.summary.record(result);

        match render_result(result, self.debug, self.started.elapsed()) {
            Some(Line::Stdout(line)) => println!("{}", line),
            Some(Line::Stderr(line)) => eprintln!("{}", style(line).red().for_stderr()),
            None => {}
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Print the end-of-run tally to stderr.
    pub fn print_summary(&self) {
        let s = self.summary;
        eprintln!(
            "{} {} domains: {}, {}, {} in {}ms",
            style("checked").dim().for_stderr(),
            style(s.total()).bold().for_stderr(),
            style(format!("{} available", s.available)).green().for_stderr(),
            style(format!("{} unavailable", s.unavailable)).red().for_stderr(),
            style(format!("{} failed", s.failed)).yellow().for_stderr(),
            self.started.elapsed().as_millis()
        );
    }
}
