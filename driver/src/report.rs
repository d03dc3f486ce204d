use std::time::Duration;

use colored::{ColoredString, Colorize};
use libsystolic::verify::{Outcome, VerifyError};

#[derive(Debug, Clone, Copy, Default)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub converged: usize,
    pub cycles: u64,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

pub fn print_result(result: &Result<Outcome, VerifyError>, max_generations: usize, tally: &mut Tally) {
    match result {
        Ok(outcome) => {
            tally.passed += 1;
            tally.cycles += outcome.cycles;

            let converged = match outcome.converged_at {
                Some(generation) => {
                    tally.converged += 1;
                    format!("converged @ {generation:3}").cyan()
                }
                None => "              ".normal(),
            };

            println!(
                "{} {:24} gen {:3}/{:<3} {} alive {:4} | {} cycles",
                "PASS".bright_green(),
                outcome.name,
                outcome.generations_run(),
                max_generations,
                converged,
                outcome.final_alive(),
                outcome.cycles,
            );
        }

        Err(VerifyError::Mismatch(mismatch)) => {
            tally.failed += 1;

            println!(
                "{} {:24} diverged at generation {}",
                "FAIL".bright_red(),
                mismatch.scenario,
                mismatch.generation
            );
            println!("{}", mismatch.to_string().dimmed());
        }

        Err(e) => {
            tally.failed += 1;
            println!("{} {e}", "FAIL".bright_red());
        }
    }
}

pub fn print_summary(tally: &Tally, elapsed: Duration) {
    let status: ColoredString = if tally.failed == 0 {
        "ALL PASSED".bright_green()
    } else {
        format!("{} FAILED", tally.failed).bright_red()
    };

    let cycles_per_second = tally.cycles as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!(
        "{status} | {}/{} scenarios passed, {} converged | {} cycles in {:.2?} ({:.0} cycles/s)",
        tally.passed,
        tally.total(),
        tally.converged,
        tally.cycles,
        elapsed,
        cycles_per_second,
    );
}
