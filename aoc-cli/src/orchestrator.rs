//! Selection resolution and the per-solution run sequence

use crate::banner;
use crate::channel::{ExecutionChannel, ExecutionResult};
use crate::config::RunSettings;
use crate::discovery::SolutionDescriptor;
use crate::error::CliError;
use crate::output;
use crate::status::{HARNESS_FATAL, RunStatus};
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    /// 1-based index into the discovered list
    One(usize),
}

impl Selection {
    /// `0` is everything, `1..=available` is one solution
    pub fn from_index(index: usize, available: usize) -> Result<Self, CliError> {
        match index {
            0 => Ok(Selection::All),
            i if i <= available => Ok(Selection::One(i)),
            i => Err(CliError::UnsupportedIndex(i)),
        }
    }
}

/// What happened across one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub statuses: Vec<(u8, RunStatus)>,
    pub exit_code: i32,
}

pub struct Orchestrator<'a, C> {
    channel: C,
    settings: RunSettings,
    descriptors: &'a [SolutionDescriptor],
}

impl<'a, C: ExecutionChannel> Orchestrator<'a, C> {
    pub fn new(channel: C, settings: RunSettings, descriptors: &'a [SolutionDescriptor]) -> Self {
        Self {
            channel,
            settings,
            descriptors,
        }
    }

    /// Run the selection; every queued run is attempted whatever came before
    pub fn run(&self, selection: Selection) -> Result<RunSummary, CliError> {
        match selection {
            Selection::All => {
                println!("{}", style("Now running ALL Available Solutions:").blue());
                let statuses: Vec<(u8, RunStatus)> = self
                    .descriptors
                    .iter()
                    .map(|descriptor| (descriptor.day, self.run_one(descriptor).status))
                    .collect();
                let all_passed = statuses.iter().all(|(_, status)| status.is_success());
                if all_passed {
                    banner::print_celebration();
                }
                Ok(RunSummary {
                    statuses,
                    exit_code: if all_passed { 0 } else { HARNESS_FATAL },
                })
            }
            Selection::One(index) => {
                let descriptor = index
                    .checked_sub(1)
                    .and_then(|i| self.descriptors.get(i))
                    .ok_or(CliError::UnsupportedIndex(index))?;
                let status = self.run_one(descriptor).status;
                Ok(RunSummary {
                    statuses: vec![(descriptor.day, status)],
                    exit_code: status.code(),
                })
            }
        }
    }

    fn run_one(&self, descriptor: &SolutionDescriptor) -> ExecutionResult {
        if !self.settings.mute {
            println!(
                "{}",
                style(format!("Now running Solution for Day {:02}:", descriptor.day)).green()
            );
        }
        let result = self.channel.execute(descriptor);
        tracing::debug!(day = descriptor.day, status = ?result.status, "run complete");
        print!("{}", output::render(descriptor.day, &result, &self.settings));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::CapturedOutput;
    use crate::test_support::{Steady, descriptor};
    use crate::timing::TimingRecord;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    /// Answers with a fixed status per day and records the call order
    struct Scripted {
        statuses: HashMap<u8, RunStatus>,
        calls: RefCell<Vec<u8>>,
    }

    impl Scripted {
        fn new(statuses: &[(u8, RunStatus)]) -> Self {
            Self {
                statuses: statuses.iter().copied().collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ExecutionChannel for &Scripted {
        fn execute(&self, descriptor: &SolutionDescriptor) -> ExecutionResult {
            self.calls.borrow_mut().push(descriptor.day);
            ExecutionResult {
                status: self.statuses[&descriptor.day],
                output: CapturedOutput::default(),
                answers: [None, None],
                timing: TimingRecord::new(),
            }
        }
    }

    fn descriptors() -> Vec<SolutionDescriptor> {
        [1, 4, 5]
            .into_iter()
            .enumerate()
            .map(|(i, day)| descriptor(i + 1, day, &Steady, Path::new("unused")))
            .collect()
    }

    #[test]
    fn test_selection_bounds() {
        assert_eq!(Selection::from_index(0, 3).unwrap(), Selection::All);
        assert_eq!(Selection::from_index(3, 3).unwrap(), Selection::One(3));
        assert!(matches!(
            Selection::from_index(4, 3),
            Err(CliError::UnsupportedIndex(4))
        ));
    }

    #[test]
    fn test_all_runs_everything_despite_failures() {
        let channel = Scripted::new(&[
            (1, RunStatus::Success),
            (4, RunStatus::TestFailed),
            (5, RunStatus::Success),
        ]);
        let descriptors = descriptors();
        let summary = Orchestrator::new(&channel, RunSettings::default(), &descriptors)
            .run(Selection::All)
            .unwrap();
        assert_eq!(*channel.calls.borrow(), vec![1, 4, 5]);
        assert_eq!(summary.exit_code, HARNESS_FATAL);
    }

    #[test]
    fn test_all_success_exits_zero() {
        let channel = Scripted::new(&[
            (1, RunStatus::Success),
            (4, RunStatus::Success),
            (5, RunStatus::Success),
        ]);
        let descriptors = descriptors();
        let summary = Orchestrator::new(&channel, RunSettings::default(), &descriptors)
            .run(Selection::All)
            .unwrap();
        assert_eq!(summary.exit_code, 0);
        assert_eq!(summary.statuses.len(), 3);
    }

    #[test]
    fn test_single_run_exits_with_its_code() {
        let channel = Scripted::new(&[(4, RunStatus::Skipped)]);
        let descriptors = descriptors();
        let summary = Orchestrator::new(&channel, RunSettings::default(), &descriptors)
            .run(Selection::One(2))
            .unwrap();
        assert_eq!(summary.statuses, vec![(4, RunStatus::Skipped)]);
        assert_eq!(summary.exit_code, 43);
        assert_eq!(*channel.calls.borrow(), vec![4]);
    }
}
