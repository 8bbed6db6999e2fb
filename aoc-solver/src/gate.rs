//! Test gate: validates a solution against its sample fixtures

use crate::answer::Answer;
use crate::context::SolveContext;
use crate::error::{FixtureError, InputError};
use crate::input::load_input;
use crate::solver::{DynSolution, Part};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a fixture run produced when it did not match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actual {
    Answer(Answer),
    /// The solution returned an error instead of an answer
    Error(String),
}

impl fmt::Display for Actual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actual::Answer(answer) => write!(f, "{answer}"),
            Actual::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// First failing fixture of a gate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    pub part: Part,
    /// 1-based index among the part's fixtures
    pub index: usize,
    pub fixture: PathBuf,
    pub actual: Actual,
    pub expected: Answer,
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrong Solving Mechanism on Test {} of {}: Got '{}' but expected '{}'",
            self.index, self.part, self.actual, self.expected
        )
    }
}

/// Why the gate refused to let a solution run
#[derive(Debug, Error)]
pub enum GateError {
    /// Fixture declarations are malformed; nothing was loaded
    #[error("Invalid test declaration: {0}")]
    Config(#[from] FixtureError),
    /// A declared sample file is missing or unreadable
    #[error("Missing fixture: {0}")]
    Input(#[from] InputError),
    /// A fixture produced the wrong answer
    #[error("{0}")]
    Failed(TestFailure),
}

impl GateError {
    /// Configuration problems as opposed to wrong answers
    pub fn is_config(&self) -> bool {
        !matches!(self, GateError::Failed(_))
    }
}

/// Outcome of a passing gate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    pub passed: usize,
    /// Output the solution produced while running fixtures
    pub output: Vec<String>,
}

/// Runs a solution against the sample fixtures in its data folder
pub struct TestGate<'a> {
    dir: &'a Path,
    mute: bool,
}

impl<'a> TestGate<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir, mute: false }
    }

    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Run every declared fixture in order, stopping at the first mismatch
    pub fn run(&self, solution: &dyn DynSolution) -> Result<GateReport, GateError> {
        let plan = solution.tests().resolve()?;
        let input_options = solution.options().input;
        let mut output = Vec::new();

        for fixture in &plan {
            let path = self.dir.join(&fixture.file);
            let lines = load_input(&path, &input_options)?;
            let mut ctx = SolveContext::for_test(self.mute);
            let result = solution.run_part(fixture.part, lines, &mut ctx);
            output.extend(ctx.take_output());

            let actual = match result {
                Ok(answer) if answer.matches(&fixture.expected) => {
                    tracing::debug!(
                        part = fixture.part.number(),
                        index = fixture.index,
                        file = %fixture.file,
                        "fixture passed"
                    );
                    continue;
                }
                Ok(answer) => Actual::Answer(answer),
                Err(e) => Actual::Error(e.to_string()),
            };

            return Err(GateError::Failed(TestFailure {
                part: fixture.part,
                index: fixture.index,
                fixture: path,
                actual,
                expected: fixture.expected.clone(),
            }));
        }

        Ok(GateReport {
            passed: plan.len(),
            output,
        })
    }
}
