//! Core solution traits and related types

use crate::answer::Answer;
use crate::context::SolveContext;
use crate::error::{ParseError, SolveError, SolverError};
use crate::fixture::TestDeclaration;
use crate::input::InputOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two parts of a daily puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Part {
    One,
    Two,
}

impl Part {
    pub const ALL: [Part; 2] = [Part::One, Part::Two];

    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }

    pub fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Part {}", self.number())
    }
}

/// Self-declared hint that a solution's real run takes a while
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slowness {
    Moderate,
    Severe,
}

impl Slowness {
    pub fn warning(self) -> &'static str {
        match self {
            Slowness::Moderate => "Attention: Moderately Slow",
            Slowness::Severe => "ATTENTION: SLOW",
        }
    }
}

/// How a solution wants to be run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub input: InputOptions,
    /// `None` means unclassified
    pub slowness: Option<Slowness>,
}

impl RunOptions {
    pub fn with_input(mut self, input: InputOptions) -> Self {
        self.input = input;
        self
    }

    pub fn with_slowness(mut self, slowness: Slowness) -> Self {
        self.slowness = Some(slowness);
        self
    }
}

/// Turns tokenized raw input into the structure a solution works on
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type Parsed = Vec<i32>;
///
///     fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
///         lines
///             .iter()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
/// ```
pub trait AocParser {
    /// Parsed input. Solvers receive it mutably and may consume it.
    type Parsed;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError>;
}

/// Solves part `N` of a puzzle
///
/// `PartSolver<1>` is the first part, `PartSolver<2>` the second. Each part
/// receives its own fresh parse of the input.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(input: &mut Self::Parsed, ctx: &mut SolveContext) -> Result<Answer, SolveError>;
}

/// A complete daily solution
///
/// Implement [`AocParser`] and both [`PartSolver`]s, then declare fixtures
/// in [`Solution::tests`].
///
/// # Example
///
/// ```
/// use aoc_solver::{
///     Answer, AocParser, ParseError, PartSolver, PartTests, SolveContext, SolveError, Solution,
///     TestDeclaration,
/// };
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type Parsed = Vec<i64>;
///
///     fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
///         lines
///             .iter()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.clone())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Day1 {
///     fn solve(input: &mut Vec<i64>, _: &mut SolveContext) -> Result<Answer, SolveError> {
///         Ok(input.iter().sum::<i64>().into())
///     }
/// }
///
/// impl PartSolver<2> for Day1 {
///     fn solve(input: &mut Vec<i64>, _: &mut SolveContext) -> Result<Answer, SolveError> {
///         Ok(input.iter().product::<i64>().into())
///     }
/// }
///
/// impl Solution for Day1 {
///     fn tests() -> TestDeclaration {
///         TestDeclaration::new(PartTests::single(6), PartTests::single(6))
///     }
/// }
/// ```
pub trait Solution: AocParser + PartSolver<1> + PartSolver<2> {
    fn options() -> RunOptions {
        RunOptions::default()
    }

    fn tests() -> TestDeclaration;
}

/// Type-erased view of a [`Solution`] used by the harness
pub trait DynSolution: Sync {
    fn options(&self) -> RunOptions;

    fn tests(&self) -> TestDeclaration;

    /// Parse `lines` afresh and solve `part`
    fn run_part(
        &self,
        part: Part,
        lines: Vec<String>,
        ctx: &mut SolveContext,
    ) -> Result<Answer, SolverError>;
}

impl<S> DynSolution for S
where
    S: Solution + Sync,
{
    fn options(&self) -> RunOptions {
        S::options()
    }

    fn tests(&self) -> TestDeclaration {
        S::tests()
    }

    fn run_part(
        &self,
        part: Part,
        lines: Vec<String>,
        ctx: &mut SolveContext,
    ) -> Result<Answer, SolverError> {
        let mut parsed = S::parse(lines)?;
        let answer = match part {
            Part::One => <S as PartSolver<1>>::solve(&mut parsed, ctx)?,
            Part::Two => <S as PartSolver<2>>::solve(&mut parsed, ctx)?,
        };
        Ok(answer)
    }
}
