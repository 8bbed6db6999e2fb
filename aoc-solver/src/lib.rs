//! Advent of Code Solution Library
//!
//! The contract every daily solution implements, plus the pieces a harness
//! needs to drive solutions uniformly:
//!
//! - [`AocParser`], [`PartSolver`] and [`Solution`]: parse once per part,
//!   solve part 1 and part 2 independently, declare run options and fixtures
//! - [`Answer`]: numeric, textual or list answers with type-aware matching
//! - [`TestGate`]: checks a solution against its sample fixtures before it is
//!   trusted with real input
//! - [`SolutionRegistry`]: day-indexed registry fed by [`SolutionPlugin`]s
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{
//!     Answer, AocParser, ParseError, PartSolver, PartTests, SolveContext, SolveError, Solution,
//!     SolutionRegistryBuilder, TestDeclaration,
//! };
//!
//! pub struct Day1;
//!
//! impl AocParser for Day1 {
//!     type Parsed = Vec<i32>;
//!
//!     fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
//!         lines
//!             .iter()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.clone())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Day1 {
//!     fn solve(input: &mut Vec<i32>, _: &mut SolveContext) -> Result<Answer, SolveError> {
//!         Ok(input.iter().sum::<i32>().into())
//!     }
//! }
//!
//! impl PartSolver<2> for Day1 {
//!     fn solve(input: &mut Vec<i32>, _: &mut SolveContext) -> Result<Answer, SolveError> {
//!         Ok(input.iter().max().copied().unwrap_or_default().into())
//!     }
//! }
//!
//! impl Solution for Day1 {
//!     fn tests() -> TestDeclaration {
//!         TestDeclaration::new(PartTests::single(6), PartTests::single(3))
//!     }
//! }
//!
//! let registry = SolutionRegistryBuilder::new()
//!     .register(1, &Day1, &[])
//!     .unwrap()
//!     .build();
//! assert!(registry.contains(1));
//! ```
//!
//! # Plugin Registration
//!
//! Use `#[derive(AutoRegisterSolution)]` to submit a solution to the
//! inventory-backed plugin list:
//! ```ignore
//! #[derive(AutoRegisterSolution)]
//! #[aoc(day = 1, tags = ["easy"])]
//! struct Day1;
//! ```

mod answer;
mod context;
mod error;
mod fixture;
mod gate;
mod input;
mod registry;
mod solver;

pub use answer::{Answer, AnswerKind};
pub use context::{CancelToken, RunMode, SolveContext};
pub use error::{FixtureError, InputError, ParseError, RegistrationError, SolveError, SolverError};
pub use fixture::{FixtureSet, PartTests, ResolvedFixture, TestDeclaration};
pub use gate::{Actual, GateError, GateReport, TestFailure, TestGate};
pub use input::{InputOptions, load_input, split_input};
pub use registry::{
    DAYS, RegisteredSolution, SolutionPlugin, SolutionRegistry, SolutionRegistryBuilder,
};
pub use solver::{AocParser, DynSolution, Part, PartSolver, RunOptions, Slowness, Solution};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AutoRegisterSolution, PassthroughParser};
