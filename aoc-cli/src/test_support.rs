//! Small solutions and fixtures shared by the unit tests

use crate::discovery::SolutionDescriptor;
use aoc_solver::{
    Answer, AocParser, DynSolution, ParseError, PartSolver, PartTests, RunOptions, Slowness,
    SolveContext, SolveError, Solution, TestDeclaration,
};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// A data folder with `input.txt` set to `input` and a two-line `sample.txt`
pub fn data_dir(input: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("input.txt"), input).unwrap();
    std::fs::write(dir.path().join("sample.txt"), "a\nb\n").unwrap();
    dir
}

pub fn descriptor(
    index: usize,
    day: u8,
    solution: &'static dyn DynSolution,
    dir: &Path,
) -> SolutionDescriptor {
    SolutionDescriptor {
        index,
        day,
        dir: dir.to_path_buf(),
        solution,
    }
}

macro_rules! line_parser {
    ($($name:ident),*) => {
        $(
            impl AocParser for $name {
                type Parsed = Vec<String>;

                fn parse(lines: Vec<String>) -> Result<Vec<String>, ParseError> {
                    Ok(lines)
                }
            }
        )*
    };
}

/// Part 1 counts lines, part 2 says "done"; the sample expects 2 lines
pub struct Steady;
/// Like [`Steady`] but declares a wrong sample answer
pub struct Wrong;
/// Severely slow, spins until cancelled
pub struct Sluggish;
/// Part 1 prints a line, then panics
pub struct Panicking;
/// Prints while solving
pub struct Chatty;

line_parser!(Steady, Wrong, Sluggish, Panicking, Chatty);

/// Sleeps `MS` milliseconds in part 1 without ever checking for cancellation
pub struct Napping<const MS: u64>;

impl<const MS: u64> AocParser for Napping<MS> {
    type Parsed = Vec<String>;

    fn parse(lines: Vec<String>) -> Result<Vec<String>, ParseError> {
        Ok(lines)
    }
}

impl<const MS: u64> PartSolver<1> for Napping<MS> {
    fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        thread::sleep(Duration::from_millis(MS));
        Ok(MS.into())
    }
}

impl<const MS: u64> PartSolver<2> for Napping<MS> {
    fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(0.into())
    }
}

impl<const MS: u64> Solution for Napping<MS> {
    fn tests() -> TestDeclaration {
        TestDeclaration::none()
    }
}

impl PartSolver<1> for Steady {
    fn solve(lines: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(lines.len().into())
    }
}

impl PartSolver<2> for Steady {
    fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok("done".into())
    }
}

impl Solution for Steady {
    fn tests() -> TestDeclaration {
        TestDeclaration::first_only(PartTests::single(2))
    }
}

impl PartSolver<1> for Wrong {
    fn solve(lines: &mut Vec<String>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        <Steady as PartSolver<1>>::solve(lines, ctx)
    }
}

impl PartSolver<2> for Wrong {
    fn solve(lines: &mut Vec<String>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        <Steady as PartSolver<2>>::solve(lines, ctx)
    }
}

impl Solution for Wrong {
    fn tests() -> TestDeclaration {
        TestDeclaration::first_only(PartTests::single(99))
    }
}

impl PartSolver<1> for Sluggish {
    fn solve(_: &mut Vec<String>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        loop {
            ctx.check_cancelled()?;
            thread::sleep(Duration::from_millis(2));
        }
    }
}

impl PartSolver<2> for Sluggish {
    fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(0.into())
    }
}

impl Solution for Sluggish {
    fn options() -> RunOptions {
        RunOptions::default().with_slowness(Slowness::Severe)
    }

    fn tests() -> TestDeclaration {
        TestDeclaration::none()
    }
}

impl PartSolver<1> for Panicking {
    fn solve(_: &mut Vec<String>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        ctx.println("about to fail");
        panic!("boom")
    }
}

impl PartSolver<2> for Panicking {
    fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(0.into())
    }
}

impl Solution for Panicking {
    fn tests() -> TestDeclaration {
        TestDeclaration::none()
    }
}

impl PartSolver<1> for Chatty {
    fn solve(_: &mut Vec<String>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        let mode = if ctx.is_test() { "test" } else { "real" };
        ctx.println(format!("thinking ({mode})"));
        Ok("ok".into())
    }
}

impl PartSolver<2> for Chatty {
    fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok("ok".into())
    }
}

impl Solution for Chatty {
    fn tests() -> TestDeclaration {
        TestDeclaration::first_only(PartTests::single("ok"))
    }
}
