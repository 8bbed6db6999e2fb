//! Test gate behaviour against fixtures written to temporary directories

use aoc_solver::{
    Actual, Answer, AocParser, DynSolution, GateError, InputOptions, ParseError, Part, PartSolver,
    PartTests, RunOptions, SolveContext, SolveError, Solution, TestDeclaration, TestGate,
    split_input,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

/// "a,b" per line, part 1 sums every number, part 2 sums the pair maxima
struct RangeList;

impl AocParser for RangeList {
    type Parsed = Vec<(i64, i64)>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        lines
            .iter()
            .map(|line| {
                let (a, b) = line
                    .split_once(',')
                    .ok_or_else(|| ParseError::MissingData(format!("no comma in '{line}'")))?;
                let parse = |s: &str| {
                    s.trim()
                        .parse::<i64>()
                        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
                };
                Ok((parse(a)?, parse(b)?))
            })
            .collect()
    }
}

impl PartSolver<1> for RangeList {
    fn solve(input: &mut Self::Parsed, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(input.iter().map(|(a, b)| a + b).sum::<i64>().into())
    }
}

impl PartSolver<2> for RangeList {
    fn solve(input: &mut Self::Parsed, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(input.iter().map(|(a, b)| a.max(b)).sum::<i64>().into())
    }
}

thread_local! {
    static EXPECTED_FIRST: Cell<i64> = const { Cell::new(18) };
}

impl Solution for RangeList {
    fn options() -> RunOptions {
        RunOptions::default().with_input(InputOptions::new("\n", true))
    }

    fn tests() -> TestDeclaration {
        TestDeclaration::new(
            PartTests::single(EXPECTED_FIRST.with(Cell::get)),
            PartTests::single(10),
        )
    }
}

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn test_range_list_parses_two_pairs() {
    let lines = split_input("3,4\n5,6", &<RangeList as Solution>::options().input);
    let parsed = RangeList::parse(lines).unwrap();
    assert_eq!(parsed, vec![(3, 4), (5, 6)]);
}

#[test]
fn test_range_list_gate_passes_on_matching_sum() {
    let dir = TempDir::new().unwrap();
    write(&dir, "sample.txt", "3,4\n5,6");
    EXPECTED_FIRST.with(|c| c.set(18));

    let report = TestGate::new(dir.path()).run(&RangeList).unwrap();
    assert_eq!(report.passed, 2);
}

#[test]
fn test_range_list_gate_fails_with_formatted_message() {
    let dir = TempDir::new().unwrap();
    write(&dir, "sample.txt", "3,4\n5,6");
    EXPECTED_FIRST.with(|c| c.set(19));

    let err = TestGate::new(dir.path()).run(&RangeList).unwrap_err();
    EXPECTED_FIRST.with(|c| c.set(18));

    let GateError::Failed(failure) = &err else {
        panic!("expected a test failure, got {err:?}");
    };
    assert_eq!(failure.part, Part::One);
    assert_eq!(failure.index, 1);
    assert_eq!(failure.actual, Actual::Answer(Answer::from(18)));
    assert!(!err.is_config());
    assert_eq!(
        err.to_string(),
        "Wrong Solving Mechanism on Test 1 of Part 1: Got '18' but expected '19'"
    );
}

/// Counts how many fixture solves actually ran
struct Counting;

thread_local! {
    static SOLVES: Cell<usize> = const { Cell::new(0) };
}

impl AocParser for Counting {
    type Parsed = Vec<String>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        Ok(lines)
    }
}

impl PartSolver<1> for Counting {
    fn solve(input: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        SOLVES.with(|c| c.set(c.get() + 1));
        Ok(input.len().into())
    }
}

impl PartSolver<2> for Counting {
    fn solve(input: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        SOLVES.with(|c| c.set(c.get() + 1));
        Ok(input.join("").into())
    }
}

impl Solution for Counting {
    fn tests() -> TestDeclaration {
        // sample.txt has 2 lines, sample2.txt has 3; the second expectation is wrong
        TestDeclaration::new(
            PartTests::many([2, 99, 1]).count(3),
            PartTests::single("ab"),
        )
    }
}

#[test]
fn test_gate_halts_on_first_mismatch() {
    let dir = TempDir::new().unwrap();
    write(&dir, "sample.txt", "a\nb\n");
    write(&dir, "sample2.txt", "a\nb\nc\n");
    write(&dir, "sample3.txt", "a\n");
    SOLVES.with(|c| c.set(0));

    let err = TestGate::new(dir.path()).run(&Counting).unwrap_err();
    let GateError::Failed(failure) = err else {
        panic!("expected a test failure");
    };
    assert_eq!(failure.index, 2);
    assert!(failure.fixture.ends_with("sample2.txt"));
    assert_eq!(SOLVES.with(Cell::get), 2);
}

/// Declares three fixture names but two expected answers
struct Misdeclared;

impl AocParser for Misdeclared {
    type Parsed = ();

    fn parse(_: Vec<String>) -> Result<(), ParseError> {
        panic!("parse must not run for a misdeclared solution");
    }
}

impl PartSolver<1> for Misdeclared {
    fn solve(_: &mut (), _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(0.into())
    }
}

impl PartSolver<2> for Misdeclared {
    fn solve(_: &mut (), _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(0.into())
    }
}

impl Solution for Misdeclared {
    fn tests() -> TestDeclaration {
        TestDeclaration::first_only(PartTests::many([1, 2]).suffixes(["", "2", "3"]))
    }
}

#[test]
fn test_count_mismatch_fails_before_any_io() {
    // The directory does not even exist: a config error must win over file errors
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nowhere");

    let err = TestGate::new(&missing).run(&Misdeclared).unwrap_err();
    assert!(matches!(err, GateError::Config(_)));
    assert!(err.is_config());
}

#[test]
fn test_missing_fixture_is_input_error() {
    let dir = TempDir::new().unwrap();
    let err = TestGate::new(dir.path()).run(&RangeList).unwrap_err();
    assert!(matches!(err, GateError::Input(_)));
}

/// Grid search that would give a different answer if it kept state between runs
struct Reachable;

impl AocParser for Reachable {
    type Parsed = Vec<Vec<bool>>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        Ok(lines
            .iter()
            .map(|l| l.chars().map(|c| c == '.').collect())
            .collect())
    }
}

impl PartSolver<1> for Reachable {
    fn solve(grid: &mut Self::Parsed, _: &mut SolveContext) -> Result<Answer, SolveError> {
        let mut visited = HashSet::new();
        let mut stack = vec![(0usize, 0usize)];
        while let Some((x, y)) = stack.pop() {
            if !grid[y][x] || !visited.insert((x, y)) {
                continue;
            }
            // mark in place, the parsed input is ours to mutate
            grid[y][x] = false;
            if x + 1 < grid[y].len() {
                stack.push((x + 1, y));
            }
            if y + 1 < grid.len() {
                stack.push((x, y + 1));
            }
        }
        Ok(visited.len().into())
    }
}

impl PartSolver<2> for Reachable {
    fn solve(grid: &mut Self::Parsed, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        <Self as PartSolver<1>>::solve(grid, ctx)
    }
}

impl Solution for Reachable {
    fn tests() -> TestDeclaration {
        TestDeclaration::new(PartTests::single(6), PartTests::single(6))
    }
}

#[test]
fn test_parse_then_solve_is_idempotent() {
    let raw = vec!["..#".to_string(), ".#.".to_string(), "...".to_string()];
    let mut ctx = SolveContext::for_test(false);
    let first = Reachable.run_part(Part::One, raw.clone(), &mut ctx).unwrap();
    let second = Reachable.run_part(Part::One, raw.clone(), &mut ctx).unwrap();
    let part_two = Reachable.run_part(Part::Two, raw, &mut ctx).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, part_two);
}

#[test]
fn test_solve_output_is_captured_in_report() {
    struct Chatty;

    impl AocParser for Chatty {
        type Parsed = Vec<String>;
        fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
            Ok(lines)
        }
    }

    impl PartSolver<1> for Chatty {
        fn solve(input: &mut Vec<String>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
            assert!(ctx.is_test());
            ctx.println(format!("seen {}", input.len()));
            Ok(input.len().into())
        }
    }

    impl PartSolver<2> for Chatty {
        fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
            Err(SolveError::Unsolvable("no second part".into()))
        }
    }

    impl Solution for Chatty {
        fn tests() -> TestDeclaration {
            TestDeclaration::first_only(PartTests::single(1))
        }
    }

    let dir = TempDir::new().unwrap();
    write(&dir, "sample.txt", "x\n");
    let report = TestGate::new(dir.path()).run(&Chatty).unwrap();
    assert_eq!(report.output, vec!["seen 1"]);

    let muted = TestGate::new(dir.path()).mute(true).run(&Chatty).unwrap();
    assert!(muted.output.is_empty());
}
