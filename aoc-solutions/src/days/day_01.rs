use anyhow::Context;
use aoc_solver::{
    Answer, AocParser, InputOptions, ParseError, PartSolver, PartTests, RunOptions, SolveContext,
    SolveError, Solution, TestDeclaration,
};
use aoc_solver_macros::AutoRegisterSolution;

/// Calorie counting: blank lines separate one elf's snacks from the next
#[derive(AutoRegisterSolution)]
#[aoc(day = 1, tags = ["easy", "grouping"])]
pub struct Solver;

impl AocParser for Solver {
    /// Calorie total per elf
    type Parsed = Vec<u64>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        let mut totals = vec![0u64];
        for (line_idx, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                totals.push(0);
                continue;
            }
            let calories: u64 = line
                .parse()
                .with_context(|| format!("(line {}) not a calorie count: '{line}'", line_idx + 1))
                .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
            if let Some(current) = totals.last_mut() {
                *current += calories;
            }
        }
        Ok(totals)
    }
}

impl PartSolver<1> for Solver {
    fn solve(totals: &mut Vec<u64>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        totals
            .iter()
            .max()
            .map(|&max| max.into())
            .ok_or_else(|| SolveError::Unsolvable("no elves in input".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(totals: &mut Vec<u64>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(totals.iter().take(3).sum::<u64>().into())
    }
}

impl Solution for Solver {
    fn options() -> RunOptions {
        RunOptions::default().with_input(InputOptions::keep_empty_lines())
    }

    fn tests() -> TestDeclaration {
        TestDeclaration::new(
            PartTests::many([24000, 10000]).suffixes(["", "_single"]),
            PartTests::single(45000),
        )
    }
}
