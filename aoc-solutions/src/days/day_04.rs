use anyhow::{Context, anyhow};
use aoc_solver::{
    Answer, AocParser, ParseError, PartSolver, PartTests, SolveContext, SolveError, Solution,
    TestDeclaration,
};
use aoc_solver_macros::AutoRegisterSolution;
use std::ops::RangeInclusive;

/// Camp cleanup: pairs of section ranges per line, `a-b,c-d`
#[derive(AutoRegisterSolution)]
#[aoc(day = 4, tags = ["easy", "ranges"])]
pub struct Solver;

pub type Assignment = (RangeInclusive<u32>, RangeInclusive<u32>);

fn parse_range(text: &str) -> anyhow::Result<RangeInclusive<u32>> {
    let (begin, end) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("range '{text}' has no '-'"))?;
    let begin: u32 = begin.trim().parse()?;
    let end: u32 = end.trim().parse()?;
    if begin > end {
        return Err(anyhow!("range '{text}' is reversed"));
    }
    Ok(begin..=end)
}

fn parse_assignment(line: &str) -> anyhow::Result<Assignment> {
    let (first, second) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected two ranges separated by ','"))?;
    Ok((parse_range(first)?, parse_range(second)?))
}

impl AocParser for Solver {
    type Parsed = Vec<Assignment>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        lines
            .iter()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_assignment(line).with_context(|| format!("line {}", line_idx + 1))
            })
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

fn contains(outer: &RangeInclusive<u32>, inner: &RangeInclusive<u32>) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}

fn overlaps(a: &RangeInclusive<u32>, b: &RangeInclusive<u32>) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

impl PartSolver<1> for Solver {
    fn solve(pairs: &mut Vec<Assignment>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(pairs
            .iter()
            .filter(|(a, b)| contains(a, b) || contains(b, a))
            .count()
            .into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(pairs: &mut Vec<Assignment>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(pairs.iter().filter(|(a, b)| overlaps(a, b)).count().into())
    }
}

impl Solution for Solver {
    fn tests() -> TestDeclaration {
        TestDeclaration::new(PartTests::single(2), PartTests::many([4, 1]).count(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_pairs() {
        let parsed = <Solver as AocParser>::parse(lines("2-4,6-8\n6-6,4-6")).unwrap();
        assert_eq!(parsed, vec![(2..=4, 6..=8), (6..=6, 4..=6)]);
    }

    #[test]
    fn test_parse_rejects_missing_comma() {
        let err = <Solver as AocParser>::parse(lines("2-4,6-8\n2-4")).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    proptest! {
        #[test]
        fn prop_containment_implies_overlap(a in 0u32..50, b in 0u32..50, c in 0u32..50, d in 0u32..50) {
            let first = a.min(b)..=a.max(b);
            let second = c.min(d)..=c.max(d);
            if contains(&first, &second) {
                prop_assert!(overlaps(&first, &second));
            }
            prop_assert_eq!(overlaps(&first, &second), overlaps(&second, &first));
        }
    }
}
