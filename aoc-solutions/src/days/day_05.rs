use anyhow::{Context, anyhow, bail};
use aoc_solver::{
    Answer, AocParser, InputOptions, ParseError, PartSolver, PartTests, RunOptions, SolveContext,
    SolveError, Solution, TestDeclaration,
};
use aoc_solver_macros::AutoRegisterSolution;

/// Supply stacks: a drawing of crate stacks, a blank line, then move orders
#[derive(AutoRegisterSolution)]
#[aoc(day = 5, tags = ["simulation", "text"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub amount: usize,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dock {
    /// Bottom to top
    pub stacks: Vec<Vec<char>>,
    pub moves: Vec<Move>,
}

fn parse_move(line: &str, stack_count: usize) -> anyhow::Result<Move> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let ["move", amount, "from", from, "to", to] = words.as_slice() else {
        bail!("unexpected order '{line}'");
    };
    let index = |s: &str| -> anyhow::Result<usize> {
        let n: usize = s.parse()?;
        if n == 0 || n > stack_count {
            bail!("stack {n} does not exist");
        }
        Ok(n - 1)
    };
    Ok(Move {
        amount: amount.parse()?,
        from: index(*from)?,
        to: index(*to)?,
    })
}

fn parse_dock(lines: &[String]) -> anyhow::Result<Dock> {
    let split = lines
        .iter()
        .position(|l| l.trim().is_empty())
        .ok_or_else(|| anyhow!("no blank line between drawing and orders"))?;
    let (labels, drawing) = lines[..split]
        .split_last()
        .ok_or_else(|| anyhow!("empty drawing"))?;
    let stack_count: usize = labels
        .split_whitespace()
        .last()
        .ok_or_else(|| anyhow!("missing stack labels"))?
        .parse()
        .context("stack labels")?;

    let mut stacks = vec![Vec::new(); stack_count];
    for row in drawing.iter().rev() {
        let cells: Vec<char> = row.chars().collect();
        for (i, stack) in stacks.iter_mut().enumerate() {
            if let Some(&c) = cells.get(i * 4 + 1)
                && c.is_ascii_alphabetic()
            {
                stack.push(c);
            }
        }
    }

    let moves = lines[split + 1..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| parse_move(l, stack_count))
        .collect::<anyhow::Result<_>>()?;

    Ok(Dock { stacks, moves })
}

impl AocParser for Solver {
    type Parsed = Dock;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        parse_dock(&lines).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl Dock {
    fn apply(&mut self, keep_order: bool) -> Result<(), SolveError> {
        for m in &self.moves {
            let source = &mut self.stacks[m.from];
            if source.len() < m.amount {
                return Err(SolveError::Unsolvable(format!(
                    "stack {} holds {} crates, cannot move {}",
                    m.from + 1,
                    source.len(),
                    m.amount
                )));
            }
            let mut lifted = source.split_off(source.len() - m.amount);
            if !keep_order {
                lifted.reverse();
            }
            self.stacks[m.to].extend(lifted);
        }
        Ok(())
    }

    fn tops(&self) -> String {
        self.stacks.iter().filter_map(|s| s.last()).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(dock: &mut Dock, _: &mut SolveContext) -> Result<Answer, SolveError> {
        dock.apply(false)?;
        Ok(dock.tops().into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(dock: &mut Dock, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        dock.apply(true)?;
        for (i, stack) in dock.stacks.iter().enumerate() {
            ctx.println(format!("{}: {}", i + 1, stack.iter().collect::<String>()));
        }
        Ok(dock.tops().into())
    }
}

impl Solution for Solver {
    fn options() -> RunOptions {
        RunOptions::default().with_input(InputOptions::keep_empty_lines())
    }

    fn tests() -> TestDeclaration {
        TestDeclaration::new(PartTests::single("CMZ"), PartTests::single("MCD"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{DynSolution, Part, split_input};

    const SAMPLE: &str = "    [D]    \n[N] [C]    \n[Z] [M] [P]\n 1   2   3 \n\nmove 1 from 2 to 1\nmove 3 from 1 to 3\nmove 2 from 2 to 1\nmove 1 from 1 to 2\n";

    fn lines() -> Vec<String> {
        split_input(SAMPLE, &<Solver as Solution>::options().input)
    }

    #[test]
    fn test_parse_drawing() {
        let dock = <Solver as AocParser>::parse(lines()).unwrap();
        assert_eq!(dock.stacks, vec![vec!['Z', 'N'], vec!['M', 'C', 'D'], vec!['P']]);
        assert_eq!(dock.moves[0], Move { amount: 1, from: 1, to: 0 });
        assert_eq!(dock.moves.len(), 4);
    }

    #[test]
    fn test_text_answers() {
        let mut ctx = SolveContext::for_test(false);
        assert_eq!(Solver.run_part(Part::One, lines(), &mut ctx).unwrap(), Answer::from("CMZ"));
        assert_eq!(Solver.run_part(Part::Two, lines(), &mut ctx).unwrap(), Answer::from("MCD"));
        assert_eq!(ctx.take_output(), vec!["1: M", "2: C", "3: PZND"]);
    }

    #[test]
    fn test_unknown_stack_is_parse_error() {
        let mut input = lines();
        input.push("move 1 from 9 to 1".into());
        assert!(<Solver as AocParser>::parse(input).is_err());
    }
}
