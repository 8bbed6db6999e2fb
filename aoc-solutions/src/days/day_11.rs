//! Monkey in the middle
//!
//! Each monkey's "Operation" line is parsed into a small [`Expr`] tree and
//! evaluated by [`Expr::eval`]; nothing from the input is ever executed.

use anyhow::{Context, anyhow, bail};
use aoc_solver::{
    Answer, AocParser, InputOptions, ParseError, PartSolver, PartTests, RunOptions, SolveContext,
    SolveError, Slowness, Solution, TestDeclaration,
};
use aoc_solver_macros::AutoRegisterSolution;
use std::collections::VecDeque;
use std::str::FromStr;

#[derive(AutoRegisterSolution)]
#[aoc(day = 11, tags = ["simulation", "slow"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Old,
    Const(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Mul,
}

/// `new = <lhs> <op> <rhs>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr {
    pub lhs: Operand,
    pub op: Operator,
    pub rhs: Operand,
}

impl FromStr for Operand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "old" => Ok(Operand::Old),
            n => Ok(Operand::Const(
                n.parse().with_context(|| format!("bad operand '{n}'"))?,
            )),
        }
    }
}

impl FromStr for Expr {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let ["new", "=", lhs, op, rhs] = tokens.as_slice() else {
            bail!("expected 'new = <a> <op> <b>', got '{s}'");
        };
        let op = match *op {
            "+" => Operator::Add,
            "*" => Operator::Mul,
            other => bail!("unsupported operator '{other}'"),
        };
        Ok(Expr {
            lhs: lhs.parse()?,
            op,
            rhs: rhs.parse()?,
        })
    }
}

impl Expr {
    /// Evaluate against `old`, `None` on overflow
    pub fn eval(&self, old: u64) -> Option<u64> {
        let value = |operand: Operand| match operand {
            Operand::Old => old,
            Operand::Const(n) => n,
        };
        let (a, b) = (value(self.lhs), value(self.rhs));
        match self.op {
            Operator::Add => a.checked_add(b),
            Operator::Mul => a.checked_mul(b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    pub items: VecDeque<u64>,
    pub operation: Expr,
    pub divisor: u64,
    pub if_true: usize,
    pub if_false: usize,
}

fn field<'a>(line: Option<&'a String>, prefix: &str) -> anyhow::Result<&'a str> {
    let line = line.ok_or_else(|| anyhow!("missing '{prefix}' line"))?;
    line.trim()
        .strip_prefix(prefix)
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected '{prefix}', got '{}'", line.trim()))
}

fn parse_monkey(block: &[String]) -> anyhow::Result<Monkey> {
    let mut lines = block.iter();
    field(lines.next(), "Monkey")?;
    let items = field(lines.next(), "Starting items:")?
        .split(',')
        .map(|item| item.trim().parse::<u64>())
        .collect::<Result<_, _>>()?;
    let operation = field(lines.next(), "Operation:")?.parse()?;
    let divisor: u64 = field(lines.next(), "Test: divisible by")?.parse()?;
    if divisor == 0 {
        bail!("divisor must be positive");
    }
    let if_true = field(lines.next(), "If true: throw to monkey")?.parse()?;
    let if_false = field(lines.next(), "If false: throw to monkey")?.parse()?;
    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

impl AocParser for Solver {
    type Parsed = Vec<Monkey>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        let monkeys = lines
            .split(|line| line.trim().is_empty())
            .filter(|block| !block.is_empty())
            .enumerate()
            .map(|(i, block)| parse_monkey(block).with_context(|| format!("monkey {i}")))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;

        let count = monkeys.len();
        let bad_target = |i: usize, target: usize| target >= count || target == i;
        if let Some((i, _)) = monkeys
            .iter()
            .enumerate()
            .find(|(i, m)| bad_target(*i, m.if_true) || bad_target(*i, m.if_false))
        {
            return Err(ParseError::InvalidFormat(format!(
                "monkey {i} throws to itself or to a missing monkey"
            )));
        }
        if count < 2 {
            return Err(ParseError::MissingData("need at least two monkeys".into()));
        }
        Ok(monkeys)
    }
}

enum Relief {
    DivideByThree,
    /// Keep worry levels modulo the product of every divisor
    Modulo(u64),
}

fn monkey_business(
    monkeys: &mut [Monkey],
    rounds: usize,
    relief: Relief,
    ctx: &SolveContext,
) -> Result<u64, SolveError> {
    let mut inspected = vec![0u64; monkeys.len()];
    for round in 0..rounds {
        ctx.check_cancelled()?;
        for i in 0..monkeys.len() {
            while let Some(worry) = monkeys[i].items.pop_front() {
                inspected[i] += 1;
                let monkey = &monkeys[i];
                let worry = monkey.operation.eval(worry).ok_or_else(|| {
                    SolveError::Unsolvable(format!("worry level overflow in round {round}"))
                })?;
                let worry = match relief {
                    Relief::DivideByThree => worry / 3,
                    Relief::Modulo(m) => worry % m,
                };
                let target = if worry % monkey.divisor == 0 {
                    monkey.if_true
                } else {
                    monkey.if_false
                };
                monkeys[target].items.push_back(worry);
            }
        }
    }
    inspected.sort_unstable_by(|a, b| b.cmp(a));
    Ok(inspected[0] * inspected[1])
}

impl PartSolver<1> for Solver {
    fn solve(monkeys: &mut Vec<Monkey>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        Ok(monkey_business(monkeys, 20, Relief::DivideByThree, ctx)?.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(monkeys: &mut Vec<Monkey>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        let modulus = monkeys
            .iter()
            .try_fold(1u64, |acc, m| acc.checked_mul(m.divisor))
            .ok_or_else(|| SolveError::Unsolvable("divisor product overflows".into()))?;
        tracing::debug!(modulus, "reducing worry levels");
        Ok(monkey_business(monkeys, 10_000, Relief::Modulo(modulus), ctx)?.into())
    }
}

impl Solution for Solver {
    fn options() -> RunOptions {
        RunOptions::default()
            .with_input(InputOptions::keep_empty_lines())
            .with_slowness(Slowness::Moderate)
    }

    fn tests() -> TestDeclaration {
        TestDeclaration::new(PartTests::single(10605), PartTests::single(2713310158u64))
    }
}
