use anyhow::bail;
use aoc_solver::{
    Answer, AocParser, ParseError, PartSolver, PartTests, SolveContext, SolveError, Solution,
    TestDeclaration,
};
use aoc_solver_macros::AutoRegisterSolution;

/// Cathode-ray tube: a two-instruction CPU driving a 40x6 display
#[derive(AutoRegisterSolution)]
#[aoc(day = 10, tags = ["simulation", "render"])]
pub struct Solver;

const WIDTH: usize = 40;
const HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Noop,
    AddX(i64),
}

fn parse_instruction(line: &str) -> anyhow::Result<Instruction> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("noop"), None, None) => Ok(Instruction::Noop),
        (Some("addx"), Some(value), None) => Ok(Instruction::AddX(value.parse()?)),
        _ => bail!("Couldn't parse instruction: '{line}'"),
    }
}

impl AocParser for Solver {
    type Parsed = Vec<Instruction>;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        lines
            .iter()
            .map(|line| parse_instruction(line))
            .collect::<anyhow::Result<_>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// X register value during each cycle, index 0 is cycle 1
fn register_trace(program: &[Instruction]) -> Vec<i64> {
    let mut x = 1;
    let mut trace = vec![x];
    for instruction in program {
        match instruction {
            Instruction::Noop => trace.push(x),
            Instruction::AddX(value) => {
                trace.push(x);
                x += value;
                trace.push(x);
            }
        }
    }
    trace
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Vec<Instruction>, _: &mut SolveContext) -> Result<Answer, SolveError> {
        let trace = register_trace(program);
        let strength: i64 = (20..trace.len())
            .step_by(WIDTH)
            .map(|cycle| cycle as i64 * trace[cycle - 1])
            .sum();
        Ok(strength.into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(program: &mut Vec<Instruction>, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        let trace = register_trace(program);
        if trace.len() < WIDTH * HEIGHT {
            return Err(SolveError::Unsolvable(format!(
                "program runs {} cycles, the display needs {}",
                trace.len(),
                WIDTH * HEIGHT
            )));
        }
        let rows: Vec<String> = trace[..WIDTH * HEIGHT]
            .chunks(WIDTH)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(x, sprite)| if (x as i64 - sprite).abs() <= 1 { '#' } else { '.' })
                    .collect()
            })
            .collect();

        if !ctx.is_test() {
            for row in &rows {
                ctx.println(row.replace('.', " "));
            }
        }
        Ok(rows.into())
    }
}

impl Solution for Solver {
    fn tests() -> TestDeclaration {
        TestDeclaration::new(
            PartTests::single(13140),
            PartTests::single(vec![
                "##..##..##..##..##..##..##..##..##..##..",
                "###...###...###...###...###...###...###.",
                "####....####....####....####....####....",
                "#####.....#####.....#####.....#####.....",
                "######......######......######......####",
                "#######.......#######.......#######.....",
            ]),
        )
    }
}
