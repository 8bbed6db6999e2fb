use aoc_solver::{
    Answer, AocParser, ParseError, PartSolver, PartTests, RunOptions, SolveContext, SolveError,
    Slowness, Solution, TestDeclaration,
};
use aoc_solver_macros::AutoRegisterSolution;
use std::collections::VecDeque;

/// Hill climbing: shortest path up a height map where each step climbs at most one
#[derive(AutoRegisterSolution)]
#[aoc(day = 12, tags = ["grid", "bfs", "slow"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    pub heights: Vec<Vec<u8>>,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl HeightMap {
    fn width(&self) -> usize {
        self.heights.first().map_or(0, Vec::len)
    }

    fn neighbors(&self, (x, y): (usize, usize)) -> impl Iterator<Item = (usize, usize)> + '_ {
        let here = self.heights[y][x];
        [
            x.checked_sub(1).map(|x| (x, y)),
            (x + 1 < self.width()).then_some((x + 1, y)),
            y.checked_sub(1).map(|y| (x, y)),
            (y + 1 < self.heights.len()).then_some((x, y + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |&(nx, ny)| self.heights[ny][nx] <= here + 1)
    }

    /// Breadth-first search from every start at once; visited state is local
    fn shortest_from(
        &self,
        starts: impl IntoIterator<Item = (usize, usize)>,
        ctx: &SolveContext,
    ) -> Result<Option<usize>, SolveError> {
        let mut distance = vec![vec![None; self.width()]; self.heights.len()];
        let mut queue = VecDeque::new();
        for (x, y) in starts {
            distance[y][x] = Some(0);
            queue.push_back((x, y));
        }

        while let Some(point) = queue.pop_front() {
            ctx.check_cancelled()?;
            let (x, y) = point;
            let Some(steps) = distance[y][x] else {
                continue;
            };
            if point == self.end {
                return Ok(Some(steps));
            }
            for (nx, ny) in self.neighbors(point) {
                if distance[ny][nx].is_none() {
                    distance[ny][nx] = Some(steps + 1);
                    queue.push_back((nx, ny));
                }
            }
        }
        Ok(None)
    }
}

impl AocParser for Solver {
    type Parsed = HeightMap;

    fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
        let mut start = None;
        let mut end = None;
        let mut heights: Vec<Vec<u8>> = Vec::with_capacity(lines.len());

        for (y, line) in lines.iter().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, square)| match square {
                    'a'..='z' => Ok(square as u8 - b'a'),
                    'S' => {
                        start = Some((x, y));
                        Ok(0)
                    }
                    'E' => {
                        end = Some((x, y));
                        Ok(b'z' - b'a')
                    }
                    other => Err(ParseError::InvalidFormat(format!(
                        "Unrecognized input: '{other}' at ({x}, {y})"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(first) = heights.first()
                && first.len() != row.len()
            {
                return Err(ParseError::InvalidFormat(format!("row {y} has a different width")));
            }
            heights.push(row);
        }

        Ok(HeightMap {
            heights,
            start: start.ok_or_else(|| ParseError::MissingData("no start 'S'".into()))?,
            end: end.ok_or_else(|| ParseError::MissingData("no end 'E'".into()))?,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(map: &mut HeightMap, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        map.shortest_from([map.start], ctx)?
            .map(Answer::from)
            .ok_or_else(|| SolveError::Unsolvable("the summit is unreachable".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(map: &mut HeightMap, ctx: &mut SolveContext) -> Result<Answer, SolveError> {
        let lowest: Vec<(usize, usize)> = map
            .heights
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &h)| h == 0)
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        tracing::debug!(starts = lowest.len(), "searching from every lowest square");
        map.shortest_from(lowest, ctx)?
            .map(Answer::from)
            .ok_or_else(|| SolveError::Unsolvable("no lowest square reaches the summit".into()))
    }
}

impl Solution for Solver {
    fn options() -> RunOptions {
        RunOptions::default().with_slowness(Slowness::Severe)
    }

    fn tests() -> TestDeclaration {
        TestDeclaration::new(PartTests::single(31), PartTests::single(29))
    }
}
