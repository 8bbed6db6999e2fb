//! Phase checkpoints recorded while a run progresses

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// A named checkpoint in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Start,
    Tests,
    Part1,
    Part2,
    End,
}

impl Phase {
    pub fn for_part(part: aoc_solver::Part) -> Self {
        match part {
            aoc_solver::Part::One => Phase::Part1,
            aoc_solver::Part::Two => Phase::Part2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Tests => "tests",
            Phase::Part1 => "part1",
            Phase::Part2 => "part2",
            Phase::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, non-decreasing phase timestamps
///
/// Timestamps are taken when the host observes a checkpoint, so they mark
/// boundaries rather than the exact start and end of a computation.
#[derive(Debug, Clone, Default)]
pub struct TimingRecord {
    marks: Vec<(Phase, Instant)>,
}

impl TimingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, phase: Phase) {
        self.mark_at(phase, Instant::now());
    }

    /// Record `phase` at `at`, replacing an earlier mark of the same phase
    ///
    /// A timestamp earlier than the latest mark is clamped to it.
    pub fn mark_at(&mut self, phase: Phase, at: Instant) {
        self.marks.retain(|(p, _)| *p != phase);
        let at = match self.marks.last() {
            Some(&(_, last)) if at < last => last,
            _ => at,
        };
        self.marks.push((phase, at));
    }

    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.marks.iter().map(|&(p, _)| p)
    }

    /// Elapsed time between the first and the last mark
    pub fn total(&self) -> TimeDelta {
        match (self.marks.first(), self.marks.last()) {
            (Some(&(_, first)), Some(&(_, last))) => between(first, last),
            _ => TimeDelta::zero(),
        }
    }

    /// Time spent reaching each phase from the one before it, in order
    pub fn breakdown(&self) -> Vec<(Phase, TimeDelta)> {
        self.marks
            .windows(2)
            .map(|pair| (pair[1].0, between(pair[0].1, pair[1].1)))
            .collect()
    }
}

fn between(from: Instant, to: Instant) -> TimeDelta {
    TimeDelta::from_std(to.saturating_duration_since(from)).unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_breakdown_follows_marks() {
        let t0 = Instant::now();
        let mut timing = TimingRecord::new();
        timing.mark_at(Phase::Start, t0);
        timing.mark_at(Phase::Tests, t0 + Duration::from_millis(5));
        timing.mark_at(Phase::Part1, t0 + Duration::from_millis(7));
        timing.mark_at(Phase::End, t0 + Duration::from_millis(10));

        assert_eq!(
            timing.breakdown(),
            vec![
                (Phase::Tests, TimeDelta::milliseconds(5)),
                (Phase::Part1, TimeDelta::milliseconds(2)),
                (Phase::End, TimeDelta::milliseconds(3)),
            ]
        );
        assert_eq!(timing.total(), TimeDelta::milliseconds(10));
    }

    #[test]
    fn test_marks_never_go_backwards() {
        let t0 = Instant::now();
        let mut timing = TimingRecord::new();
        timing.mark_at(Phase::Start, t0 + Duration::from_millis(4));
        timing.mark_at(Phase::Tests, t0);
        assert_eq!(timing.breakdown(), vec![(Phase::Tests, TimeDelta::zero())]);
        assert_eq!(timing.total(), TimeDelta::zero());
    }

    #[test]
    fn test_remark_replaces_previous() {
        let t0 = Instant::now();
        let mut timing = TimingRecord::new();
        timing.mark_at(Phase::Start, t0);
        timing.mark_at(Phase::Start, t0 + Duration::from_millis(1));
        timing.mark_at(Phase::Part1, t0 + Duration::from_millis(3));
        assert_eq!(timing.phases().collect::<Vec<_>>(), vec![Phase::Start, Phase::Part1]);
        assert_eq!(timing.total(), TimeDelta::milliseconds(2));
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Part2).unwrap(), "\"part2\"");
        assert_eq!(Phase::Tests.to_string(), "tests");
    }
}
