//! Output formatting for run results

use crate::channel::ExecutionResult;
use crate::config::RunSettings;
use crate::status::RunStatus;
use chrono::TimeDelta;
use console::style;
use itertools::Itertools;

/// Format a TimeDelta for display
///
/// Sub-millisecond values keep three decimals of a millisecond, anything
/// past a minute is shown as `HH:MM:SS`.
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("0.{micros:03} ms")
    } else if micros < 1_000_000 {
        format!("{} ms", (micros + 500) / 1000)
    } else if micros < 60_000_000 {
        format!("{}.{:03} s", micros / 1_000_000, (micros % 1_000_000) / 1000)
    } else {
        let secs = micros / 1_000_000;
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

fn timing_text(result: &ExecutionResult, debug: bool) -> String {
    if !debug {
        return format!("It took {}", format_duration(result.timing.total()));
    }
    let phases = result
        .timing
        .breakdown()
        .into_iter()
        .map(|(phase, spent)| format!("{phase}: {}\n", format_duration(spent)))
        .join("");
    format!("Timings:\n{phases}all: {}", format_duration(result.timing.total()))
}

fn lines(text: &[String]) -> String {
    text.iter().map(|line| format!("{line}\n")).collect()
}

/// Render one finished run the way it is printed
///
/// Muted runs print nothing unless a test failed or an internal error
/// occurred.
pub fn render(day: u8, result: &ExecutionResult, settings: &RunSettings) -> String {
    let timing = style(timing_text(result, settings.debug)).yellow();
    let output = &result.output;
    match result.status {
        RunStatus::Success if settings.mute => String::new(),
        RunStatus::Success => format!(
            "{}\n{timing}\n\n",
            style(format!("Got Results:\n{}", lines(&output.stdout)).trim_end().to_string()).cyan()
        ),
        RunStatus::Skipped | RunStatus::Cancelled if settings.mute => String::new(),
        RunStatus::Skipped => format!("{}{timing}\n\n", style(lines(&output.stdout)).yellow()),
        RunStatus::Cancelled => format!("{}{timing}\n\n", style(lines(&output.errors)).yellow()),
        RunStatus::TestFailed => format!(
            "{}{}{timing}\n\n",
            style(format!(
                "Test failed with: {}:\n{}",
                RunStatus::TestFailed.code(),
                lines(&output.stderr)
            ))
            .red(),
            style(lines(&output.errors)).yellow(),
        ),
        RunStatus::Internal => format!(
            "{}{}{timing}\n\n",
            style(format!(
                "Got Error with code {} on Day {day:02}:\n{}",
                RunStatus::Internal.code(),
                lines(&output.stderr)
            ))
            .red(),
            style(lines(&output.errors)).yellow(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{CapturedOutput, ExecutionResult};
    use crate::timing::{Phase, TimingRecord};
    use std::time::{Duration, Instant};

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).to_string()
    }

    fn result(status: RunStatus, output: CapturedOutput) -> ExecutionResult {
        let t0 = Instant::now();
        let mut timing = TimingRecord::new();
        timing.mark_at(Phase::Start, t0);
        timing.mark_at(Phase::Tests, t0 + Duration::from_micros(250));
        timing.mark_at(Phase::Part1, t0 + Duration::from_millis(12));
        timing.mark_at(Phase::End, t0 + Duration::from_millis(13));
        ExecutionResult {
            status,
            output,
            answers: [None, None],
            timing,
        }
    }

    #[test]
    fn test_duration_tiers() {
        assert_eq!(format_duration(TimeDelta::microseconds(5)), "0.005 ms");
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "0.999 ms");
        assert_eq!(format_duration(TimeDelta::microseconds(12_400)), "12 ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2_050)), "2.050 s");
        assert_eq!(format_duration(TimeDelta::seconds(3_725)), "01:02:05");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-0.005 ms");
    }

    #[test]
    fn test_success_lists_results() {
        let output = CapturedOutput {
            stdout: vec!["Part 1: '24000'".into(), "Part 2: '45000'".into()],
            ..CapturedOutput::default()
        };
        let text = plain(render(1, &result(RunStatus::Success, output), &RunSettings::default()));
        assert!(text.starts_with("Got Results:\nPart 1: '24000'\nPart 2: '45000'\n"));
        assert!(text.contains("It took 13 ms"));
    }

    #[test]
    fn test_debug_breakdown() {
        let settings = RunSettings {
            debug: true,
            ..RunSettings::default()
        };
        let text = plain(render(1, &result(RunStatus::Success, CapturedOutput::default()), &settings));
        assert!(text.contains("Timings:\ntests: 0.250 ms\npart1: 12 ms\nend: 1 ms\nall: 13 ms"));
    }

    #[test]
    fn test_failures_shown_even_when_muted() {
        let settings = RunSettings {
            mute: true,
            ..RunSettings::default()
        };
        let output = CapturedOutput {
            stderr: vec!["Wrong Solving Mechanism on Test 1 of Part 1: Got '3' but expected '4'".into()],
            ..CapturedOutput::default()
        };
        let text = plain(render(4, &result(RunStatus::TestFailed, output), &settings));
        assert!(text.starts_with("Test failed with: 69:\nWrong Solving Mechanism"));

        let text = plain(render(4, &result(RunStatus::Internal, CapturedOutput::default()), &settings));
        assert!(text.starts_with("Got Error with code 68 on Day 04:"));

        assert!(render(4, &result(RunStatus::Success, CapturedOutput::default()), &settings).is_empty());
        assert!(render(4, &result(RunStatus::Cancelled, CapturedOutput::default()), &settings).is_empty());
    }

    #[test]
    fn test_cancel_and_skip_messages() {
        let cancelled = CapturedOutput {
            errors: vec!["Cancelled by User".into()],
            ..CapturedOutput::default()
        };
        let text = plain(render(12, &result(RunStatus::Cancelled, cancelled), &RunSettings::default()));
        assert!(text.starts_with("Cancelled by User\nIt took"));

        let skipped = CapturedOutput {
            stdout: vec!["Auto Skipped Slow Solution".into()],
            ..CapturedOutput::default()
        };
        let text = plain(render(12, &result(RunStatus::Skipped, skipped), &RunSettings::default()));
        assert!(text.starts_with("Auto Skipped Slow Solution\n"));
    }
}
