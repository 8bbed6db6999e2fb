//! Sample fixture declarations
//!
//! A solution declares, per part, the expected answers for one or more sample
//! files living next to its input. Two shapes are supported:
//!
//! - legacy: a single expected answer, read from `sample.txt` (or an explicit
//!   file name)
//! - extended: several expected answers, either by count (`sample.txt`,
//!   `sample2.txt`, ..., `sample<n>.txt`) or by an explicit list of suffixes
//!   (`sample<suffix>.txt`)
//!
//! [`TestDeclaration::resolve`] validates the shape without touching the
//! filesystem.

use crate::answer::Answer;
use crate::error::FixtureError;
use crate::solver::Part;

/// Which sample files a part is tested against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureSet {
    /// `sample.txt`
    Default,
    /// One explicitly named file
    File(String),
    /// `sample.txt`, `sample2.txt`, ... up to the given count
    Count(usize),
    /// `sample<suffix>.txt` for each suffix
    Suffixes(Vec<String>),
}

/// Expected answers for one part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartTests {
    pub expected: Vec<Answer>,
    pub fixtures: FixtureSet,
}

impl PartTests {
    /// One expected answer checked against `sample.txt`
    pub fn single(expected: impl Into<Answer>) -> Self {
        Self {
            expected: vec![expected.into()],
            fixtures: FixtureSet::Default,
        }
    }

    /// Several expected answers; pair with [`PartTests::count`] or
    /// [`PartTests::suffixes`]
    pub fn many<I, A>(expected: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Answer>,
    {
        let expected: Vec<Answer> = expected.into_iter().map(Into::into).collect();
        Self {
            fixtures: FixtureSet::Count(expected.len()),
            expected,
        }
    }

    pub fn file(mut self, name: impl Into<String>) -> Self {
        self.fixtures = FixtureSet::File(name.into());
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.fixtures = FixtureSet::Count(count);
        self
    }

    pub fn suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fixtures = FixtureSet::Suffixes(suffixes.into_iter().map(Into::into).collect());
        self
    }

    fn file_names(&self, part: Part) -> Result<Vec<String>, FixtureError> {
        if self.expected.is_empty() {
            return Err(FixtureError::Empty { part });
        }
        let names: Vec<String> = match &self.fixtures {
            FixtureSet::Default => vec!["sample.txt".to_string()],
            FixtureSet::File(name) => vec![name.clone()],
            FixtureSet::Count(n) => (1..=*n).map(numbered_sample).collect(),
            FixtureSet::Suffixes(suffixes) => suffixes
                .iter()
                .map(|s| format!("sample{s}.txt"))
                .collect(),
        };
        if names.len() != self.expected.len() {
            return Err(FixtureError::CountMismatch {
                part,
                fixtures: names.len(),
                expected: self.expected.len(),
            });
        }
        Ok(names)
    }
}

fn numbered_sample(n: usize) -> String {
    if n == 1 {
        "sample.txt".to_string()
    } else {
        format!("sample{n}.txt")
    }
}

/// Fixture declarations for both parts; an undeclared part is not tested
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDeclaration {
    pub first: Option<PartTests>,
    pub second: Option<PartTests>,
}

impl TestDeclaration {
    pub fn new(first: PartTests, second: PartTests) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
        }
    }

    pub fn first_only(first: PartTests) -> Self {
        Self {
            first: Some(first),
            second: None,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn part(&self, part: Part) -> Option<&PartTests> {
        match part {
            Part::One => self.first.as_ref(),
            Part::Two => self.second.as_ref(),
        }
    }

    /// Flatten into the ordered list of fixture runs
    ///
    /// Fails on the first part whose declared fixtures and expected answers
    /// disagree in number.
    pub fn resolve(&self) -> Result<Vec<ResolvedFixture>, FixtureError> {
        let mut plan = Vec::new();
        for part in Part::ALL {
            let Some(tests) = self.part(part) else {
                continue;
            };
            let names = tests.file_names(part)?;
            plan.extend(
                names
                    .into_iter()
                    .zip(tests.expected.iter().cloned())
                    .enumerate()
                    .map(|(i, (file, expected))| ResolvedFixture {
                        part,
                        index: i + 1,
                        file,
                        expected,
                    }),
            );
        }
        Ok(plan)
    }
}

/// One sample file paired with the answer it must produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFixture {
    pub part: Part,
    /// 1-based position among this part's fixtures
    pub index: usize,
    pub file: String,
    pub expected: Answer,
}
