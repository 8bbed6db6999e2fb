//! Solution registry for looking up solutions by day

use crate::error::RegistrationError;
use crate::solver::DynSolution;

/// Days per event (1-25)
pub const DAYS: usize = 25;

/// Flat index for a day, `None` when out of range
#[inline]
fn calc_index(day: u8) -> Option<usize> {
    if day == 0 || day as usize > DAYS {
        return None;
    }
    Some(day as usize - 1)
}

#[inline]
fn from_index(index: usize) -> u8 {
    index as u8 + 1
}

/// Plugin information for automatic solution registration
///
/// Usually produced by `#[derive(AutoRegisterSolution)]`, but can be
/// submitted by hand:
///
/// ```no_run
/// use aoc_solver::{
///     Answer, AocParser, ParseError, PartSolver, SolveContext, SolveError, Solution,
///     SolutionPlugin, TestDeclaration,
/// };
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type Parsed = Vec<String>;
///     fn parse(lines: Vec<String>) -> Result<Self::Parsed, ParseError> {
///         Ok(lines)
///     }
/// }
///
/// impl PartSolver<1> for Day1 {
///     fn solve(input: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
///         Ok(input.len().into())
///     }
/// }
///
/// impl PartSolver<2> for Day1 {
///     fn solve(_: &mut Vec<String>, _: &mut SolveContext) -> Result<Answer, SolveError> {
///         Ok(0.into())
///     }
/// }
///
/// impl Solution for Day1 {
///     fn tests() -> TestDeclaration {
///         TestDeclaration::none()
///     }
/// }
///
/// inventory::submit! {
///     SolutionPlugin {
///         day: 1,
///         solution: &Day1,
///         tags: &["easy"],
///     }
/// }
/// ```
pub struct SolutionPlugin {
    /// The day number (1-25)
    pub day: u8,
    /// The solution (type-erased)
    pub solution: &'static dyn DynSolution,
    /// Optional tags for filtering
    pub tags: &'static [&'static str],
}

inventory::collect!(SolutionPlugin);

/// A registered solution with its metadata
#[derive(Clone, Copy)]
pub struct RegisteredSolution {
    pub day: u8,
    pub solution: &'static dyn DynSolution,
    pub tags: &'static [&'static str],
}

/// Builder for constructing a [`SolutionRegistry`]
///
/// Rejects duplicate days and days outside 1-25.
pub struct SolutionRegistryBuilder {
    entries: Vec<Option<RegisteredSolution>>,
}

impl SolutionRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..DAYS).map(|_| None).collect(),
        }
    }

    /// Register a solution for a specific day
    pub fn register(
        mut self,
        day: u8,
        solution: &'static dyn DynSolution,
        tags: &'static [&'static str],
    ) -> Result<Self, RegistrationError> {
        let index = calc_index(day).ok_or(RegistrationError::InvalidDay(day))?;
        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolution(day));
        }
        self.entries[index] = Some(RegisteredSolution {
            day,
            solution,
            tags,
        });
        Ok(self)
    }

    /// Register all plugins submitted via `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solution_plugins(|_| true)
    }

    /// Register plugins for which `filter` returns `true`
    ///
    /// ```no_run
    /// # use aoc_solver::SolutionRegistryBuilder;
    /// let registry = SolutionRegistryBuilder::new()
    ///     .register_solution_plugins(|plugin| plugin.tags.contains(&"easy"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solution_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolutionPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolutionPlugin>() {
            if filter(plugin) {
                tracing::trace!(day = plugin.day, "registering plugin");
                self = self.register(plugin.day, plugin.solution, plugin.tags)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolutionRegistry {
        SolutionRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolutionRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable day-indexed registry
pub struct SolutionRegistry {
    entries: Vec<Option<RegisteredSolution>>,
}

impl SolutionRegistry {
    pub fn get(&self, day: u8) -> Option<RegisteredSolution> {
        calc_index(day).and_then(|i| self.entries.get(i).copied().flatten())
    }

    pub fn contains(&self, day: u8) -> bool {
        self.get(day).is_some()
    }

    /// Registered days in ascending order
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| from_index(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = RegisteredSolution> + '_ {
        self.entries.iter().filter_map(|e| *e)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}
