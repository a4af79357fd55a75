//! Case registration and the frozen case registry.
//!
//! Cases are collected through [`RegistryBuilder`] before a run starts. The
//! resulting [`Registry`] is read-only: the runner shares it and never adds,
//! removes, or changes an entry.

use std::collections::HashMap;
use std::fmt;

use crate::context::CaseContext;
use crate::error::RegistryError;
use crate::lifecycle::Case;
use crate::status::CaseResult;

/// Signature of a registered case function.
pub type CaseFn = dyn Fn(&mut CaseContext<'_>) -> CaseResult;

/// A named case and the function that runs it.
pub struct CaseDescriptor {
    name: String,
    description: String,
    run: Box<CaseFn>,
}

impl CaseDescriptor {
    /// Creates a descriptor from a raw case function.
    ///
    /// Most cases are built through [`Case`]; a raw function is useful when a
    /// case needs full control over the status it reports.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        run: impl Fn(&mut CaseContext<'_>) -> CaseResult + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            run: Box::new(run),
        }
    }

    /// Returns the case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Runs the case once.
    pub fn invoke(&self, ctx: &mut CaseContext<'_>) -> CaseResult {
        (self.run)(ctx)
    }
}

impl fmt::Debug for CaseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable list of cases.
///
/// # Examples
///
/// ```
/// use casekit::{Case, RegistryBuilder};
///
/// let registry = RegistryBuilder::new()
///     .case(Case::new("first", "runs first"))
///     .case(Case::new("second", "runs second"))
///     .build();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.get(1).map(|case| case.name()), Some("second"));
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<CaseDescriptor>,
}

impl Registry {
    /// Returns the number of registered cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` when no case is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Returns the case at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CaseDescriptor> {
        self.cases.get(index)
    }

    /// Iterates over the cases in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CaseDescriptor> {
        self.cases.iter()
    }
}

impl FromIterator<CaseDescriptor> for Registry {
    fn from_iter<I: IntoIterator<Item = CaseDescriptor>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

/// Collects cases in registration order.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    cases: Vec<CaseDescriptor>,
}

impl RegistryBuilder {
    /// Starts an empty registration list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw descriptor.
    #[must_use]
    pub fn register(mut self, descriptor: CaseDescriptor) -> Self {
        self.cases.push(descriptor);
        self
    }

    /// Appends a case built with [`Case`].
    #[must_use]
    pub fn case<L: 'static>(self, case: Case<L>) -> Self {
        self.register(case.into_descriptor())
    }

    /// Freezes the list without further checks.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry { cases: self.cases }
    }

    /// Freezes the list, rejecting duplicate case names.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCase`] for the first name registered
    /// twice.
    pub fn try_build(self) -> Result<Registry, RegistryError> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(self.cases.len());
        for (position, case) in self.cases.iter().enumerate() {
            if let Some(&first) = seen.get(case.name()) {
                return Err(RegistryError::DuplicateCase {
                    name: case.name().to_string(),
                    first,
                    second: position,
                });
            }
            seen.insert(case.name(), position);
        }
        Ok(self.build())
    }
}
