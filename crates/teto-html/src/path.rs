//! Absolute element paths.
//!
//! Supports the subset of XPath that browser "copy full XPath" produces:
//! `/name/name[n]/...` with 1-based positional predicates. A step without a
//! predicate matches every child with that name; the first match in document
//! order wins.

use std::fmt;
use std::str::FromStr;

use crate::dom::Element;
use crate::error::PathError;

/// One `/name[n]` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    /// Lower-case element name.
    pub name: String,
    /// 1-based position among same-named siblings, if constrained.
    pub position: Option<usize>,
}

/// A parsed absolute element path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    source: String,
    steps: Vec<PathStep>,
}

impl ElementPath {
    /// Parses `/html/body/table[2]`-style paths.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] for relative paths, `//`, empty steps, names with
    /// characters outside `[A-Za-z0-9-_]`, and predicates other than a
    /// positive integer.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let trimmed = path.trim();
        let Some(body) = trimmed.strip_prefix('/') else {
            return Err(PathError::new(path, "must start with '/'"));
        };
        if body.is_empty() {
            return Err(PathError::new(path, "no steps"));
        }

        let steps = body
            .split('/')
            .map(|raw| parse_step(path, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: trimmed.to_string(),
            steps,
        })
    }

    /// Steps in order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// The path as given (trimmed).
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Evaluates the path against top-level elements; results are in
    /// document order.
    pub(crate) fn select<'a, I>(&self, roots: I) -> Vec<&'a Element>
    where
        I: IntoIterator<Item = &'a Element>,
    {
        let Some((first, rest)) = self.steps.split_first() else {
            return Vec::new();
        };
        let mut current = filter_step(first, roots);
        for step in rest {
            current = current
                .into_iter()
                .flat_map(|element| filter_step(step, element.child_elements()))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }
}

fn filter_step<'a, I>(step: &PathStep, candidates: I) -> Vec<&'a Element>
where
    I: IntoIterator<Item = &'a Element>,
{
    let named = candidates.into_iter().filter(|e| e.name() == step.name);
    match step.position {
        Some(n) => named.skip(n - 1).take(1).collect(),
        None => named.collect(),
    }
}

fn parse_step(path: &str, raw: &str) -> Result<PathStep, PathError> {
    if raw.is_empty() {
        return Err(PathError::new(path, "empty step ('//' is not supported)"));
    }
    let (name, position) = match raw.find('[') {
        Some(open) => {
            let predicate = raw[open + 1..]
                .strip_suffix(']')
                .ok_or_else(|| PathError::new(path, format!("unterminated predicate in '{raw}'")))?;
            let n: usize = predicate
                .trim()
                .parse()
                .map_err(|_| {
                    PathError::new(path, format!("predicate '{predicate}' is not a position"))
                })?;
            if n == 0 {
                return Err(PathError::new(path, "positions are 1-based"));
            }
            (&raw[..open], Some(n))
        }
        None => (raw, None),
    };
    if name.is_empty()
        || !name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_'))
    {
        return Err(PathError::new(path, format!("invalid element name '{name}'")));
    }
    Ok(PathStep {
        name: name.to_ascii_lowercase(),
        position,
    })
}

impl FromStr for ElementPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
