use lexvec_common::{Result, error::Error};
use serde::{Deserialize, Serialize};

/// Default nesting limit for query evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration of a query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Deepest query node the evaluator descends into before failing.
    pub max_depth: usize,
    /// When `false`, every `Not` node evaluates to `true`. Ranking callers
    /// use this so that negated terms never exclude a document.
    pub calc_not: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            calc_not: true,
        }
    }
}

impl MatchOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_calc_not(mut self, calc_not: bool) -> Self {
        self.calc_not = calc_not;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::invalid_arg(
                "max_depth",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
