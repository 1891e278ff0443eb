//! Evaluation of query trees against a vector.

use lexvec_common::{Result, error::Error};

use crate::format::LexVector;
use crate::search::{MatchPositions, OperandMatch, match_operand};

use super::{MatchOptions, QueryNode};

/// Evaluates query trees against one vector.
///
/// The matcher only reads the vector, so any number of matchers may share
/// it. Every recursive step is counted against
/// [`MatchOptions::max_depth`]; exceeding it fails with a recursion-limit
/// error instead of exhausting the stack.
pub struct QueryMatcher<'v> {
    vector: &'v LexVector,
    options: MatchOptions,
}

impl<'v> QueryMatcher<'v> {
    pub fn new(vector: &'v LexVector, options: MatchOptions) -> Result<QueryMatcher<'v>> {
        options.validate()?;
        Ok(QueryMatcher { vector, options })
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Returns `true` if the vector satisfies `query`. An empty vector never
    /// matches.
    pub fn matches(&self, query: &QueryNode) -> Result<bool> {
        if self.vector.is_empty() {
            return Ok(false);
        }
        self.evaluate(query)
    }

    /// Evaluates `query` as a boolean expression.
    pub fn evaluate(&self, query: &QueryNode) -> Result<bool> {
        log::trace!(
            "evaluating {} query over {} lexemes",
            query.kind_name(),
            self.vector.len()
        );
        self.execute(query, 1)
    }

    /// Evaluates a phrase (or value) node and returns the positions of its
    /// rightmost operand that satisfy every distance constraint.
    pub fn phrase_positions(&self, query: &QueryNode) -> Result<OperandMatch<'v>> {
        self.execute_phrase(query, true, 1)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(Error::recursion_limit(depth, self.options.max_depth));
        }
        Ok(())
    }

    fn execute(&self, node: &QueryNode, depth: usize) -> Result<bool> {
        self.check_depth(depth)?;
        match node {
            QueryNode::Value(operand) => Ok(match_operand(self.vector, operand, false).matched),
            QueryNode::Not { child } => {
                if self.options.calc_not {
                    Ok(!self.execute(child, depth + 1)?)
                } else {
                    Ok(true)
                }
            }
            QueryNode::And { left, right } => {
                Ok(self.execute(left, depth + 1)? && self.execute(right, depth + 1)?)
            }
            QueryNode::Or { left, right } => {
                Ok(self.execute(left, depth + 1)? || self.execute(right, depth + 1)?)
            }
            QueryNode::Phrase { .. } => Ok(self.execute_phrase(node, false, depth)?.matched),
        }
    }

    /// Evaluates a phrase subtree.
    ///
    /// If either side of a phrase matched without position information the
    /// phrase is treated as a plain AND and matches with no positions.
    fn execute_phrase(
        &self,
        node: &QueryNode,
        need_positions: bool,
        depth: usize,
    ) -> Result<OperandMatch<'v>> {
        self.check_depth(depth)?;
        let (left, right, distance) = match node {
            QueryNode::Value(operand) => {
                return Ok(match_operand(self.vector, operand, need_positions));
            }
            QueryNode::Phrase {
                left,
                right,
                distance,
            } => (left, right, *distance),
            QueryNode::Not { .. } | QueryNode::And { .. } | QueryNode::Or { .. } => {
                return Err(Error::invalid_operation(format!(
                    "{} operator below a phrase operator",
                    node.kind_name()
                )));
            }
        };

        let left = self.execute_phrase(left, true, depth + 1)?;
        if !left.matched {
            return Ok(OperandMatch::no_match());
        }
        let right = self.execute_phrase(right, true, depth + 1)?;
        if !right.matched {
            return Ok(OperandMatch::no_match());
        }

        if left.positions.is_empty() || right.positions.is_empty() {
            return Ok(OperandMatch::matched());
        }

        let positions = match_within_distance(
            &left.positions,
            &right.positions,
            distance,
            !need_positions,
        );
        Ok(OperandMatch {
            matched: !positions.is_empty(),
            positions: MatchPositions::Owned(positions),
        })
    }
}

/// Proximity matcher over two ascending position lists.
///
/// Returns every right-hand position `r` for which some left-hand position
/// `l <= r` satisfies `r - l <= distance`. Both cursors only move forward,
/// so the scan is linear in the combined length. With `first_only` the scan
/// stops after the first hit.
pub fn match_within_distance(
    left: &MatchPositions<'_>,
    right: &MatchPositions<'_>,
    distance: u16,
    first_only: bool,
) -> Vec<u16> {
    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut l = 0;
    for r in 0..right.len() {
        let rpos = right.get(r);
        while l < left.len() {
            let lpos = left.get(l);
            if lpos > rpos {
                break;
            }
            if rpos - lpos <= distance {
                result.push(rpos);
                break;
            }
            l += 1;
        }
        if first_only && !result.is_empty() {
            break;
        }
    }
    result
}
