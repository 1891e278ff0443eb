use serde::{Deserialize, Serialize};

use crate::format::WeightMask;

/// A lexeme to look up, optionally as a prefix and restricted to a set of
/// weight classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOperand {
    pub lexeme: String,
    #[serde(default)]
    pub prefix: bool,
    /// Accepted weight classes; empty accepts every class.
    #[serde(default, skip_serializing_if = "WeightMask::is_empty")]
    pub weights: WeightMask,
}

impl QueryOperand {
    pub fn new(lexeme: impl Into<String>) -> QueryOperand {
        QueryOperand {
            lexeme: lexeme.into(),
            prefix: false,
            weights: WeightMask::empty(),
        }
    }

    pub fn with_prefix(mut self) -> Self {
        self.prefix = true;
        self
    }

    pub fn with_weights(mut self, weights: WeightMask) -> Self {
        self.weights = weights;
        self
    }
}

/// A parsed search expression.
///
/// `Phrase` requires its right side to occur at most `distance` positions
/// after its left side. Below a `Phrase` node only `Value` and `Phrase`
/// nodes are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum QueryNode {
    Value(QueryOperand),
    Not {
        child: Box<QueryNode>,
    },
    And {
        left: Box<QueryNode>,
        right: Box<QueryNode>,
    },
    Or {
        left: Box<QueryNode>,
        right: Box<QueryNode>,
    },
    Phrase {
        left: Box<QueryNode>,
        right: Box<QueryNode>,
        distance: u16,
    },
}

impl QueryNode {
    pub fn value(lexeme: impl Into<String>) -> QueryNode {
        QueryNode::Value(QueryOperand::new(lexeme))
    }

    pub fn prefix(lexeme: impl Into<String>) -> QueryNode {
        QueryNode::Value(QueryOperand::new(lexeme).with_prefix())
    }

    pub fn operand(operand: QueryOperand) -> QueryNode {
        QueryNode::Value(operand)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: QueryNode) -> QueryNode {
        QueryNode::Not {
            child: Box::new(child),
        }
    }

    pub fn and(left: QueryNode, right: QueryNode) -> QueryNode {
        QueryNode::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: QueryNode, right: QueryNode) -> QueryNode {
        QueryNode::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `left <distance> right`; a plain phrase `a <-> b` has distance 1.
    pub fn phrase(left: QueryNode, right: QueryNode, distance: u16) -> QueryNode {
        QueryNode::Phrase {
            left: Box::new(left),
            right: Box::new(right),
            distance,
        }
    }

    /// Operator label used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            QueryNode::Value(_) => "value",
            QueryNode::Not { .. } => "not",
            QueryNode::And { .. } => "and",
            QueryNode::Or { .. } => "or",
            QueryNode::Phrase { .. } => "phrase",
        }
    }
}
