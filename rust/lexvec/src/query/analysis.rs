use super::QueryNode;

enum Step<'a> {
    Visit(&'a QueryNode),
    /// Combine the two most recent results; `true` for AND/PHRASE, `false` for OR.
    Combine(bool),
}

impl QueryNode {
    /// Returns `true` if no document can match this query without containing
    /// at least one of its operands.
    ///
    /// An index scan only needs to visit documents containing query lexemes
    /// when this holds: `x & !y` requires `x`, while `x | !y` also matches
    /// documents containing neither. `Not` never requires a match, however
    /// deeply it is nested.
    ///
    /// The tree is walked with an explicit stack, so arbitrarily deep queries
    /// are analyzed without recursion.
    pub fn requires_match(&self) -> bool {
        let mut steps = vec![Step::Visit(self)];
        let mut results: Vec<bool> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(QueryNode::Value(_)) => results.push(true),
                Step::Visit(QueryNode::Not { .. }) => results.push(false),
                Step::Visit(QueryNode::And { left, right })
                | Step::Visit(QueryNode::Phrase { left, right, .. }) => {
                    steps.push(Step::Combine(true));
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                }
                Step::Visit(QueryNode::Or { left, right }) => {
                    steps.push(Step::Combine(false));
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                }
                Step::Combine(either) => {
                    let right = results.pop().unwrap_or(false);
                    let left = results.pop().unwrap_or(false);
                    results.push(if either {
                        left || right
                    } else {
                        left && right
                    });
                }
            }
        }
        results.pop().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> QueryNode {
        QueryNode::value("x")
    }

    fn y() -> QueryNode {
        QueryNode::value("y")
    }

    #[test]
    fn test_requires_match() {
        assert!(x().requires_match());
        assert!(!QueryNode::not(x()).requires_match());
        assert!(!QueryNode::or(x(), QueryNode::not(y())).requires_match());
        assert!(QueryNode::and(x(), QueryNode::not(y())).requires_match());
        assert!(QueryNode::or(x(), y()).requires_match());
        assert!(QueryNode::phrase(QueryNode::not(x()), y(), 1).requires_match());
        assert!(!QueryNode::not(QueryNode::not(x())).requires_match());
        assert!(
            !QueryNode::and(QueryNode::not(x()), QueryNode::or(y(), QueryNode::not(x())))
                .requires_match()
        );
    }

    #[test]
    fn test_requires_match_deep_tree() {
        let mut query = x();
        for _ in 0..2_000 {
            query = QueryNode::and(QueryNode::not(y()), query);
        }
        assert!(query.requires_match());
    }
}
