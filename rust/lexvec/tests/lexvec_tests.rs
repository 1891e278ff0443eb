use lexvec::{
    LexVector, MatchOptions, QueryMatcher, QueryNode, QueryOperand, VectorBuilder, Weight,
    WeightMask, find, matches,
};
use lexvec_testkit::data_gen::{DocumentGenerator, DocumentSpec, Token};

fn build(tokens: &[Token]) -> LexVector {
    let mut builder = VectorBuilder::new();
    for token in tokens {
        builder
            .add_position(
                &token.lexeme,
                token.position,
                Weight::from_class(token.weight).unwrap(),
            )
            .unwrap();
    }
    builder.build().unwrap()
}

fn corpus(seed: u64, count: usize) -> (DocumentGenerator, Vec<LexVector>) {
    let spec = DocumentSpec {
        vocabulary_size: 40,
        min_tokens: 1,
        max_tokens: 30,
        weighted_ratio: 0.25,
    };
    let mut generator = DocumentGenerator::new(seed, spec);
    let documents = (0..count).map(|_| build(&generator.document())).collect();
    (generator, documents)
}

fn operands(query: &QueryNode, out: &mut Vec<QueryOperand>) {
    match query {
        QueryNode::Value(operand) => out.push(operand.clone()),
        QueryNode::Not { child } => operands(child, out),
        QueryNode::And { left, right }
        | QueryNode::Or { left, right }
        | QueryNode::Phrase { left, right, .. } => {
            operands(left, out);
            operands(right, out);
        }
    }
}

fn random_query(generator: &mut DocumentGenerator, depth: usize) -> QueryNode {
    if depth == 0 || generator.rng().u8(0..4) == 0 {
        return QueryNode::value(generator.word());
    }
    match generator.rng().u8(0..4) {
        0 => QueryNode::not(random_query(generator, depth - 1)),
        1 => QueryNode::and(
            random_query(generator, depth - 1),
            random_query(generator, depth - 1),
        ),
        2 => QueryNode::or(
            random_query(generator, depth - 1),
            random_query(generator, depth - 1),
        ),
        _ => QueryNode::phrase(
            QueryNode::value(generator.word()),
            QueryNode::prefix(generator.prefix()),
            generator.rng().u16(1..3),
        ),
    }
}

#[test]
fn test_requires_match_holds_over_corpus() {
    let (mut generator, documents) = corpus(1789, 100);
    for _ in 0..200 {
        let query = random_query(&mut generator, 4);
        if !query.requires_match() {
            continue;
        }
        let mut terms = Vec::new();
        operands(&query, &mut terms);
        for document in &documents {
            if !matches(document, &query).unwrap() {
                continue;
            }
            // a document matching a query that requires a match must
            // contain one of its operands
            let contains_operand = terms.iter().any(|term| {
                if term.prefix {
                    document
                        .lexemes()
                        .any(|lexeme| lexeme.starts_with(term.lexeme.as_bytes()))
                } else {
                    find(document, term.lexeme.as_bytes()).is_some()
                }
            });
            assert!(contains_operand, "{query:?} matched {document}");
        }
    }
}

#[test]
fn test_serialized_documents_search_the_same() {
    let (mut generator, documents) = corpus(31337, 50);
    let queries: Vec<QueryNode> = (0..50).map(|_| random_query(&mut generator, 3)).collect();
    for document in &documents {
        let restored = LexVector::decode(document.as_bytes()).unwrap();
        assert_eq!(&restored, document);
        for query in &queries {
            assert_eq!(
                matches(&restored, query).unwrap(),
                matches(document, query).unwrap()
            );
        }
    }
}

#[test]
fn test_concatenated_documents_match_across_boundary() {
    let mut first = VectorBuilder::new();
    first.add_position("quick", 1, Weight::A).unwrap();
    first.add_position("brown", 2, Weight::D).unwrap();
    let first = first.build().unwrap();

    let mut second = VectorBuilder::new();
    second.add_position("fox", 1, Weight::D).unwrap();
    second.add_position("brown", 3, Weight::D).unwrap();
    let second = second.build().unwrap();

    let joined = first.concat(&second).unwrap();
    assert_eq!(joined.to_string(), "'brown':2,5 'fox':3 'quick':1A");

    let brown_fox = QueryNode::phrase(QueryNode::value("brown"), QueryNode::value("fox"), 1);
    assert!(matches(&joined, &brown_fox).unwrap());
    assert!(!matches(&first, &brown_fox).unwrap());

    let title_only = joined.filter(WeightMask::A).unwrap();
    assert_eq!(title_only.to_string(), "'quick':1A");

    let without_brown = joined.delete(["brown", "owl"]).unwrap();
    assert_eq!(without_brown.to_string(), "'fox':3 'quick':1A");
    assert!(!matches(&without_brown, &brown_fox).unwrap());

    let stripped = joined.strip().unwrap();
    assert_eq!(stripped.to_string(), "'brown' 'fox' 'quick'");
    assert!(matches(&stripped, &brown_fox).unwrap());
    assert!(stripped < joined);
}

#[test]
fn test_ranking_mode_ignores_negation() {
    let (mut generator, documents) = corpus(99, 30);
    let ranking = MatchOptions::default().with_calc_not(false);
    for document in &documents {
        let query = QueryNode::and(
            QueryNode::value(generator.word()),
            QueryNode::not(QueryNode::value(generator.word())),
        );
        let QueryNode::And { left, .. } = &query else {
            unreachable!()
        };
        let matcher = QueryMatcher::new(document, ranking.clone()).unwrap();
        assert_eq!(
            matcher.matches(&query).unwrap(),
            matches(document, left).unwrap()
        );
    }
}

#[test]
fn test_malformed_input_is_rejected() {
    let vector = VectorBuilder::from_lexemes(["alpha", "beta", "gamma"]).unwrap();
    let bytes = vector.as_bytes();
    for len in 0..bytes.len() {
        assert!(LexVector::decode(&bytes[..len]).is_err());
    }
    // "alpha" -> "zlpha" breaks the ascending order
    let mut corrupted = bytes.to_vec();
    corrupted[8 + 3 * 4] = b'z';
    assert!(LexVector::decode(&corrupted).unwrap_err().is_malformed());

    corrupted[8 + 3 * 4] = b'a';
    assert_eq!(LexVector::decode(&corrupted).unwrap(), vector);
}
