//! Synthetic document generation.

/// One occurrence produced by a text parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    /// 1-based position within the document.
    pub position: u32,
    /// Weight class, 0 (D) to 3 (A).
    pub weight: u8,
}

/// Shape of generated documents.
#[derive(Debug, Clone)]
pub struct DocumentSpec {
    /// Number of distinct words to draw from.
    pub vocabulary_size: usize,
    /// Inclusive range of document lengths, in tokens.
    pub min_tokens: usize,
    pub max_tokens: usize,
    /// Probability that a token carries a weight other than D.
    pub weighted_ratio: f64,
}

impl Default for DocumentSpec {
    fn default() -> Self {
        Self {
            vocabulary_size: 64,
            min_tokens: 0,
            max_tokens: 40,
            weighted_ratio: 0.3,
        }
    }
}

/// Deterministic generator of vocabularies and documents.
pub struct DocumentGenerator {
    rng: fastrand::Rng,
    spec: DocumentSpec,
    vocabulary: Vec<String>,
}

impl DocumentGenerator {
    pub fn new(seed: u64, spec: DocumentSpec) -> DocumentGenerator {
        let mut rng = fastrand::Rng::with_seed(seed);
        let vocabulary = generate_vocabulary(&mut rng, spec.vocabulary_size);
        DocumentGenerator {
            rng,
            spec,
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Picks a random vocabulary word.
    pub fn word(&mut self) -> String {
        self.vocabulary[self.rng.usize(..self.vocabulary.len())].clone()
    }

    /// Picks a random prefix (at least one byte) of a vocabulary word.
    pub fn prefix(&mut self) -> String {
        let word = self.word();
        let len = self.rng.usize(1..=word.len());
        word[..len].to_string()
    }

    /// Generates one document with consecutive positions starting at 1.
    pub fn document(&mut self) -> Vec<Token> {
        let len = self.rng.usize(self.spec.min_tokens..=self.spec.max_tokens);
        (1..=len as u32)
            .map(|position| {
                let weight = if self.rng.f64() < self.spec.weighted_ratio {
                    self.rng.u8(1..=3)
                } else {
                    0
                };
                Token {
                    lexeme: self.word(),
                    position,
                    weight,
                }
            })
            .collect()
    }

    /// Random weight mask with at least one class set.
    pub fn weight_mask_bits(&mut self) -> u8 {
        self.rng.u8(1..16)
    }

    pub fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }
}

/// Generates `size` distinct lowercase ASCII words. Roughly a third of the
/// words extend an earlier word, so prefix lookups find several matches.
pub fn generate_vocabulary(rng: &mut fastrand::Rng, size: usize) -> Vec<String> {
    let mut words: Vec<String> = Vec::with_capacity(size);
    while words.len() < size {
        let word = if !words.is_empty() && rng.u8(0..3) == 0 {
            let base = &words[rng.usize(..words.len())];
            format!("{base}{}", random_word(rng, 1, 4))
        } else {
            random_word(rng, 1, 8)
        };
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words
}

fn random_word(rng: &mut fastrand::Rng, min_len: usize, max_len: usize) -> String {
    let len = rng.usize(min_len..=max_len);
    (0..len).map(|_| rng.lowercase()).collect()
}
