use lexvec_common::{Result, error::Error};

use super::{
    ENTRY_SIZE, HEADER_SIZE, LexVector, LexemeEntry, MAX_LEXEME_LEN, MAX_NUM_POS, MAX_STRING_POS,
    POS_COUNT_SIZE, POS_SIZE, WordPos, encoded_size, short_align,
};

/// Append-only encoder shared by every operation that produces a vector.
///
/// Callers reserve a conservative upper bound up front, push entries in
/// ascending lexeme order and call [`finish`](Self::finish), which checks the
/// addressable data limit and emits a buffer of the exact encoded size.
pub(crate) struct VectorWriter {
    entries: Vec<LexemeEntry>,
    data: Vec<u8>,
}

impl VectorWriter {
    pub fn with_capacity(entry_count: usize, data_len: usize) -> VectorWriter {
        VectorWriter {
            entries: Vec::with_capacity(entry_count),
            data: Vec::with_capacity(data_len),
        }
    }

    /// Upper bound of the data area needed for `lexeme_len` bytes followed by
    /// `npos` positions.
    pub fn data_bound(lexeme_len: usize, npos: usize) -> usize {
        if npos == 0 {
            lexeme_len
        } else {
            lexeme_len + 1 + POS_COUNT_SIZE + npos * POS_SIZE
        }
    }

    /// Appends a lexeme without positions.
    pub fn push_lexeme(&mut self, lexeme: &[u8]) -> Result<()> {
        self.push_entry(lexeme, std::iter::empty())
    }

    /// Appends a lexeme followed by `positions`. An empty position sequence
    /// stores the lexeme without positions.
    pub fn push_entry(
        &mut self,
        lexeme: &[u8],
        positions: impl IntoIterator<Item = WordPos>,
    ) -> Result<()> {
        if lexeme.len() > MAX_LEXEME_LEN {
            return Err(Error::invalid_arg(
                "lexeme",
                format!(
                    "word is too long ({} bytes, max {MAX_LEXEME_LEN} bytes)",
                    lexeme.len()
                ),
            ));
        }
        debug_assert!(
            self.entries.last().is_none_or(|prev| {
                let prev = &self.data[prev.offset..prev.lexeme_end()];
                crate::compare::compare_lexeme(prev, lexeme, false).is_lt()
            }),
            "entries must be pushed in ascending order"
        );

        let offset = self.data.len();
        self.data.extend_from_slice(lexeme);

        let count_at = short_align(self.data.len());
        let mut written = 0usize;
        for pos in positions {
            if written == 0 {
                self.data.resize(count_at + POS_COUNT_SIZE, 0);
            }
            self.data.extend_from_slice(&pos.to_bits().to_le_bytes());
            written += 1;
        }
        debug_assert!(written <= MAX_NUM_POS);
        if written > 0 {
            self.data[count_at..count_at + POS_COUNT_SIZE]
                .copy_from_slice(&(written as u16).to_le_bytes());
        }

        self.entries.push(LexemeEntry {
            has_positions: written > 0,
            len: lexeme.len(),
            offset,
        });
        Ok(())
    }

    /// Encodes the collected entries into a vector of the exact size.
    ///
    /// Fails without producing output if the data area outgrew the offsets
    /// addressable by the entry format.
    pub fn finish(self) -> Result<LexVector> {
        if self.data.len() > MAX_STRING_POS {
            log::debug!(
                "rejecting lexeme vector with {} data bytes over {} entries",
                self.data.len(),
                self.entries.len()
            );
            return Err(Error::resource_limit(
                "lexeme vector data",
                self.data.len(),
                MAX_STRING_POS,
            ));
        }

        let count = self.entries.len();
        let size = encoded_size(count, self.data.len());
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(&(size as u32).to_le_bytes());
        buf.extend_from_slice(&(count as u32).to_le_bytes());
        for entry in &self.entries {
            buf.extend_from_slice(&entry.to_bits().to_le_bytes());
        }
        debug_assert_eq!(buf.len(), HEADER_SIZE + count * ENTRY_SIZE);
        buf.extend_from_slice(&self.data);
        Ok(LexVector::from_parts(buf, count))
    }
}
