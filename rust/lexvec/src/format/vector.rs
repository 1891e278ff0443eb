//! Read access to an encoded lexeme vector.

use std::borrow::Cow;

use lexvec_common::{Result, error::Error, verify_data};

use crate::compare::compare_lexeme;

use super::{
    ENTRY_SIZE, HEADER_SIZE, LexemeEntry, MAX_NUM_POS, MAX_STRING_POS, POS_COUNT_SIZE, POS_SIZE,
    WordPos, encoded_size, short_align,
};

/// An immutable, sorted set of lexemes with optional position lists, held in
/// its encoded form.
///
/// A `LexVector` always owns a structurally valid buffer: it is produced
/// either by [`LexVector::decode`], which validates foreign bytes, or by one
/// of the producers in this crate (builder and set operations). All accessors
/// therefore index the buffer without further checks.
#[derive(Clone)]
pub struct LexVector {
    buf: Vec<u8>,
    count: usize,
}

impl LexVector {
    /// Creates a vector with no lexemes.
    pub fn new() -> LexVector {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        buf.extend_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        LexVector { buf, count: 0 }
    }

    /// Validates `bytes` and copies them into a new vector.
    pub fn decode(bytes: &[u8]) -> Result<LexVector> {
        LexVector::from_bytes(bytes.to_vec())
    }

    /// Validates `buf` and takes ownership of it.
    ///
    /// Fails with a malformed-format error if the header disagrees with the
    /// buffer length, if any entry addresses bytes outside the data area, if
    /// entry offsets go backwards, if a position count is out of range, or if
    /// the lexemes are not strictly ascending.
    pub fn from_bytes(buf: Vec<u8>) -> Result<LexVector> {
        let count = validate(&buf)?;
        Ok(LexVector { buf, count })
    }

    /// Wraps a buffer produced by [`VectorWriter`](super::VectorWriter).
    pub(crate) fn from_parts(buf: Vec<u8>, count: usize) -> LexVector {
        debug_assert_eq!(validate(&buf).ok(), Some(count));
        LexVector { buf, count }
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Total encoded size in bytes.
    pub fn encoded_size(&self) -> usize {
        self.buf.len()
    }

    /// Number of lexemes.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Size of the data area (lexeme bytes and position lists).
    pub fn data_len(&self) -> usize {
        self.buf.len() - self.data_start()
    }

    /// The whole data area.
    pub fn data(&self) -> &[u8] {
        &self.buf[self.data_start()..]
    }

    /// Descriptor of the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn entry(&self, index: usize) -> LexemeEntry {
        assert!(index < self.count, "entry index {index} out of range");
        LexemeEntry::from_bits(read_u32(&self.buf, HEADER_SIZE + index * ENTRY_SIZE))
    }

    /// Lexeme bytes of the entry at `index`.
    pub fn lexeme(&self, index: usize) -> &[u8] {
        let entry = self.entry(index);
        &self.data()[entry.offset..entry.lexeme_end()]
    }

    /// Position list of the entry at `index`, or `None` if the entry carries
    /// no positions.
    pub fn positions(&self, index: usize) -> Option<PositionSlice<'_>> {
        let entry = self.entry(index);
        let range = pos_range(self.data(), &entry)?;
        Some(PositionSlice {
            bytes: &self.data()[range],
        })
    }

    /// Mutable view of the packed position units of the entry at `index`.
    pub(crate) fn positions_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let entry = self.entry(index);
        let start = self.data_start();
        let range = pos_range(&self.buf[start..], &entry)?;
        Some(&mut self.buf[start + range.start..start + range.end])
    }

    /// Iterates over the decoded entries in stored (sorted) order.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            vector: self,
            next: 0,
        }
    }

    /// The lexemes in stored order.
    pub fn lexemes(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.count).map(move |index| self.lexeme(index))
    }

    /// Largest position value stored anywhere in the vector, or 0.
    pub fn max_position(&self) -> u16 {
        self.iter()
            .filter_map(|entry| entry.positions)
            .flat_map(|positions| positions.iter())
            .map(WordPos::pos)
            .max()
            .unwrap_or(0)
    }

    fn data_start(&self) -> usize {
        HEADER_SIZE + self.count * ENTRY_SIZE
    }
}

impl Default for LexVector {
    fn default() -> Self {
        LexVector::new()
    }
}

impl<'a> IntoIterator for &'a LexVector {
    type Item = EntryRef<'a>;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the vector in the conventional text form, e.g. `'cat':1A,4 'dog'`.
impl std::fmt::Display for LexVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str("'")?;
            for ch in entry.lexeme_str().chars() {
                if ch == '\'' || ch == '\\' {
                    write!(f, "{ch}")?;
                }
                write!(f, "{ch}")?;
            }
            f.write_str("'")?;
            if let Some(positions) = entry.positions {
                for (j, pos) in positions.iter().enumerate() {
                    f.write_str(if j == 0 { ":" } else { "," })?;
                    write!(f, "{}", pos.pos())?;
                    if pos.class() != 0 {
                        write!(f, "{}", pos.weight())?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LexVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LexVector({self})")
    }
}

/// Borrowed view of an entry's packed position list.
#[derive(Debug, Copy, Clone)]
pub struct PositionSlice<'a> {
    bytes: &'a [u8],
}

impl<'a> PositionSlice<'a> {
    pub fn len(self) -> usize {
        self.bytes.len() / POS_SIZE
    }

    pub fn is_empty(self) -> bool {
        self.bytes.is_empty()
    }

    /// Packed position at `index`.
    pub fn get(self, index: usize) -> WordPos {
        let at = index * POS_SIZE;
        WordPos::from_bits(u16::from_le_bytes([self.bytes[at], self.bytes[at + 1]]))
    }

    pub fn iter(self) -> impl Iterator<Item = WordPos> + 'a {
        self.bytes
            .chunks_exact(POS_SIZE)
            .map(|unit| WordPos::from_bits(u16::from_le_bytes([unit[0], unit[1]])))
    }

    pub fn last(self) -> Option<WordPos> {
        (!self.is_empty()).then(|| self.get(self.len() - 1))
    }

    pub fn to_vec(self) -> Vec<WordPos> {
        self.iter().collect()
    }
}

/// One decoded entry of a [`LexVector`].
#[derive(Debug, Copy, Clone)]
pub struct EntryRef<'a> {
    pub index: usize,
    pub lexeme: &'a [u8],
    pub positions: Option<PositionSlice<'a>>,
}

impl<'a> EntryRef<'a> {
    /// The lexeme as text; invalid UTF-8 is replaced.
    pub fn lexeme_str(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.lexeme)
    }

    pub fn has_positions(&self) -> bool {
        self.positions.is_some()
    }

    /// Occurrence count used by statistics collectors: the number of
    /// positions, or 1 for a lexeme stored without positions.
    pub fn position_count_or_one(&self) -> usize {
        self.positions.map_or(1, PositionSlice::len)
    }
}

/// Forward iterator over the entries of a [`LexVector`].
pub struct Entries<'a> {
    vector: &'a LexVector,
    next: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = EntryRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.vector.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(EntryRef {
            index,
            lexeme: self.vector.lexeme(index),
            positions: self.vector.positions(index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Entries<'_> {}

#[inline]
fn read_u32(buf: &[u8], at: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[at..at + 4]);
    u32::from_le_bytes(bytes)
}

#[inline]
fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

/// Byte range of the packed position units of `entry` within `data`.
fn pos_range(data: &[u8], entry: &LexemeEntry) -> Option<std::ops::Range<usize>> {
    if !entry.has_positions {
        return None;
    }
    let count_at = short_align(entry.lexeme_end());
    let npos = read_u16(data, count_at) as usize;
    let start = count_at + POS_COUNT_SIZE;
    Some(start..start + npos * POS_SIZE)
}

/// Checks the structural invariants of an encoded vector and returns its
/// entry count.
fn validate(buf: &[u8]) -> Result<usize> {
    verify_data!(header, buf.len() >= HEADER_SIZE);
    let size = read_u32(buf, 0) as usize;
    verify_data!(size, size == buf.len());

    let count = read_u32(buf, 4) as usize;
    let data_start = count
        .checked_mul(ENTRY_SIZE)
        .and_then(|len| len.checked_add(HEADER_SIZE));
    verify_data!(count, data_start.is_some_and(|start| start <= buf.len()));
    let data_start = encoded_size(count, 0);
    let data = &buf[data_start..];
    verify_data!(data_len, data.len() <= MAX_STRING_POS);

    let mut prev_end = 0;
    let mut prev_lexeme: Option<&[u8]> = None;
    for index in 0..count {
        let entry = LexemeEntry::from_bits(read_u32(buf, HEADER_SIZE + index * ENTRY_SIZE));
        if entry.offset < prev_end {
            return Err(Error::invalid_format(
                format!("entry {index}"),
                "lexeme offset precedes the end of the previous entry",
            ));
        }
        if entry.lexeme_end() > data.len() {
            return Err(Error::invalid_format(
                format!("entry {index}"),
                "lexeme extends past the data area",
            ));
        }
        let lexeme = &data[entry.offset..entry.lexeme_end()];
        if let Some(prev) = prev_lexeme {
            if compare_lexeme(prev, lexeme, false).is_ge() {
                return Err(Error::invalid_format(
                    format!("entry {index}"),
                    "lexemes are not strictly ascending",
                ));
            }
        }
        prev_lexeme = Some(lexeme);
        prev_end = entry.lexeme_end();

        if entry.has_positions {
            let count_at = short_align(entry.lexeme_end());
            if count_at + POS_COUNT_SIZE > data.len() {
                return Err(Error::invalid_format(
                    format!("entry {index}"),
                    "position count extends past the data area",
                ));
            }
            let npos = read_u16(data, count_at) as usize;
            if npos == 0 || npos > MAX_NUM_POS {
                return Err(Error::invalid_format(
                    format!("entry {index}"),
                    format!("position count {npos} is outside 1..={MAX_NUM_POS}"),
                ));
            }
            prev_end = count_at + POS_COUNT_SIZE + npos * POS_SIZE;
            if prev_end > data.len() {
                return Err(Error::invalid_format(
                    format!("entry {index}"),
                    "position list extends past the data area",
                ));
            }
            let mut prev_pos = 0;
            for unit in (count_at + POS_COUNT_SIZE..prev_end).step_by(POS_SIZE) {
                let pos = WordPos::from_bits(read_u16(data, unit)).pos();
                if pos <= prev_pos {
                    return Err(Error::invalid_format(
                        format!("entry {index}"),
                        "position information is misordered",
                    ));
                }
                prev_pos = pos;
            }
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{VectorBuilder, Weight};

    fn sample() -> LexVector {
        let mut builder = VectorBuilder::new();
        builder.add_position("cat", 1, Weight::A).unwrap();
        builder.add_position("cat", 4, Weight::D).unwrap();
        builder.add_lexeme("dog").unwrap();
        builder.add_position("ant", 2, Weight::C).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_empty_vector() {
        let vector = LexVector::new();
        assert!(vector.is_empty());
        assert_eq!(vector.encoded_size(), HEADER_SIZE);
        assert_eq!(vector.to_string(), "");
        let decoded = LexVector::decode(vector.as_bytes()).unwrap();
        assert_eq!(decoded.len(), 0);
        assert_eq!(vector.max_position(), 0);
    }

    #[test]
    fn test_accessors() {
        let vector = sample();
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.lexeme(0), b"ant");
        assert_eq!(vector.lexeme(1), b"cat");
        assert_eq!(vector.lexeme(2), b"dog");
        assert!(vector.positions(2).is_none());

        let cat = vector.positions(1).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.get(0), WordPos::new(1, Weight::A));
        assert_eq!(cat.last(), Some(WordPos::new(4, Weight::D)));
        assert_eq!(vector.max_position(), 4);
        assert_eq!(vector.to_string(), "'ant':2C 'cat':1A,4 'dog'");
    }

    #[test]
    fn test_entries_iterator() {
        let vector = sample();
        let entries: Vec<_> = vector.iter().collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(vector.iter().len(), 3);
        assert_eq!(entries[1].lexeme_str(), "cat");
        assert_eq!(entries[1].position_count_or_one(), 2);
        assert_eq!(entries[2].position_count_or_one(), 1);
        assert!(!entries[2].has_positions());
    }

    #[test]
    fn test_decode_round_trip() {
        let vector = sample();
        let decoded = LexVector::decode(vector.as_bytes()).unwrap();
        assert_eq!(decoded.as_bytes(), vector.as_bytes());
        assert_eq!(decoded, vector);
    }

    #[test]
    fn test_decode_rejects_bad_header() {
        assert!(LexVector::decode(&[1, 2, 3]).unwrap_err().is_malformed());

        let mut bytes = sample().into_bytes();
        bytes.push(0);
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());

        let mut bytes = LexVector::new().into_bytes();
        bytes[4] = 1;
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());
    }

    #[test]
    fn test_decode_rejects_unsorted_entries() {
        let mut bytes = sample().into_bytes();
        // swap the "ant" and "cat" entries
        let (first, second) = (HEADER_SIZE, HEADER_SIZE + ENTRY_SIZE);
        for i in 0..ENTRY_SIZE {
            bytes.swap(first + i, second + i);
        }
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());
    }

    #[test]
    fn test_decode_rejects_out_of_range_offset() {
        let mut bytes = sample().into_bytes();
        let last = HEADER_SIZE + 2 * ENTRY_SIZE;
        let entry = LexemeEntry::from_bits(read_u32(&bytes, last));
        let broken = LexemeEntry {
            offset: entry.offset + 100,
            ..entry
        };
        bytes[last..last + 4].copy_from_slice(&broken.to_bits().to_le_bytes());
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());
    }

    #[test]
    fn test_decode_rejects_misordered_positions() {
        let mut builder = VectorBuilder::new();
        builder.add_position("ab", 3, Weight::D).unwrap();
        builder.add_position("ab", 9, Weight::D).unwrap();
        builder.add_position("cd", 4, Weight::D).unwrap();
        let vector = builder.build().unwrap();
        assert_eq!(vector.to_string(), "'ab':3,9 'cd':4");

        // "ab", npos, then the two units of "ab"
        let units = HEADER_SIZE + 2 * ENTRY_SIZE + 2 + POS_COUNT_SIZE;
        let first = units..units + POS_SIZE;
        let second = units + POS_SIZE..units + 2 * POS_SIZE;
        assert_eq!(read_u16(vector.as_bytes(), first.start), 3);
        assert_eq!(read_u16(vector.as_bytes(), second.start), 9);

        let mut bytes = vector.as_bytes().to_vec();
        bytes[first.clone()].copy_from_slice(&9u16.to_le_bytes());
        bytes[second.clone()].copy_from_slice(&3u16.to_le_bytes());
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());

        let mut bytes = vector.as_bytes().to_vec();
        bytes[second.clone()].copy_from_slice(&3u16.to_le_bytes());
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());

        let mut bytes = vector.as_bytes().to_vec();
        bytes[first].copy_from_slice(&0u16.to_le_bytes());
        assert!(LexVector::decode(&bytes).unwrap_err().is_malformed());

        let mut bytes = vector.into_bytes();
        bytes[second].copy_from_slice(&(WordPos::new(9, Weight::A).to_bits()).to_le_bytes());
        let decoded = LexVector::decode(&bytes).unwrap();
        assert_eq!(decoded.to_string(), "'ab':3,9A 'cd':4");
    }

    #[test]
    fn test_display_escapes_quotes() {
        let mut builder = VectorBuilder::new();
        builder.add_lexeme("it's").unwrap();
        assert_eq!(builder.build().unwrap().to_string(), "'it''s'");
    }
}
