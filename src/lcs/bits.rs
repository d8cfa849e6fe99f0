// Dense bit storage backing the equality matrix.
//
// One bit per cell, packed into 64-bit words. Only get/set by linear index
// are needed by the engine; the count is used for stats.

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-size boolean vector with O(1) get/set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// Create a vector of `len` bits, all cleared.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "bit {index} out of range {}", self.len);
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len, "bit {index} out of range {}", self.len);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
