use crate::errors::EzhikError;

/// Fixed-length vector over GF(2), packed into 64-bit words.
///
/// Bits beyond `len` in the last word are always kept zero, so word-wise comparison, popcount and XOR
/// never observe garbage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    const BITS_PER_WORD: usize = u64::BITS as usize;

    /// Creates a new all-zero `BitVector` holding `len` bits.
    ///
    /// # Arguments
    ///
    /// * `len` - Number of bits, fixed for the lifetime of the vector.
    ///
    /// # Returns
    ///
    /// A `BitVector` with every bit set to 0.
    pub fn new(len: usize) -> Self {
        BitVector {
            words: vec![0u64; len.div_ceil(Self::BITS_PER_WORD)],
            len,
        }
    }

    /// Interprets a byte slice as a `BitVector` of `8 * bytes.len()` bits.
    /// Bit `i` of the vector is bit `i % 8` (least significant first) of byte `i / 8`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let words = bytes
            .chunks(Self::BITS_PER_WORD / 8)
            .map(|chunk| {
                let mut word = [0u8; 8];
                word[..chunk.len()].copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
            .collect::<Vec<u64>>();

        BitVector { words, len: bytes.len() * 8 }
    }

    /// Serializes the bits back into bytes, using the same layout as `from_bytes`.
    /// When `len` is not a multiple of 8, the last byte is zero padded in its high bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.words.iter().flat_map(|word| word.to_le_bytes()).collect::<Vec<u8>>();
        bytes.truncate(self.len.div_ceil(8));
        bytes
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads a single bit.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(bool)` holding the bit at `index`.
    /// - `Err(EzhikError::IndexOutOfRange)` if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<bool, EzhikError> {
        if index >= self.len {
            return Err(EzhikError::IndexOutOfRange(index, self.len));
        }

        Ok(self.bit(index))
    }

    /// Writes a single bit.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(())` once the bit at `index` is set to `value`.
    /// - `Err(EzhikError::IndexOutOfRange)` if `index >= self.len()`, leaving the vector untouched.
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), EzhikError> {
        if index >= self.len {
            return Err(EzhikError::IndexOutOfRange(index, self.len));
        }

        self.set_bit(index, value);
        Ok(())
    }

    /// Adds `other` to `self` over GF(2), i.e. XORs every bit of `other` into `self`, in place.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(())` if both vectors have the same length.
    /// - `Err(EzhikError::LengthMismatch)` carrying `(self.len(), other.len())` otherwise, leaving `self` untouched.
    pub fn xor_assign(&mut self, other: &BitVector) -> Result<(), EzhikError> {
        if self.len != other.len {
            return Err(EzhikError::LengthMismatch(self.len, other.len));
        }

        self.xor_words(other);
        Ok(())
    }

    /// Number of bits set to 1.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Iterates over indices of set bits, in increasing order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut rest = word;

            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }

                let offset = rest.trailing_zeros() as usize;
                rest &= rest - 1;

                Some(word_idx * Self::BITS_PER_WORD + offset)
            })
        })
    }

    /// Unchecked single-bit test, for callers which already validated `index < self.len()`.
    #[inline]
    pub(crate) fn bit(&self, index: usize) -> bool {
        (self.words[index / Self::BITS_PER_WORD] >> (index % Self::BITS_PER_WORD)) & 1 == 1
    }

    #[inline]
    pub(crate) fn set_bit(&mut self, index: usize, value: bool) {
        let mask = 1u64 << (index % Self::BITS_PER_WORD);
        let word = &mut self.words[index / Self::BITS_PER_WORD];

        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Word-wise XOR without the length check, for callers which already validated equal lengths.
    #[inline]
    pub(crate) fn xor_words(&mut self, other: &BitVector) {
        debug_assert_eq!(self.len, other.len);
        self.words.iter_mut().zip(other.words.iter()).for_each(|(dst, src)| *dst ^= *src);
    }
}
