use crate::{bitvec::BitVector, errors::EzhikError, linear_system::LinearSystem, mask};

/// Reconstructs `num_source_blocks` equal-length source blocks from seeded coded blocks.
///
/// Each coded block is the XOR of the source blocks selected by `mask::generate_mask(num_source_blocks, seed)`.
/// Coded blocks can be added in any order, duplicates and linearly dependent ones are harmless, they simply
/// don't move the decoder closer to completion.
#[derive(Clone, Debug)]
pub struct Decoder {
    block_byte_len: usize,
    num_received_blocks: usize,
    system: LinearSystem,
}

impl Decoder {
    /// Creates a new `Decoder`.
    ///
    /// # Arguments
    ///
    /// * `num_source_blocks` - Number of source blocks the original message was split into.
    /// * `block_byte_len` - Byte length of every source block, which is also the byte length of every coded block.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(Decoder)` if both arguments are non-zero.
    /// - `Err(EzhikError::InvalidNumSourceBlocks)` if `num_source_blocks` is zero.
    /// - `Err(EzhikError::InvalidBlockByteLen)` if `block_byte_len` is zero.
    pub fn new(num_source_blocks: usize, block_byte_len: usize) -> Result<Self, EzhikError> {
        if num_source_blocks == 0 {
            return Err(EzhikError::InvalidNumSourceBlocks(num_source_blocks));
        }
        if block_byte_len == 0 {
            return Err(EzhikError::InvalidBlockByteLen(block_byte_len));
        }

        Ok(Decoder {
            block_byte_len,
            num_received_blocks: 0,
            system: LinearSystem::new(num_source_blocks, block_byte_len * 8),
        })
    }

    pub fn num_source_blocks(&self) -> usize {
        self.system.num_unknowns()
    }

    pub fn block_byte_len(&self) -> usize {
        self.block_byte_len
    }

    /// Number of coded blocks accepted so far, useful or not.
    pub fn num_received_blocks(&self) -> usize {
        self.num_received_blocks
    }

    /// Number of coded blocks promoted to pivot rows so far. Useful coded blocks still waiting for a pivot column
    /// are not counted, so this is a lower bound on progress, and reaches `num_source_blocks` exactly when decoding
    /// becomes possible.
    pub fn rank(&self) -> usize {
        self.system.rank()
    }

    pub fn is_ready_to_decode(&self) -> bool {
        self.system.is_full_rank()
    }

    /// Feeds one coded block, along with the seed it was produced with.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed the encoder used to pick source blocks for this coded block.
    /// * `coded_block` - The coded block itself, `block_byte_len` bytes.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(true)` if enough coded blocks are collected to decode.
    /// - `Ok(false)` if more coded blocks are required.
    /// - `Err(EzhikError::InvalidCodedBlockLength)` if `coded_block` is not `block_byte_len` bytes long.
    pub fn add_coded_block(&mut self, seed: u64, coded_block: &[u8]) -> Result<bool, EzhikError> {
        if coded_block.len() != self.block_byte_len {
            return Err(EzhikError::InvalidCodedBlockLength(self.block_byte_len, coded_block.len()));
        }

        let coefficients = mask::generate_mask(self.num_source_blocks(), seed);
        let is_ready = self.system.add(coefficients, BitVector::from_bytes(coded_block))?;

        self.num_received_blocks += 1;
        log::debug!(
            "coded block with seed {} accepted, rank {} of {}",
            seed,
            self.rank(),
            self.num_source_blocks()
        );

        Ok(is_ready)
    }

    /// Recovers all source blocks. This consumes the `Decoder` as the decoding process is final.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(Vec<Vec<u8>>)` holding `num_source_blocks` blocks of `block_byte_len` bytes each, in source order.
    /// - `Err(EzhikError::NotYetReadyToDecode)` if not enough linearly independent coded blocks were added yet.
    pub fn decode(mut self) -> Result<Vec<Vec<u8>>, EzhikError> {
        if !self.is_ready_to_decode() {
            return Err(EzhikError::NotYetReadyToDecode(self.rank(), self.num_source_blocks()));
        }

        self.system.backtrack();
        Ok(self.system.solve().iter().map(|block| block.to_bytes()).collect())
    }

    /// Same as `decode`, but concatenates recovered source blocks back into the original message.
    pub fn decode_message(self) -> Result<Vec<u8>, EzhikError> {
        self.decode().map(|blocks| blocks.concat())
    }
}

#[cfg(test)]
mod tests {
    use crate::{decoder::Decoder, errors::EzhikError, mask::generate_mask};
    use rand::Rng;

    fn encode(source_blocks: &[Vec<u8>], seed: u64) -> Vec<u8> {
        let mask = generate_mask(source_blocks.len(), seed);
        let mut coded_block = vec![0u8; source_blocks[0].len()];

        mask.ones().for_each(|i| {
            coded_block.iter_mut().zip(source_blocks[i].iter()).for_each(|(dst, src)| *dst ^= *src);
        });
        coded_block
    }

    #[test]
    fn decoder_rejects_empty_configuration() {
        assert!(matches!(Decoder::new(0, 16), Err(EzhikError::InvalidNumSourceBlocks(0))));
        assert!(matches!(Decoder::new(16, 0), Err(EzhikError::InvalidBlockByteLen(0))));
    }

    #[test]
    fn decoder_rejects_coded_block_of_wrong_length() {
        let mut decoder = Decoder::new(4, 32).unwrap();

        assert_eq!(decoder.add_coded_block(1, &[0u8; 31]), Err(EzhikError::InvalidCodedBlockLength(32, 31)));
        assert_eq!(decoder.num_received_blocks(), 0);
        assert_eq!(decoder.rank(), 0);
    }

    #[test]
    fn decoding_before_full_rank_is_an_error() {
        let mut decoder = Decoder::new(8, 4).unwrap();
        let mut added = 0;

        // A single seed can never determine more than one unknown.
        for _ in 0..5 {
            decoder.add_coded_block(9, &[1, 2, 3, 4]).unwrap();
            added += 1;
        }

        assert_eq!(decoder.num_received_blocks(), added);
        assert!(decoder.rank() <= 1);
        assert!(matches!(decoder.decode(), Err(EzhikError::NotYetReadyToDecode(_, 8))));
    }

    #[test]
    fn decoder_recovers_source_blocks() {
        const NUM_SOURCE_BLOCKS: usize = 32;
        const BLOCK_BYTE_LEN: usize = 100;

        let mut rng = rand::rng();
        let source_blocks = (0..NUM_SOURCE_BLOCKS)
            .map(|_| (0..BLOCK_BYTE_LEN).map(|_| rng.random()).collect::<Vec<u8>>())
            .collect::<Vec<Vec<u8>>>();

        let mut decoder = Decoder::new(NUM_SOURCE_BLOCKS, BLOCK_BYTE_LEN).unwrap();
        let mut seed = rng.random::<u64>();

        while !decoder.add_coded_block(seed, &encode(&source_blocks, seed)).unwrap() {
            seed = seed.wrapping_add(1);
        }

        assert!(decoder.is_ready_to_decode());
        assert_eq!(decoder.rank(), NUM_SOURCE_BLOCKS);
        assert!(decoder.num_received_blocks() >= NUM_SOURCE_BLOCKS);

        assert_eq!(decoder.decode_message().unwrap(), source_blocks.concat());
    }

    #[test]
    fn cloned_decoder_decodes_independently() {
        const NUM_SOURCE_BLOCKS: usize = 8;
        const BLOCK_BYTE_LEN: usize = 16;

        let mut rng = rand::rng();
        let source_blocks = (0..NUM_SOURCE_BLOCKS)
            .map(|_| (0..BLOCK_BYTE_LEN).map(|_| rng.random()).collect::<Vec<u8>>())
            .collect::<Vec<Vec<u8>>>();

        let mut decoder = Decoder::new(NUM_SOURCE_BLOCKS, BLOCK_BYTE_LEN).unwrap();
        let mut seed = 0u64;

        while !decoder.add_coded_block(seed, &encode(&source_blocks, seed)).unwrap() {
            seed += 1;
        }

        let snapshot = decoder.clone();
        assert!(format!("{:?}", snapshot).starts_with("Decoder"));

        assert_eq!(decoder.decode().unwrap(), source_blocks);
        assert_eq!(snapshot.decode().unwrap(), source_blocks);
    }
}
