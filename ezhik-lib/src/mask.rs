use crate::bitvec::BitVector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Expands a seed into the coefficient vector of a coded block, i.e. which of the `len` source blocks
/// got XOR-ed together to produce it.
///
/// Encoder and decoder agree on the mask as long as they agree on `(len, seed)`: a fresh ChaCha8 stream
/// is keyed by `seed` alone and one uniform bit is drawn per index, in increasing index order.
///
/// # Arguments
///
/// * `len` - Number of source blocks, which is the length of the returned mask.
/// * `seed` - Seed transmitted alongside the coded block.
///
/// # Returns
///
/// A `BitVector` of `len` bits, where bit `i` is set iff source block `i` takes part in the coded block.
pub fn generate_mask(len: usize, seed: u64) -> BitVector {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut mask = BitVector::new(len);

    (0..len).for_each(|idx| mask.set_bit(idx, rng.random::<bool>()));
    mask
}

#[cfg(test)]
mod tests {
    use crate::mask::generate_mask;
    use rand::Rng;

    #[test]
    fn same_seed_gives_same_mask() {
        let mut rng = rand::rng();

        for len in [1usize, 2, 64, 128, 1000] {
            let seed = rng.random::<u64>();
            assert_eq!(generate_mask(len, seed), generate_mask(len, seed));
        }
    }

    #[test]
    fn mask_bits_are_pinned_for_known_seeds() {
        // Coded blocks produced by earlier builds must keep decoding, so the seed to mask expansion can't drift.
        assert_eq!(generate_mask(64, 0).to_bytes(), vec![0x77, 0xee, 0xe6, 0xe6, 0xf4, 0xef, 0xfe, 0x0f]);
        assert_eq!(
            generate_mask(100, 0xdead_beef).to_bytes(),
            vec![0x5a, 0x36, 0x5d, 0x79, 0x63, 0x1d, 0xf6, 0x21, 0xd7, 0xed, 0xc4, 0x61, 0x0a]
        );
    }

    #[test]
    fn mask_has_requested_length() {
        for len in [0usize, 1, 63, 64, 65, 511] {
            assert_eq!(generate_mask(len, 42).len(), len);
        }
    }

    #[test]
    fn shorter_mask_is_prefix_of_longer_one() {
        let short = generate_mask(100, 7);
        let long = generate_mask(300, 7);

        assert!((0..100).all(|i| short.get(i).unwrap() == long.get(i).unwrap()));
    }

    #[test]
    fn different_seeds_give_different_masks() {
        let masks = (0u64..32).map(|seed| generate_mask(256, seed)).collect::<Vec<_>>();

        for i in 0..masks.len() {
            for j in (i + 1)..masks.len() {
                assert_ne!(masks[i], masks[j]);
            }
        }
    }

    #[test]
    fn mask_bits_look_uniform() {
        const LEN: usize = 1 << 16;
        let ones = generate_mask(LEN, 0xdead_beef).count_ones();

        // Binomial(65536, 0.5) has a standard deviation of 128, this is a > 10 sigma band.
        assert!(ones.abs_diff(LEN / 2) < 1500, "{} ones in {} bits", ones, LEN);
    }
}
