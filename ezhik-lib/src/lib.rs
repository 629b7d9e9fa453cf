//! # ezhik-lib: Incremental Decoder for Seeded Random-Linear Erasure Codes
//!
//! A message is split into `n` equal-length source blocks. Each coded block is the XOR of a pseudo-randomly
//! selected subset of source blocks, where the subset is fully determined by a small integer seed sent along
//! with the coded block. Given enough `(seed, coded block)` pairs, `ezhik-lib` recovers every source block,
//! by running Gaussian elimination over GF(2), one coded block at a time.
//!
//! ## How to Use
//!
//! ### 1. Using the byte-level `Decoder`
//!
//! ```rust
//! use ezhik_lib::{Decoder, generate_mask};
//! use rand::Rng;
//!
//! let mut rng = rand::rng();
//! let source_blocks: Vec<Vec<u8>> = (0..16).map(|_| (0..64).map(|_| rng.random()).collect()).collect();
//!
//! // What an encoder does, for a given seed.
//! let encode = |seed: u64| {
//!     let mut coded = vec![0u8; 64];
//!     for i in generate_mask(16, seed).ones() {
//!         coded.iter_mut().zip(&source_blocks[i]).for_each(|(c, s)| *c ^= *s);
//!     }
//!     coded
//! };
//!
//! let mut decoder = Decoder::new(16, 64).expect("Failed to create decoder");
//! let mut seed = 0u64;
//! while !decoder.add_coded_block(seed, &encode(seed)).expect("Coded block has wrong length") {
//!     seed += 1;
//! }
//!
//! let recovered = decoder.decode().expect("Decoder must be ready by now");
//! assert_eq!(recovered, source_blocks);
//! ```
//!
//! ### 2. Driving the `LinearSystem` directly
//!
//! ```rust
//! use ezhik_lib::{BitVector, LinearSystem};
//!
//! // Two unknown blocks of 8 bits each: x[0] = 0b01, x[1] = 0b10.
//! let mut system = LinearSystem::new(2, 8);
//!
//! let mut a = BitVector::new(2);
//! a.set(0, true).unwrap();
//! assert_eq!(system.add(a, BitVector::from_bytes(&[0b01])), Ok(false));
//!
//! let mut b = BitVector::new(2);
//! b.set(0, true).unwrap();
//! b.set(1, true).unwrap();
//! assert_eq!(system.add(b, BitVector::from_bytes(&[0b11])), Ok(true));
//!
//! system.backtrack();
//! let x = system.solve();
//! assert_eq!(x, vec![BitVector::from_bytes(&[0b01]), BitVector::from_bytes(&[0b10])]);
//! ```

mod bitvec;
mod consts;
mod decoder;
mod errors;
mod linear_system;
mod mask;


pub use bitvec::BitVector;
pub use consts::{EZHIK_DEFAULT_NUM_SOURCE_BLOCKS, EZHIK_RECOMMENDED_EXTRA_CODED_BLOCKS};
pub use decoder::Decoder;
pub use errors::EzhikError;
pub use linear_system::LinearSystem;
pub use mask::generate_mask;
