use crate::{bitvec::BitVector, errors::EzhikError};
use rayon::prelude::*;

/// One linear equation over GF(2): XOR of all unknowns `x[i]` with `coefficients[i] == 1` equals `value`.
#[derive(Clone, Debug)]
struct Equation {
    coefficients: BitVector,
    value: BitVector,
}

impl Equation {
    /// Adds `other` into `self`, both sides of the equation. Lengths must already agree.
    #[inline]
    fn add_assign(&mut self, other: &Equation) {
        self.coefficients.xor_words(&other.coefficients);
        self.value.xor_words(&other.value);
    }
}

/// Incremental Gaussian elimination over GF(2), with block-valued unknowns.
///
/// Equations are fed one at a time using `add`. `rows[..pos]` always holds the pivot rows in row-echelon form,
/// i.e. row `i` is zero in columns `0..i` and one in column `i`. `rows[pos..]` holds pending equations which are
/// already reduced against every pivot row, but couldn't be promoted yet, because they are zero in column `pos`.
///
/// Once `n` pivot rows are in place, `backtrack` brings them to reduced row-echelon form and `solve` reads off
/// the unknowns.
#[derive(Clone, Debug)]
pub struct LinearSystem {
    n: usize,
    block_len: usize,
    rows: Vec<Equation>,
    pos: usize,
    ready: bool,
}

impl LinearSystem {
    /// Creates an empty system of `n` unknowns, each one a block of `block_len` bits.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of unknowns i.e. source blocks. Also the expected length of every coefficient vector.
    /// * `block_len` - Bit length of each unknown. Also the expected length of every value block.
    pub fn new(n: usize, block_len: usize) -> Self {
        LinearSystem {
            n,
            block_len,
            rows: Vec::with_capacity(n),
            pos: 0,
            ready: false,
        }
    }

    pub fn num_unknowns(&self) -> usize {
        self.n
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Number of pivot rows promoted so far. Pending equations are not counted, so this is a lower bound on the
    /// rank of everything added, and reaches `n` exactly when the system becomes full rank.
    pub fn rank(&self) -> usize {
        self.pos
    }

    pub fn is_full_rank(&self) -> bool {
        self.pos == self.n
    }

    /// Whether back-substitution already happened, making `solve` callable.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Ingests one equation, reducing it against the current pivot rows and promoting it to a pivot row,
    /// if it is linearly independent of them. A promotion may unlock pending equations, which get promoted
    /// in turn.
    ///
    /// # Arguments
    ///
    /// * `coefficients` - `n` bits, selecting unknowns which are XOR-ed together.
    /// * `value` - `block_len` bits, the XOR of the selected unknowns.
    ///
    /// # Returns
    ///
    /// Returns a `Result` which is:
    /// - `Ok(true)` if the system is fully determined, after this equation or even before it.
    /// - `Ok(false)` if more equations are needed.
    /// - `Err(EzhikError::CoefficientDimensionMismatch)` if `coefficients.len() != n`.
    /// - `Err(EzhikError::ValueDimensionMismatch)` if `value.len() != block_len`.
    ///
    /// On error, the system is left untouched.
    pub fn add(&mut self, coefficients: BitVector, value: BitVector) -> Result<bool, EzhikError> {
        if coefficients.len() != self.n {
            return Err(EzhikError::CoefficientDimensionMismatch(self.n, coefficients.len()));
        }
        if value.len() != self.block_len {
            return Err(EzhikError::ValueDimensionMismatch(self.block_len, value.len()));
        }

        if self.is_full_rank() {
            return Ok(true);
        }

        let mut candidate = Equation { coefficients, value };
        for (col, pivot) in self.rows[..self.pos].iter().enumerate() {
            if candidate.coefficients.bit(col) {
                candidate.add_assign(pivot);
            }
        }

        if !candidate.coefficients.bit(self.pos) {
            if candidate.coefficients.is_zero() {
                log::trace!("dropping equation dependent on {} pivot rows", self.pos);
            } else {
                log::trace!("keeping equation pending, no pivot in column {}", self.pos);
                self.rows.push(candidate);
            }

            return Ok(false);
        }

        self.rows.push(candidate);
        self.promote(self.rows.len() - 1);

        while self.pos < self.n {
            let col = self.pos;
            let next = self.rows[col..].iter().position(|row| row.coefficients.bit(col));

            match next {
                Some(offset) => self.promote(col + offset),
                None => break,
            }
        }

        if self.is_full_rank() {
            self.rows.truncate(self.n);
            log::debug!("system of {} unknowns reached full rank", self.n);
        } else {
            self.rows.retain(|row| !row.coefficients.is_zero());
        }

        Ok(self.is_full_rank())
    }

    /// Moves the row at `index`, which must have a one in column `pos`, into pivot slot `pos` and eliminates
    /// that column from all pending rows.
    fn promote(&mut self, index: usize) {
        let col = self.pos;

        self.rows.swap(col, index);
        debug_assert!(self.rows[col].coefficients.bit(col));

        self.pos += 1;

        let (basis, pending) = self.rows.split_at_mut(self.pos);
        let pivot = &basis[col];

        pending
            .iter_mut()
            .filter(|row| row.coefficients.bit(col))
            .for_each(|row| row.add_assign(pivot));

        log::trace!("promoted equation to pivot row {}, {} pending", col, pending.len());
    }

    /// Turns the row-echelon form into reduced row-echelon form, so that pivot row `i` is one in column `i` and
    /// zero everywhere else. Calling it again after success is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the system is not yet full rank. That's a caller bug, `add` tells when the system is ready.
    pub fn backtrack(&mut self) {
        assert!(
            self.is_full_rank(),
            "backtrack called on underdetermined system: rank {} of {}",
            self.pos,
            self.n
        );

        if self.ready {
            return;
        }

        for col in (1..self.n).rev() {
            let (above, rest) = self.rows.split_at_mut(col);
            let pivot = &rest[0];

            above
                .par_iter_mut()
                .filter(|row| row.coefficients.bit(col))
                .for_each(|row| row.add_assign(pivot));
        }

        self.ready = true;
        log::debug!("back-substitution done for {} unknowns", self.n);
    }

    /// Reads off the unknowns from the reduced system: `x[i]` is the XOR of `value[j]` over all columns `j`
    /// set in row `i`.
    ///
    /// # Returns
    ///
    /// `n` bit vectors of `block_len` bits each, in source block order. The same result on every call.
    ///
    /// # Panics
    ///
    /// Panics if `backtrack` was not run yet.
    pub fn solve(&self) -> Vec<BitVector> {
        assert!(self.ready, "solve called before backtrack");

        self.rows[..self.n]
            .par_iter()
            .map(|row| {
                let mut x = BitVector::new(self.block_len);
                row.coefficients.ones().for_each(|col| x.xor_words(&self.rows[col].value));
                x
            })
            .collect()
    }
}
