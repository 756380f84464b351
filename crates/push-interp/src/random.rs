//! Random program synthesis.
//!
//! Builds random program trees of approximately a requested total atom count
//! by recursively partitioning a size budget and sampling atoms from the
//! registry's active generator pool. Used by the evolutionary driver for
//! seeding and mutation, never during execution.

use crate::error::{InterpError, InterpResult};
use crate::interpreter::Interpreter;
use crate::registry::AtomGenerator;
use push_types::{Atom, Program};
use rand::seq::SliceRandom;
use rand::Rng;

impl Interpreter {
    /// Sample one random atom from the active generator pool.
    ///
    /// Generators are drawn uniformly by index, so a name appearing twice in
    /// the pool is twice as likely. Ephemeral constants are drawn uniformly
    /// from their configured `[min, max)` range and quantized to the
    /// configured resolution.
    pub fn random_atom(&mut self) -> InterpResult<Atom> {
        let pool_size = self.registry.active_pool().len();
        if pool_size == 0 {
            return Err(InterpError::EmptyGeneratorPool);
        }
        let index = self.rng.gen_range(0..pool_size);
        let generator = self.registry.active_pool()[index].clone();
        Ok(match generator {
            AtomGenerator::Instruction(name) => Atom::Name(name),
            AtomGenerator::IntErc => {
                let range = self.int_erc;
                let r = self.rng.gen_range(0..range.max - range.min);
                let r = r - r % range.resolution;
                Atom::Int(r + range.min)
            }
            AtomGenerator::FloatErc => {
                let range = self.float_erc;
                let r = self.rng.gen::<f64>() * (range.max - range.min);
                let r = r - r % range.resolution;
                Atom::Float(r + range.min)
            }
        })
    }

    /// Build a random program of approximately `size` total atoms.
    ///
    /// Consumes the distribution for `size - 1`: a partition value of one
    /// becomes a sampled leaf atom, anything larger a nested sub-program of
    /// that size. The tree's point count comes out at exactly `size` by
    /// construction of the partition.
    pub fn random_code(&mut self, size: usize) -> InterpResult<Program> {
        let mut program = Program::new();
        let budget = size as i64 - 1;
        for count in self.random_code_distribution(budget, budget) {
            if count == 1 {
                program.push(self.random_atom()?);
            } else {
                program.push(Atom::Program(self.random_code(count as usize)?));
            }
        }
        Ok(program)
    }

    /// Partition `count` into a shuffled sequence of positive integers
    /// summing to `count`. Empty for `count < 1`.
    ///
    /// `max_elements` is threaded through the recursion but does not bound
    /// the number of partitions produced.
    pub fn random_code_distribution(&mut self, count: i64, max_elements: i64) -> Vec<i64> {
        let mut result = Vec::new();
        self.decompose(&mut result, count, max_elements);
        result.shuffle(&mut self.rng);
        result
    }

    fn decompose(&mut self, out: &mut Vec<i64>, count: i64, max_elements: i64) {
        if count < 1 {
            return;
        }
        let this_size = if count < 2 {
            1
        } else {
            self.rng.gen_range(1..=count)
        };
        out.push(this_size);
        self.decompose(out, count - this_size, max_elements - 1);
    }
}
