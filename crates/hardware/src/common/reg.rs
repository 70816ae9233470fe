//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct, the flat array of integer
//! registers that instructions read at issue time. It provides:
//! 1. **Storage:** One signed 64-bit value per architectural register.
//! 2. **Access:** Indexed reads for issue and writes for the Common Data Bus.
//! 3. **Observability:** A read-only slice view for snapshots.
//!
//! The register file is only written by the writeback stage; issue merely
//! snapshots values into reservation stations.

/// Flat integer register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    regs: Vec<i64>,
}

impl RegisterFile {
    /// Creates a register file from explicit initial values.
    ///
    /// The engine builds these from [`crate::config::RegisterConfig::initial_values`].
    pub fn from_values(values: Vec<i64>) -> Self {
        Self { regs: values }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index. Must be below [`RegisterFile::len`]; programs are
    ///   validated against the register count before the engine starts.
    #[inline]
    pub fn read(&self, idx: usize) -> i64 {
        self.regs[idx]
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index.
    /// * `val` - The value broadcast on the Common Data Bus.
    #[inline]
    pub fn write(&mut self, idx: usize, val: i64) {
        self.regs[idx] = val;
    }

    /// Number of architectural registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns true if the register file has no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Read-only view of every register, in index order.
    pub fn as_slice(&self) -> &[i64] {
        &self.regs
    }
}
