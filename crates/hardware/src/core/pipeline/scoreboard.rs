//! Register status table.
//!
//! Maps each architectural register to the reservation station that will
//! produce its next value, or `None` if the register file already holds it.
//! Only the most recently issued writer is recorded, which is what renames
//! away write-after-write hazards: an older producer that finishes late finds
//! its tag superseded and leaves the register alone.

use crate::core::pipeline::station::StationId;

/// Register status table: one producer slot per architectural register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    producers: Vec<Option<StationId>>,
}

impl Scoreboard {
    /// Create a table with all registers clear (no pending writers).
    pub fn new(registers: usize) -> Self {
        Self {
            producers: vec![None; registers],
        }
    }

    /// Number of registers tracked.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    /// Returns true if no registers are tracked.
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Mark a register as having a pending writer, superseding any previous one.
    pub fn set_producer(&mut self, reg: usize, tag: StationId) {
        self.producers[reg] = Some(tag);
    }

    /// Get the tag of the latest pending writer for a register.
    /// Returns None if the register value is in the register file.
    pub fn get_producer(&self, reg: usize) -> Option<StationId> {
        self.producers[reg]
    }

    /// Clear a register's pending writer, but ONLY if the current tag matches.
    pub fn clear_if_match(&mut self, reg: usize, tag: StationId) -> bool {
        let slot = &mut self.producers[reg];
        if *slot == Some(tag) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Clears every register still waiting on `tag` and returns their indices.
    ///
    /// These are exactly the registers the broadcast of `tag` must write.
    pub fn resolve(&mut self, tag: StationId) -> Vec<usize> {
        (0..self.producers.len())
            .filter(|&reg| self.clear_if_match(reg, tag))
            .collect()
    }

    /// Read-only view of every entry, in register order.
    pub fn as_slice(&self) -> &[Option<StationId>] {
        &self.producers
    }
}
