//! Reservation Station Pool.
//!
//! The pool is a fixed array of stations partitioned by operation class. It provides:
//! 1. **Allocation:** Lowest-indexed free station within a class partition.
//! 2. **Operand Tracking:** Each operand is either a resolved value or the tag of its producer.
//! 3. **Forwarding:** Resolves every operand waiting on a broadcast tag in one sweep.
//! 4. **Release:** Frees a station once its result has been broadcast.
//!
//! Station identities double as renaming tags: a register or operand that is
//! waiting for a value names the station that will produce it.

use std::ops::Range;

use serde::Serialize;

use crate::isa::{OpClass, OpKind};

/// Identity of a reservation station; used as the tag of the value it will produce.
///
/// Tags are only ever compared for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StationId(pub usize);

/// A source operand held by a station.
///
/// The two variants make the value slot and the producer tag mutually
/// exclusive: an operand is either resolved or waiting, never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value is available.
    Ready(i64),
    /// Value will be broadcast by the given station.
    Pending(StationId),
}

impl Operand {
    /// Resolved value, if any (the `V` field).
    #[inline]
    pub const fn value(self) -> Option<i64> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending(_) => None,
        }
    }

    /// Producer tag, if still waiting (the `Q` field).
    #[inline]
    pub const fn producer(self) -> Option<StationId> {
        match self {
            Self::Ready(_) => None,
            Self::Pending(tag) => Some(tag),
        }
    }

    /// Returns true if the operand value is available.
    #[inline]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Replaces a pending operand with `value` if it waits on `tag`.
    ///
    /// Returns true if the operand was resolved.
    #[inline]
    fn capture(&mut self, tag: StationId, value: i64) -> bool {
        if *self == Self::Pending(tag) {
            *self = Self::Ready(value);
            true
        } else {
            false
        }
    }
}

/// Outcome of a finished execution, waiting for the Common Data Bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Result computed in `cycle`; eligible to broadcast from the next cycle on.
    Ready {
        /// Computed value.
        value: i64,
        /// Cycle the latency expired.
        cycle: u64,
    },
    /// Execution failed (division by zero). A faulted station never broadcasts.
    Faulted {
        /// Cycle the fault was detected.
        cycle: u64,
    },
}

/// The in-flight instruction occupying a busy station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StationEntry {
    /// Program index of the occupying instruction.
    pub inst: usize,
    /// Operation kind.
    pub op: OpKind,
    /// Destination register (for display; the register status table owns the rename).
    pub rd: usize,
    /// First operand (`Vj`/`Qj`).
    pub j: Operand,
    /// Second operand (`Vk`/`Qk`).
    pub k: Operand,
    /// Execution cycles elapsed toward the operation latency.
    pub elapsed: u32,
    /// Set once the latency expires.
    pub outcome: Option<Outcome>,
}

impl StationEntry {
    /// Creates an entry for a freshly issued instruction.
    pub const fn new(inst: usize, op: OpKind, rd: usize, j: Operand, k: Operand) -> Self {
        Self {
            inst,
            op,
            rd,
            j,
            k,
            elapsed: 0,
            outcome: None,
        }
    }

    /// Both operands resolved and no result produced yet.
    #[inline]
    pub const fn can_execute(&self) -> bool {
        self.j.is_ready() && self.k.is_ready() && self.outcome.is_none()
    }

    /// Result value, if ready for broadcast.
    #[inline]
    pub const fn result(&self) -> Option<i64> {
        match self.outcome {
            Some(Outcome::Ready { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Returns true if either operand waits on `tag`.
    #[inline]
    pub fn waits_on(&self, tag: StationId) -> bool {
        self.j == Operand::Pending(tag) || self.k == Operand::Pending(tag)
    }
}

/// A single reservation station. Busy exactly when it holds an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationStation {
    /// Partition this station belongs to; fixed for its lifetime.
    pub class: OpClass,
    /// 1-based position within the partition, used for labels like `Mult2`.
    pub ordinal: usize,
    /// Occupying instruction, if busy.
    pub entry: Option<StationEntry>,
}

impl ReservationStation {
    /// Returns true while the station holds an instruction.
    #[inline]
    pub const fn is_busy(&self) -> bool {
        self.entry.is_some()
    }

    /// Display label such as `Add1`.
    pub fn name(&self) -> String {
        format!("{}{}", self.class.name(), self.ordinal)
    }
}

/// Fixed pool of reservation stations laid out as `[Add..., Mult..., Div...]`.
#[derive(Clone, Debug)]
pub struct StationPool {
    stations: Vec<ReservationStation>,
    partitions: [Range<usize>; 3],
}

impl StationPool {
    /// Creates a pool with the given number of stations per class.
    pub fn new(add: usize, mult: usize, div: usize) -> Self {
        let counts = [add, mult, div];
        let mut stations = Vec::with_capacity(add + mult + div);
        let mut partitions: [Range<usize>; 3] = [0..0, 0..0, 0..0];
        for class in OpClass::ALL {
            let start = stations.len();
            for ordinal in 1..=counts[class.index()] {
                stations.push(ReservationStation {
                    class,
                    ordinal,
                    entry: None,
                });
            }
            partitions[class.index()] = start..stations.len();
        }
        Self {
            stations,
            partitions,
        }
    }

    /// Total number of stations.
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the pool has no stations at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of stations in a class partition.
    pub fn count(&self, class: OpClass) -> usize {
        self.partitions[class.index()].len()
    }

    /// Lowest-indexed free station in the class partition, if any.
    pub fn first_free(&self, class: OpClass) -> Option<StationId> {
        self.partitions[class.index()]
            .clone()
            .find(|&i| !self.stations[i].is_busy())
            .map(StationId)
    }

    /// Places an issued instruction into a free station.
    pub fn occupy(&mut self, id: StationId, entry: StationEntry) {
        let station = &mut self.stations[id.0];
        debug_assert!(!station.is_busy(), "{} reassigned while busy", station.name());
        debug_assert_eq!(station.class, entry.op.class());
        station.entry = Some(entry);
    }

    /// Returns a station.
    #[inline]
    pub fn get(&self, id: StationId) -> &ReservationStation {
        &self.stations[id.0]
    }

    /// Returns the entry of a busy station.
    #[inline]
    pub fn entry(&self, id: StationId) -> Option<&StationEntry> {
        self.stations[id.0].entry.as_ref()
    }

    /// Returns the entry of a busy station, mutably.
    #[inline]
    pub fn entry_mut(&mut self, id: StationId) -> Option<&mut StationEntry> {
        self.stations[id.0].entry.as_mut()
    }

    /// Iterates over every station with its tag.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &ReservationStation)> {
        self.stations
            .iter()
            .enumerate()
            .map(|(i, s)| (StationId(i), s))
    }

    /// Iterates over busy stations' entries with their tags.
    pub fn busy(&self) -> impl Iterator<Item = (StationId, &StationEntry)> {
        self.stations
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.entry.as_ref().map(|e| (StationId(i), e)))
    }

    /// Number of busy stations.
    pub fn busy_count(&self) -> usize {
        self.busy().count()
    }

    /// Delivers a broadcast value to every operand waiting on `tag`.
    ///
    /// Returns the number of operands resolved.
    pub fn forward(&mut self, tag: StationId, value: i64) -> usize {
        let mut resolved = 0;
        for entry in self.stations.iter_mut().filter_map(|s| s.entry.as_mut()) {
            resolved += usize::from(entry.j.capture(tag, value));
            resolved += usize::from(entry.k.capture(tag, value));
        }
        resolved
    }

    /// Frees a station after its broadcast, returning the entry it held.
    pub fn release(&mut self, id: StationId) -> Option<StationEntry> {
        debug_assert!(
            self.busy().all(|(_, e)| !e.waits_on(id)),
            "{} released while still being waited on",
            self.get(id).name()
        );
        self.stations[id.0].entry.take()
    }
}
