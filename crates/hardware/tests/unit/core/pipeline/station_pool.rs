//! Station Pool Tests.

use tomasulo_core::core::pipeline::station::{Operand, StationEntry, StationId, StationPool};
use tomasulo_core::isa::{OpClass, OpKind};

#[test]
fn test_empty_partition_has_no_free_station() {
    let pool = StationPool::new(1, 0, 1);
    assert_eq!(pool.count(OpClass::Mult), 0);
    assert_eq!(pool.first_free(OpClass::Mult), None);
    assert_eq!(pool.first_free(OpClass::Div), Some(StationId(1)));
}

#[test]
fn test_forward_resolves_matching_operands_only() {
    let mut pool = StationPool::new(3, 0, 0);
    pool.occupy(
        StationId(0),
        StationEntry::new(0, OpKind::Add, 1, Operand::Ready(1), Operand::Ready(2)),
    );
    pool.occupy(
        StationId(1),
        StationEntry::new(1, OpKind::Add, 2, Operand::Pending(StationId(0)), Operand::Ready(4)),
    );
    pool.occupy(
        StationId(2),
        StationEntry::new(
            2,
            OpKind::Sub,
            3,
            Operand::Pending(StationId(0)),
            Operand::Pending(StationId(1)),
        ),
    );

    assert_eq!(pool.forward(StationId(0), 3), 2);

    let b = pool.entry(StationId(1)).unwrap();
    assert!(b.can_execute());
    let c = pool.entry(StationId(2)).unwrap();
    assert_eq!(c.j, Operand::Ready(3));
    assert_eq!(c.k, Operand::Pending(StationId(1)));
    assert!(!c.can_execute());
}

#[test]
fn test_release_frees_station() {
    let mut pool = StationPool::new(1, 1, 1);
    let entry = StationEntry::new(0, OpKind::Div, 1, Operand::Ready(8), Operand::Ready(2));
    pool.occupy(StationId(2), entry);
    assert_eq!(pool.busy_count(), 1);

    assert_eq!(pool.release(StationId(2)), Some(entry));
    assert_eq!(pool.busy_count(), 0);
    assert_eq!(pool.release(StationId(2)), None);
}
