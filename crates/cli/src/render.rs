//! Plain-text table rendering for snapshots.

use tomasulo_core::isa::OpKind;
use tomasulo_core::sim::{Snapshot, StationRow, TimingRow};

const RULE: &str = "----------------------------------------------------------------------";

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn timing_line(row: &TimingRow) -> String {
    format!(
        "  {:<3} {:<18} {:>6} {:>8} {:>8} {:>6}",
        row.index,
        row.instruction.to_string(),
        cell(row.timing.issue),
        cell(row.timing.execute_begin),
        cell(row.timing.execute_end),
        cell(row.timing.writeback),
    )
}

fn station_line(row: &StationRow) -> String {
    let result = if row.faulted {
        "fault".to_string()
    } else {
        cell(row.result)
    };
    format!(
        "  {:<6} {:<4} {:<5} {:>6} {:>6} {:<6} {:<6} {:>4} {:>8}",
        row.name,
        if row.busy { "yes" } else { "no" },
        cell(row.op.map(OpKind::mnemonic)),
        cell(row.vj),
        cell(row.vk),
        cell(row.qj.as_deref()),
        cell(row.qk.as_deref()),
        row.elapsed,
        result,
    )
}

/// Prints the instruction timing table.
pub fn print_timings(snapshot: &Snapshot) {
    println!("INSTRUCTION STATUS");
    println!(
        "  {:<3} {:<18} {:>6} {:>8} {:>8} {:>6}",
        "#", "instruction", "issue", "ex.begin", "ex.end", "wb"
    );
    for row in &snapshot.timings {
        println!("{}", timing_line(row));
    }
}

/// Prints the reservation-station table.
pub fn print_stations(snapshot: &Snapshot) {
    println!("RESERVATION STATIONS");
    println!(
        "  {:<6} {:<4} {:<5} {:>6} {:>6} {:<6} {:<6} {:>4} {:>8}",
        "name", "busy", "op", "vj", "vk", "qj", "qk", "cyc", "result"
    );
    for row in &snapshot.stations {
        println!("{}", station_line(row));
    }
}

/// Prints register status and register contents side by side.
pub fn print_registers(snapshot: &Snapshot) {
    println!("REGISTERS");
    for (i, (value, status)) in snapshot
        .registers
        .iter()
        .zip(&snapshot.register_status)
        .enumerate()
    {
        println!(
            "  {:<4} {:>12}   {}",
            format!("R{i}"),
            value,
            cell(status.as_deref())
        );
    }
}

/// Prints the full end-of-cycle view.
pub fn print_cycle(snapshot: &Snapshot) {
    println!("{RULE}");
    println!("CYCLE {}", snapshot.cycle);
    println!("{RULE}");
    print_timings(snapshot);
    println!();
    print_stations(snapshot);
    println!();
    print_registers(snapshot);
}
