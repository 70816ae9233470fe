//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the scheduling engine. It provides:
//! 1. **Cycle and IPC:** Total cycles, issued and retired instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Retired counts per operation kind.
//! 3. **Pipeline:** Structural stalls at issue, operand-wait and execute station-cycles.
//! 4. **Bus:** Common Data Bus broadcasts and conflicts (serialized policy only).

use std::time::Instant;

use crate::isa::OpKind;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions admitted into a reservation station.
    pub instructions_issued: u64,
    /// Instructions whose result was broadcast.
    pub instructions_retired: u64,

    /// Retired ADD instructions.
    pub inst_add: u64,
    /// Retired SUB instructions.
    pub inst_sub: u64,
    /// Retired MULT instructions.
    pub inst_mult: u64,
    /// Retired DIV instructions.
    pub inst_div: u64,

    /// Cycles in which the head instruction found no free station.
    pub structural_stalls: u64,
    /// Station-cycles spent waiting for an operand broadcast.
    pub operand_wait_cycles: u64,
    /// Station-cycles spent advancing a latency counter.
    pub execute_cycles: u64,

    /// Results broadcast on the Common Data Bus.
    pub cdb_broadcasts: u64,
    /// Ready results deferred because the bus was taken (serialized policy).
    pub cdb_conflicts: u64,

    /// Instructions that faulted during execution.
    pub faults: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_issued: 0,
            instructions_retired: 0,
            inst_add: 0,
            inst_sub: 0,
            inst_mult: 0,
            inst_div: 0,
            structural_stalls: 0,
            operand_wait_cycles: 0,
            execute_cycles: 0,
            cdb_broadcasts: 0,
            cdb_conflicts: 0,
            faults: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`, `"bus"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix", "bus"];

impl SimStats {
    /// Counts a retired instruction of the given kind.
    pub fn record_retire(&mut self, op: OpKind) {
        self.instructions_retired += 1;
        match op {
            OpKind::Add => self.inst_add += 1,
            OpKind::Sub => self.inst_sub += 1,
            OpKind::Mult => self.inst_mult += 1,
            OpKind::Div => self.inst_div += 1,
        }
    }

    /// Retired instructions per cycle (0 before the first cycle).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per retired instruction (0 before the first retirement).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"pipeline"`,
    /// `"instruction_mix"`, or `"bus"`. Pass an empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        if want("summary") {
            println!("\n==========================================================");
            println!("TOMASULO SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_issued               {}", self.instructions_issued);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("sim_faults               {}", self.faults);
            println!("----------------------------------------------------------");
        }
        if want("pipeline") {
            println!("PIPELINE BREAKDOWN");
            println!(
                "  stalls.structural      {} ({:.2}% of cycles)",
                self.structural_stalls,
                (self.structural_stalls as f64 / cyc) * 100.0
            );
            println!(
                "  station.wait_operand   {} station-cycles",
                self.operand_wait_cycles
            );
            println!(
                "  station.execute        {} station-cycles",
                self.execute_cycles
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("add", self.inst_add),
                ("sub", self.inst_sub),
                ("mult", self.inst_mult),
                ("div", self.inst_div),
            ] {
                println!(
                    "  op.{:<19} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / instr) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("bus") {
            println!("COMMON DATA BUS");
            println!("  cdb.broadcasts         {}", self.cdb_broadcasts);
            println!("  cdb.conflicts          {}", self.cdb_conflicts);
        }
        println!("==========================================================");
    }
}
