//! Pipeline stage implementations.
//!
//! This module contains the three stages of the Tomasulo pipeline. It includes:
//! 1. **Issue:** Admits the next instruction in program order into a free reservation station.
//! 2. **Execute:** Counts down operation latency for stations whose operands are resolved.
//! 3. **Writeback:** Broadcasts results on the Common Data Bus and frees stations.

/// Instruction issue stage implementation.
pub mod issue;

/// Instruction execute stage implementation.
pub mod execute;

/// Writeback (Common Data Bus) stage implementation.
pub mod writeback;

/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Issue stage entry point (IS stage).
pub use issue::issue_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
