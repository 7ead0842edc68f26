//! Shared constants for the table core.

/// Default name of the reserved frame column holding per-key row groups in a
/// grouped table. Uniquified against key column names when they collide.
pub const GROUPS_COLUMN_NAME: &str = "groups";

/// Row count above which per-row key-tuple computation switches to the
/// parallel path. The parallel path produces bit-identical output order.
pub const PARALLEL_ROW_THRESHOLD: usize = 4096;
