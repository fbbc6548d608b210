/// Read-only aggregation views
///
/// Dashboard stats, weekly summary, and member performance are deterministic
/// projections over the current task/story/project/member sets, scoped to
/// the caller's organization. Each is recomputed fully on every call — no
/// incremental cache at this scale — and the computation itself is a pure
/// function over fetched rows, so it is unit-testable without a database.

pub mod dashboard;
pub mod performance;
pub mod weekly;
