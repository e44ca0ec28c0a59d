//! Input loading: the per-region case table and the region boundaries.

pub mod cases;
pub mod regions;
