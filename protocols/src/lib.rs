//! Wire formats spoken by VMC Helty Flow units.

pub mod vmgn;
