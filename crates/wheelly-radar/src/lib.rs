//! `wheelly-radar` — the occupancy grid ("radar map") and the derived
//! N-sector polar view.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|---------------------------------------------------------------|
//! | [`grid`]  | `RadarCell`, `CellState`, `Persistence`, `RadarMap`          |
//! | [`polar`] | `Sector`, `SectorState`, `PolarMap`                          |
//! | [`error`] | `RadarError`, `RadarResult<T>`                               |

pub mod error;
pub mod grid;
pub mod polar;

#[cfg(test)]
mod tests;

pub use error::{RadarError, RadarResult};
pub use grid::{CellState, Persistence, RadarCell, RadarMap};
pub use polar::{PolarMap, Sector, SectorState};
