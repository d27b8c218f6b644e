//! Cell grid module for rollcall
//!
//! Loads a spreadsheet into an untyped, position-addressed 2-D grid with no
//! header assumptions. Layout detection downstream decides what each row and
//! column means; this crate only answers "what is in cell (r, c)".
//!
//! # Examples
//!
//! ```
//! use rollcall_grid::{CellValue, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![CellValue::from("SN"), CellValue::from("Emp ID")],
//!     vec![CellValue::from(1), CellValue::from("N-101")],
//! ]);
//!
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.cell_str(1, 1), "N-101");
//! assert_eq!(grid.cell_str(5, 5), "");
//! ```

mod cell;
mod error;
mod grid;
mod xlsx;

pub use cell::CellValue;
pub use error::{GridError, Result};
pub use grid::Grid;
