// Workbook and text I/O
//
// The pipeline core never touches bytes; this crate turns byte streams into
// named grids (or decoded text) on the way in, and a result table into a
// single-sheet workbook on the way out.

pub mod error;
pub mod text;
pub mod xlsx;
