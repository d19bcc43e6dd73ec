//! CLI Exit Code Registry
//!
//! Single source of truth for all exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Code | Meaning                                      |
//! |------|----------------------------------------------|
//! | 0    | Success                                      |
//! | 1    | General error (bad input, failed export)     |
//! | 2    | CLI usage error (bad args, missing format)   |
//! | 3    | Pipeline ran but found no keyword tokens     |

/// Success - command completed and the artifact was produced.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - input could not be parsed or output could not be written.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown input format.
pub const EXIT_USAGE: u8 = 2;

/// The pipeline ran to completion but produced zero tokens.
/// Not a failure of parsing; there is simply nothing to consolidate,
/// so no artifact is written.
pub const EXIT_NO_TOKENS: u8 = 3;
