//! CLI Exit Code Registry
//!
//! Single source of truth for exit codes. Exit codes are part of the shell
//! contract — scripts rely on them.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 1    | General error (unspecified)               |
//! | 2    | CLI usage error (bad args, missing file)  |
//! | 3    | Dataset load error (unreadable/bad file)  |
//! | 4    | Invalid audit job config                  |
//! | 5    | Report produced zero rows (informational) |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Dataset load error - catalog or scan file unreadable or not tabular.
pub const EXIT_LOAD: u8 = 3;

/// Invalid audit job config (TOML parse or validation failure).
pub const EXIT_CONFIG: u8 = 4;

/// The requested report came back empty. Not a failure — downstream
/// consumers decide whether "no data" is user-visible — but scriptable.
pub const EXIT_EMPTY_REPORT: u8 = 5;
