//! CLI exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | Success |
//! | 1    | General failure (network, server, invalid response) |
//! | 2    | Usage error (bad arguments, empty token) |
//! | 3    | Ticket not in the selected history |
//! | 4    | Receipt could not be rendered or written |
//! | 20   | Session expired; log in again |

pub const EXIT_SUCCESS: u8 = 0;

pub const EXIT_ERROR: u8 = 1;

pub const EXIT_USAGE: u8 = 2;

pub const EXIT_NOT_FOUND: u8 = 3;

pub const EXIT_EXPORT: u8 = 4;

/// The stored credential was rejected and has been cleared
pub const EXIT_SESSION_EXPIRED: u8 = 20;
