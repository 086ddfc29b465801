//! ANSI styles for status lines. `anstream` strips them when the output isn't a terminal.

pub const RESET: &str = "\x1b[0m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
