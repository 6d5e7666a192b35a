use std::fmt::Display;

use chrono::FixedOffset;

use crate::clock;

/// Print a progress line prefixed with the current second-granularity stamp.
pub fn log(offset: FixedOffset, message: impl Display) {
    println!("{}", line(&clock::stamp(&clock::now(offset)), message));
}

fn line(stamp: &str, message: impl Display) -> String {
    format!("[{}] - {}", stamp, message)
}
