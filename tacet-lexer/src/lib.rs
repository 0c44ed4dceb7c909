mod regex;
mod scanner;

pub use regex::{expand, Regex};
pub use scanner::{scan, Matcher, ScannerError};
