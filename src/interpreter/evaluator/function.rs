/// The process-wide default tables.
///
/// Constants such as `pi` and `e`, one-argument functions such as `sin`,
/// `ln` or `factorial`, and two-argument functions such as `atan2` or
/// `hypot`. They are built once on first use and consulted last, after any
/// caller or parser table.
pub mod builtin;

/// Name-resolution capabilities.
///
/// Declares the lookup traits for variables, one-argument and two-argument
/// functions, and the adapters that let maps and closures act as tables.
pub mod source;
