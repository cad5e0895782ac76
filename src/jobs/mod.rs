//! The batch jobs exposed as subcommands. Each one reads a directory or CSV,
//! writes its results to disk and prints a summary.

pub mod crop;
pub mod download;
pub mod links;
pub mod rewrite;
pub mod sizes;
