//! `composer`: command-line and stdio tool-protocol front end for the
//! background composer client.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod mcp;
pub mod output;
pub mod settings;

#[cfg(test)]
mod tests;
