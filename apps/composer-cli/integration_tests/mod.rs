mod commands;
mod helpers;
mod mcp;
