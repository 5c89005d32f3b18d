mod cli;
mod logger;
mod rpc;
mod settings;
