mod config;
mod normalizer;
mod payload;
mod probe;
mod resolver;
