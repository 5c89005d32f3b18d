mod helpers;
mod probe;
mod resolver;
mod services;
mod tools;
mod transport;
