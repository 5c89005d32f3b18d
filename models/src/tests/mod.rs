mod composer;
mod normalized;
mod user;
