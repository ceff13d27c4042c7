pub mod apply;
pub mod commands;
pub mod config;
pub mod daytime;
pub mod error;
pub mod manager;
pub mod notify;
pub mod paths;
pub mod snapshot;
pub mod ui;
pub mod xfconf;

#[cfg(test)]
pub mod test_utils;
