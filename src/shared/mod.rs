pub mod config;
pub mod logging;
pub mod outcome;
pub mod process;
#[cfg(test)]
pub mod testing;
