//! Integration tests for the Vigil file integrity monitor

mod monitor_cycles;
mod test_utils;
mod unreadable_files;
