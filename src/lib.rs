pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod report;
pub mod storage;
