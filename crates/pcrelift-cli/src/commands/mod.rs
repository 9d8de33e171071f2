pub mod compile;
pub mod document;
pub mod dump;
pub mod exec;
pub mod run_common;
