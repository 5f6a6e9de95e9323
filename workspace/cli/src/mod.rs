pub mod args;
pub mod build_info;
pub mod cli;
