pub mod agent;
pub mod completion;
pub mod config;
pub mod git;
pub mod init;
pub mod update;
