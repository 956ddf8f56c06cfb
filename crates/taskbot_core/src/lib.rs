pub mod codec;
pub mod config;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod model;
pub mod storage;
pub mod timefmt;
