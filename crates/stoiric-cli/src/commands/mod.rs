pub mod clear;
pub mod day;
pub mod log;
pub mod quote;
pub mod reflect;
pub mod score;
pub mod streak;
