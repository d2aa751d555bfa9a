pub mod apath;
pub mod error;
pub mod filtering;
pub mod pairs;
pub mod read;
pub mod runner;
pub mod stats;
