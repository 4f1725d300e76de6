pub mod analyzers;
pub mod city;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod interactive;
pub mod loader;
pub mod output;
pub mod parser;
pub mod stats;
