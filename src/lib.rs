pub mod analyzers;
pub mod city;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod sampler;
pub mod table;
