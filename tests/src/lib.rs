//! Cross-crate pipeline tests. Every external tool is replaced by an in-memory fake
//! from [`utils`], so these run without network access or installed binaries.

pub mod utils;

#[cfg(test)]
mod pipeline;
