//! Filesystem abstraction for mdtest.
//!
//! This crate provides:
//! - Filesystem trait for reading fixtures and writing/removing artifacts
//! - RealFilesystem backed by `std::fs`
//! - MockFilesystem for in-memory tests

pub mod filesystem;

pub use filesystem::{Filesystem, FsError, MockFilesystem, RealFilesystem};
