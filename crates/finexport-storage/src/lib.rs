//! finexport-storage - Storage library for finexport
//!
//! This crate provides the filesystem implementation of the file-save step.

mod file_sink;

pub use file_sink::FileSystemSink;
