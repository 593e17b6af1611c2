//! bsc-http: HTTP client for the storage-zone API
//!
//! This crate provides the implementation of the ObjectStore trait on top of
//! reqwest. It is the only crate that talks to the network.

pub mod client;

pub use client::{ClientOptions, StorageClient, ACCESS_KEY_HEADER, CHECKSUM_HEADER};
