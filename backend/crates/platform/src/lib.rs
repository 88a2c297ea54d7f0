//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, hex digests, constant-time comparison)
//! - HTTP Basic authentication header decoding
//! - Go-style duration parsing for configuration values

pub mod basic_auth;
pub mod crypto;
pub mod duration;
