//! Core library components.
//!
//! This module contains the reusable logic for moving secrets between a
//! vault and CSV files: the codec, the vault adapters, sign-in and the two
//! sync flows.

pub mod auth;
pub mod azcli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod domain;
pub mod sync;
pub mod vault;
