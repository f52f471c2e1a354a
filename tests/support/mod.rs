//! Test support utilities for kvsync integration tests.
//!
//! Provides an isolated environment per test: a project directory the
//! binary runs in, a private home, and (on unix) a fake `az` executable
//! backed by a directory of secret files.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fake_az;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// No process-global state is mutated. Child processes get their working
/// directory and environment explicitly, so tests can run in parallel.
pub struct Test {
    root: TempDir,
}

impl Test {
    /// Create a new environment with an empty vault and no session.
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create temp dir");
        for dir in ["project", "home", "bin", "store"] {
            fs::create_dir_all(root.path().join(dir)).expect("failed to create test dir");
        }
        let t = Self { root };
        fake_az::install(&t.bin());
        t
    }

    /// Create an environment that is already signed in.
    pub fn signed_in() -> Self {
        let t = Self::new();
        t.sign_in();
        t
    }

    /// Create a signed-in environment whose vault holds `secrets`.
    pub fn with_secrets(secrets: &[(&str, &str)]) -> Self {
        let t = Self::signed_in();
        for (name, value) in secrets {
            t.put_secret(name, value);
        }
        t
    }

    /// Directory the binary runs in.
    pub fn project(&self) -> PathBuf {
        self.root.path().join("project")
    }

    /// Private home directory.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Directory holding the fake `az`.
    pub fn bin(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    /// Backing store of the fake vault, one file per secret.
    pub fn store(&self) -> PathBuf {
        self.root.path().join("store")
    }

    /// Mark the fake CLI as signed in.
    pub fn sign_in(&self) {
        fs::write(self.store().join(".signed_in"), "").expect("failed to sign in");
    }

    /// Whether the fake CLI has a session.
    pub fn is_signed_in(&self) -> bool {
        self.store().join(".signed_in").exists()
    }

    /// Seed a secret directly into the fake vault.
    pub fn put_secret(&self, name: &str, value: &str) {
        fs::write(self.store().join(name), value).expect("failed to seed secret");
    }

    /// Current value of a secret in the fake vault.
    pub fn secret(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.store().join(name)).ok()
    }

    /// Names written through `az keyvault secret set`, in call order.
    pub fn writes(&self) -> Vec<String> {
        fs::read_to_string(self.store().join(".writes"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Write a file relative to the project directory.
    pub fn write_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.project().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// Read a file relative to the project directory.
    pub fn read_file(&self, rel: impl AsRef<Path>) -> String {
        fs::read_to_string(self.project().join(rel)).expect("failed to read file")
    }
}
