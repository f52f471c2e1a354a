//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a kvsync command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and config dirs pointing at the temporary home
    /// - PATH starting with the fake `az`
    /// - Current directory set to the test project directory
    /// - Colors disabled and inherited kvsync variables removed
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("kvsync").expect("failed to find kvsync binary");
        cmd.env("HOME", self.home());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home());
        cmd.env("XDG_CONFIG_HOME", self.home().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env("FAKE_AZ_STORE", self.store());
        cmd.env_remove("KVSYNC_VAULT");
        cmd.env_remove("KVSYNC_LOG");
        cmd.env("PATH", self.path_with_fake_az());
        cmd.current_dir(self.project());
        cmd
    }

    /// Same as `cmd`, but with `az` nowhere on PATH.
    pub fn cmd_without_az(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("PATH", self.home());
        cmd
    }

    /// Shortcut for `kvsync --vault my-vault export [args]`.
    pub fn export(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(["--vault", VAULT, "export"])
            .args(args)
            .output()
            .expect("failed to run kvsync export")
    }

    /// Shortcut for `kvsync --vault my-vault import [args]`.
    pub fn import(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(["--vault", VAULT, "import"])
            .args(args)
            .output()
            .expect("failed to run kvsync import")
    }

    fn path_with_fake_az(&self) -> std::ffi::OsString {
        let mut paths = vec![self.bin()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).expect("failed to build PATH")
    }
}

/// Vault name used by the command shortcuts.
pub const VAULT: &str = "my-vault";
