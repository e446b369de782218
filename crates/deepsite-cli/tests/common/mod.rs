#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::time::Duration;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

const DEEPSITE_VARS: &[&str] = &[
    "DEEPSITE_CONFIG",
    "DEEPSITE_GENERATE_URL",
    "DEEPSITE_STORE",
    "DEEPSITE_REST_URL",
    "DEEPSITE_API_KEY",
    "DEEPSITE_DATA_DIR",
    "DEEPSITE_USER",
    "DEEPSITE_TOKEN",
];

/// A `deepsite` command isolated in `root`: file store under `root/data`,
/// config file at `root/config.toml` (absent unless a test writes it), and
/// no inherited `DEEPSITE_*` settings.
pub fn deepsite_cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deepsite"));
    cmd.timeout(CMD_TIMEOUT);
    for var in DEEPSITE_VARS {
        cmd.env_remove(var);
    }
    cmd.env("DEEPSITE_CONFIG", root.join("config.toml"));
    cmd.env("DEEPSITE_DATA_DIR", root.join("data"));
    cmd.env("DEEPSITE_STORE", "file");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Run `generate` as `user` and return the saved website as JSON
#[allow(dead_code)]
pub fn generate_json(root: &Path, user: &str, prompt: &str) -> serde_json::Value {
    let output = deepsite_cmd(root)
        .args(["--user", user, "generate", prompt, "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("generate should print JSON")
}
