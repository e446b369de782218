#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{deepsite_cmd, generate_json};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn blank_prompt_is_a_usage_error() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .args(["--user", "user-1", "generate", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Validation error"));
    Ok(())
}

#[test]
fn blank_prompt_wins_over_missing_user() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .args(["generate", " "])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn generate_without_user_requires_auth() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .args(["generate", "A bakery"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Authentication required"));

    assert!(
        std::fs::read_dir(root.path().join("data").join("websites"))?
            .next()
            .is_none(),
        "nothing should be saved"
    );
    Ok(())
}

#[test]
fn list_without_user_requires_auth() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path()).arg("list").assert().code(4);
    Ok(())
}

#[test]
fn unknown_id_is_not_found() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .args(["--user", "user-1", "show", "00000000-0000-4000-8000-000000000000"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not found"));

    deepsite_cmd(root.path())
        .args(["--user", "user-1", "show", "../../etc/passwd"])
        .assert()
        .code(3);
    Ok(())
}

#[test]
fn other_users_website_is_not_found() -> Result<()> {
    let root = tempdir()?;
    let website = generate_json(root.path(), "alice", "A bakery in Lisbon");
    let id = website["id"].as_str().unwrap_or_default().to_string();

    deepsite_cmd(root.path())
        .args(["--user", "bob", "show", &id])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("bakery").not());

    let target = root.path().join("stolen");
    deepsite_cmd(root.path())
        .args(["--user", "bob", "export", &id])
        .arg(&target)
        .assert()
        .code(3);
    assert!(!target.exists());

    deepsite_cmd(root.path()).args(["show", &id]).assert().code(4);
    Ok(())
}

#[test]
fn invalid_endpoint_is_a_usage_error() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .env("DEEPSITE_GENERATE_URL", "not a url")
        .args(["--user", "user-1", "generate", "A bakery"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn unknown_store_backend_is_a_usage_error() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .env("DEEPSITE_STORE", "sqlite")
        .args(["--user", "user-1", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sqlite"));
    Ok(())
}

#[test]
fn unreachable_rest_store_is_a_storage_error() -> Result<()> {
    let root = tempdir()?;

    deepsite_cmd(root.path())
        .env("DEEPSITE_STORE", "rest")
        .env("DEEPSITE_REST_URL", "http://127.0.0.1:9")
        .env("DEEPSITE_API_KEY", "anon-key")
        .args(["--user", "user-1", "list"])
        .assert()
        .code(5);
    Ok(())
}
