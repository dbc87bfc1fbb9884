//! CLI integration tests for folio admin commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use folio::auth::Argon2Hasher;
use folio::store::{SqliteStore, Store};
use predicates::prelude::*;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("folio").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("FOLIO_ENV");
        cmd
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args([
                "admin",
                "init",
                "--data-dir",
                &self.data_dir_str(),
                "--non-interactive",
            ])
            .assert()
    }

    fn password_file(&self) -> String {
        std::fs::read_to_string(self.data_dir().join(".admin_password"))
            .expect("failed to read password file")
    }

    fn store(&self) -> SqliteStore {
        let store = SqliteStore::new(self.data_dir().join("folio.db")).expect("failed to open db");
        store.initialize().expect("failed to initialize db");
        store
    }
}

#[test]
fn test_init_writes_password_and_seeds() {
    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("Admin password"))
        .stdout(predicate::str::contains("admin user 'admin'"));

    let password = ctx.password_file();
    assert_eq!(password.len(), 24);

    let store = ctx.store();
    let admin = store.get_first_admin_user().unwrap().unwrap();
    assert_eq!(admin.username, "admin");
    assert!(
        Argon2Hasher::new()
            .verify(&password, &admin.password_hash)
            .unwrap()
    );

    assert_eq!(store.list_page_seo().unwrap().len(), 5);
    assert_eq!(store.list_sitemap_config().unwrap().len(), 5);
    assert_eq!(store.list_projects().unwrap().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_password_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let ctx = TestContext::new();
    ctx.init().success();

    let mode = std::fs::metadata(ctx.data_dir().join(".admin_password"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_init_twice_fails() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.init()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_init_custom_username() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "admin",
            "init",
            "--data-dir",
            &ctx.data_dir_str(),
            "--username",
            "owner",
            "--non-interactive",
        ])
        .assert()
        .success();

    let admin = ctx.store().get_first_admin_user().unwrap().unwrap();
    assert_eq!(admin.username, "owner");
}

#[test]
fn test_reset_password_replaces_hash() {
    let ctx = TestContext::new();
    ctx.init().success();
    let first = ctx.password_file();

    ctx.cmd()
        .args([
            "admin",
            "reset-password",
            "--data-dir",
            &ctx.data_dir_str(),
            "--non-interactive",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password updated"));

    let second = ctx.password_file();
    assert_ne!(first, second);

    let admin = ctx.store().get_first_admin_user().unwrap().unwrap();
    let hasher = Argon2Hasher::new();
    assert!(hasher.verify(&second, &admin.password_hash).unwrap());
    assert!(!hasher.verify(&first, &admin.password_hash).unwrap());
}

#[test]
fn test_reset_password_requires_init() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "admin",
            "reset-password",
            "--data-dir",
            &ctx.data_dir_str(),
            "--non-interactive",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn test_serve_requires_init() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["serve", "--data-dir", &ctx.data_dir_str(), "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("folio admin init"));
}

#[test]
fn test_serve_rejects_missing_config_file() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.cmd()
        .args([
            "serve",
            "--data-dir",
            &ctx.data_dir_str(),
            "--config",
            &ctx.data_dir().join("missing.toml").to_string_lossy(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_serve_rejects_unknown_environment() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "serve",
            "--data-dir",
            &ctx.data_dir_str(),
            "--environment",
            "qa",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown environment"));
}
