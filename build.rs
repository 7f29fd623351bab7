//! Embeds BUILD_TIME, GIT_HASH and RUST_VERSION for `healthmon_rs::build_info`

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let docs_rs = std::env::var_os("DOCS_RS").is_some();

    let build_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string());

    let git_hash = if docs_rs {
        None
    } else {
        command_stdout("git", &["rev-parse", "--short", "HEAD"])
    };

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rust_version = command_stdout(&rustc, &["--version"]);

    for (key, value) in [
        ("BUILD_TIME", Some(build_time)),
        ("GIT_HASH", git_hash),
        ("RUST_VERSION", rust_version),
    ] {
        println!(
            "cargo:rustc-env={}={}",
            key,
            value.unwrap_or_else(|| "unknown".to_string())
        );
    }

    for path in [".git/HEAD", ".git/refs/heads/", "Cargo.toml"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}

/// Trimmed stdout of a successful command
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
