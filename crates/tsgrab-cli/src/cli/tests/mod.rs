//! CLI parse tests.

use super::Cli;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_url_only() {
    let cli = parse(&["tsgrab", "https://example.com/watch/1"]);
    assert_eq!(cli.url, "https://example.com/watch/1");
    assert!(cli.output_dir.is_none());
    assert!(cli.config.is_none());
    assert!(!cli.sha256);
}

#[test]
fn cli_parse_all_flags() {
    let cli = parse(&[
        "tsgrab",
        "https://example.com/watch/1",
        "-o",
        "/tmp/out",
        "--config",
        "/etc/tsgrab.toml",
        "--sha256",
    ]);
    assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/tsgrab.toml")));
    assert!(cli.sha256);
}

#[test]
fn cli_requires_url() {
    assert!(Cli::try_parse_from(["tsgrab"]).is_err());
}

#[test]
fn cli_rejects_extra_positional() {
    assert!(Cli::try_parse_from(["tsgrab", "https://a", "https://b"]).is_err());
}

#[test]
fn missing_config_file_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let cli = parse(&[
        "tsgrab",
        "http://127.0.0.1:9/never",
        "--config",
        dir.path().join("absent.toml").to_str().unwrap(),
    ]);
    let err = cli.run().unwrap_err();
    assert!(format!("{:#}", err).contains("read config"));
}
