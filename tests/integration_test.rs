use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

const ANDROID_42: &str =
    "Mozilla/5.0 (Linux; U; Android 4.2.2; en-us; Nexus 7 Build/JDQ39) AppleWebKit/534.30";
const IPHONE_71: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 7_1_2 like Mac OS X) AppleWebKit/537.51.2";

fn hostsniff() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("hostsniff"));
    cmd.env_remove("HOSTSNIFF_USER_AGENT");
    cmd
}

#[test]
fn test_detect_android_browser() {
    hostsniff()
        .arg("detect")
        .arg("--user-agent")
        .arg(ANDROID_42)
        .assert()
        .success()
        .stdout(contains("ready: true"))
        .stdout(contains("platform: android"))
        .stdout(contains("version: 4.2"))
        .stdout(contains("grade: b"))
        .stdout(contains("tags: android android4 android4_2"))
        .stdout(contains("platform-android4_2 grade-b platform-ready"));
}

#[test]
fn test_detect_user_agent_from_env() {
    hostsniff()
        .env("HOSTSNIFF_USER_AGENT", IPHONE_71)
        .arg("detect")
        .assert()
        .success()
        .stdout(contains("platform: ios"))
        .stdout(contains("tags: ios ios7 ios7_1"));
}

#[test]
fn test_detect_unknown_host() {
    hostsniff()
        .arg("detect")
        .arg("--user-agent")
        .arg("curl/8.0")
        .assert()
        .success()
        .stdout(contains("platform: unknown"))
        .stdout(contains("version: 0"))
        .stdout(contains("grade: a"))
        .stdout(contains("classes: grade-a platform-ready"));
}

#[test]
fn test_detect_json_in_webview() {
    let output = hostsniff()
        .arg("detect")
        .arg("--json")
        .arg("--bridge")
        .arg("cordova")
        .arg("--device-platform")
        .arg("Android")
        .arg("--device-version")
        .arg("3.2.1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["ready"], true);
    assert_eq!(report["webview"], true);
    assert_eq!(report["grade"], "c");
    assert_eq!(
        report["platforms"],
        serde_json::json!(["webview", "cordova", "android", "android3", "android3_2"])
    );
}

#[test]
fn test_detect_webview_without_device_ready() {
    hostsniff()
        .arg("detect")
        .arg("--user-agent")
        .arg(ANDROID_42)
        .arg("--bridge")
        .arg("PhoneGap")
        .arg("--no-device-ready")
        .assert()
        .success()
        .stdout(contains("ready: false"))
        .stdout(contains("grade: pending"))
        .stdout(contains("platform: android"));
}

#[test]
fn test_detect_webview_without_descriptor_logs_advisory() {
    hostsniff()
        .env("RUST_LOG", "error")
        .args(["detect", "--bridge", "cordova", "--user-agent", ANDROID_42])
        .assert()
        .success()
        .stderr(contains("device plugin required"))
        .stdout(contains("platform: android"));
}

#[test]
fn test_detect_browser_without_descriptor_is_silent() {
    hostsniff()
        .env("RUST_LOG", "error")
        .args(["detect", "--user-agent", ANDROID_42])
        .assert()
        .success()
        .stderr(contains("device plugin required").not());
}

#[test]
fn test_detect_device_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("device.json");
    std::fs::write(&path, r#"{"platform": "iOS", "version": "8.0"}"#).unwrap();

    hostsniff()
        .arg("detect")
        .arg("--bridge")
        .arg("cordova")
        .arg("--device-file")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("tags: webview cordova ios ios8 ios8_0"));
}

#[test]
fn test_detect_missing_device_file() {
    let dir = tempdir().unwrap();

    hostsniff()
        .arg("detect")
        .arg("--device-file")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(contains("Failed to read device descriptor"));
}

#[test]
fn test_is_matches_and_exit_codes() {
    hostsniff()
        .args(["is", "ANDROID", "--user-agent", ANDROID_42])
        .assert()
        .success()
        .stdout("true\n");

    hostsniff()
        .args(["is", "ios", "--user-agent", ANDROID_42])
        .assert()
        .code(1)
        .stdout("false\n");
}

#[test]
fn test_is_matches_detected_tag() {
    hostsniff()
        .args(["is", "webview", "--bridge", "cordova", "--user-agent", IPHONE_71])
        .assert()
        .success();
}

#[test]
fn test_version_override_from_build_env() {
    let expected = option_env!("HOSTSNIFF_BUILD_VERSION").filter(|v| !v.is_empty());

    let output = hostsniff().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("hostsniff "));
    if let Some(version) = expected {
        assert_eq!(stdout.trim(), format!("hostsniff {}", version));
    }
}
