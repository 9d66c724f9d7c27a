#![cfg(all(unix, feature = "cli"))]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/glcli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn glovelink(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_glovelink"));
    cmd.env("GLOVELINK_PIPE_ROOT", root)
        .env_remove("GLOVELINK_CONNECT_TIMEOUT_MS")
        .arg("--log-level")
        .arg("error");
    cmd
}

fn spawn_monitor(root: &Path, hand: &str, count: u32) -> Child {
    glovelink(root)
        .arg("--format")
        .arg("json")
        .arg("monitor")
        .arg(hand)
        .arg("--count")
        .arg(count.to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("monitor command should start")
}

/// Wait for `child` to exit, killing it after `timeout`.
fn finish(mut child: Child, timeout: Duration) -> String {
    let start = Instant::now();
    loop {
        if child.try_wait().expect("monitor should be waitable").is_some() {
            break;
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            panic!("monitor did not exit in time");
        }
        thread::sleep(Duration::from_millis(25));
    }

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .expect("stdout should be piped")
        .read_to_string(&mut stdout)
        .expect("stdout should be readable");
    stdout
}

fn json_lines(text: &str) -> Vec<serde_json::Value> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("line should be json"))
        .collect()
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("command should run")
}

#[test]
fn send_reaches_monitor_with_fields_in_place() {
    let root = unique_temp_dir("send");
    let monitor = spawn_monitor(&root, "left", 1);

    let output = run(glovelink(&root)
        .arg("--format")
        .arg("json")
        .arg("send")
        .arg("left")
        .arg("--timeout")
        .arg("5s")
        .arg("--flexion")
        .arg("0,0.25,0.5,0.75,1")
        .arg("--joy=-0.5,0.5")
        .arg("--trigger")
        .arg("0.5")
        .arg("--buttons")
        .arg("grab,calibrate"));
    assert!(
        output.status.success(),
        "send failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let sent = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(sent[0]["connected"], true);
    assert_eq!(sent[0]["delivered"], true);
    assert_eq!(sent[0]["bytes"], 120);

    let lines = json_lines(&finish(monitor, Duration::from_secs(10)));
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert_eq!(line["hand"], "left");
    assert_eq!(line["seq"], 1);

    let record = &line["record"];
    assert_eq!(record["flexion"][4], 0.25);
    assert_eq!(record["flexion"][19], 1.0);
    assert_eq!(record["joyX"], -0.5);
    assert_eq!(record["joyY"], 0.5);
    assert_eq!(record["trgValue"], 0.5);
    assert_eq!(record["grab"], true);
    assert_eq!(record["calibrate"], true);
    assert_eq!(record["pinch"], false);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn relax_sends_zeroed_record() {
    let root = unique_temp_dir("relax");
    let monitor = spawn_monitor(&root, "right", 1);

    let output = run(glovelink(&root).arg("relax").arg("right").arg("--strict"));
    assert!(
        output.status.success(),
        "relax failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let lines = json_lines(&finish(monitor, Duration::from_secs(10)));
    let record = &lines[0]["record"];
    assert!(record["flexion"]
        .as_array()
        .expect("flexion should be an array")
        .iter()
        .all(|v| v == 0.0));
    assert_eq!(record["trgValue"], 0.0);
    assert_eq!(record["aButton"], false);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn send_without_driver_is_silent_noop() {
    let root = unique_temp_dir("nodriver");

    let output = run(glovelink(&root)
        .arg("--format")
        .arg("json")
        .arg("send")
        .arg("left")
        .arg("--timeout")
        .arg("100ms")
        .arg("--buttons")
        .arg("a"));

    assert!(output.status.success());
    let sent = json_lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(sent[0]["connected"], false);
    assert_eq!(sent[0]["delivered"], false);
    assert_eq!(sent[0]["bytes"], 0);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn strict_send_without_driver_returns_124() {
    let root = unique_temp_dir("strict");

    let output = run(glovelink(&root)
        .arg("send")
        .arg("right")
        .arg("--timeout")
        .arg("100ms")
        .arg("--strict"));

    assert_eq!(output.status.code(), Some(124));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("right hand channel not available"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn invalid_json_record_returns_60() {
    let root = unique_temp_dir("badjson");

    let output = run(glovelink(&root)
        .arg("send")
        .arg("left")
        .arg("--json")
        .arg("{\"splay\": \"wide\"}"));

    assert_eq!(output.status.code(), Some(60));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn layout_lists_fields_in_wire_order() {
    let root = unique_temp_dir("layout");

    let output = run(glovelink(&root).arg("--format").arg("json").arg("layout"));
    assert!(output.status.success());

    let layout = &json_lines(&String::from_utf8_lossy(&output.stdout))[0];
    assert_eq!(layout["record_size"], 120);
    let fields = layout["fields"].as_array().expect("fields should be an array");
    assert_eq!(fields.len(), 13);
    assert_eq!(fields[0]["name"], "flexion");
    assert_eq!(fields[8]["name"], "grab");
    assert_eq!(fields[8]["offset"], 112);
    assert_eq!(fields[12]["name"], "trgValue");
    assert_eq!(fields[12]["offset"], 116);

    let _ = std::fs::remove_dir_all(&root);
}
