//! Tests for the install steps against a temporary editor directory.

use super::*;
use crate::model::{BindingRecord, KeybindingList, SettingsDocument};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

/// Source and target directories under one temp root.
struct Fixture {
    _root: TempDir,
    source: PathBuf,
    target: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("temp dir");
        let source = root.path().join("fragments");
        let target = root.path().join("Code").join("User");
        fs::create_dir_all(&source).expect("create source dir");
        Fixture {
            _root: root,
            source,
            target,
        }
    }

    fn installer(&self) -> Installer {
        Installer::new(&self.source, &self.target)
    }

    fn write_source(&self, name: &str, value: Value) {
        fs::write(self.source.join(name), value.to_string()).expect("write fragment");
    }

    fn write_target(&self, name: &str, contents: &str) {
        fs::create_dir_all(&self.target).expect("create target dir");
        fs::write(self.target.join(name), contents).expect("write target");
    }

    fn read_target(&self, name: &str) -> Value {
        let text = fs::read_to_string(self.target.join(name)).expect("read target");
        serde_json::from_str(&text).expect("target is valid JSON")
    }
}

fn output_of(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 output")
}

#[test]
fn settings_merge_into_existing_file() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"a": {"y": 3, "z": 4}, "new": true}));
    fx.write_target("settings.json", r#"{"a": {"x": 1, "y": 2}, "keep": "me"}"#);

    let mut out = Vec::new();
    let outcome = fx.installer().install::<Settings, _>(&mut out).expect("install");

    assert_eq!(
        fx.read_target("settings.json"),
        json!({"a": {"x": 1, "y": 3, "z": 4}, "keep": "me", "new": true})
    );
    assert_eq!(
        outcome,
        StepOutcome::Installed {
            target: fx.target.join("settings.json"),
            backup: Some(fx.target.join("settings.json.backup")),
            replaced_malformed: false,
        }
    );
}

#[test]
fn keybindings_append_without_duplicates() {
    let fx = Fixture::new();
    fx.write_source(
        "keybindings.json",
        json!([
            {"key": "ctrl+j", "command": "foo"},
            {"key": "ctrl+k", "command": "bar"}
        ]),
    );
    fx.write_target("keybindings.json", r#"[{"key": "ctrl+j", "command": "foo", "when": "mine"}]"#);

    let mut out = Vec::new();
    fx.installer().install::<Keybindings, _>(&mut out).expect("install");

    assert_eq!(
        fx.read_target("keybindings.json"),
        json!([
            {"key": "ctrl+j", "command": "foo", "when": "mine"},
            {"key": "ctrl+k", "command": "bar"}
        ])
    );
}

#[test]
fn missing_target_directory_is_created() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"editor.lineNumbers": "relative"}));

    let mut out = Vec::new();
    let outcome = fx.installer().install::<Settings, _>(&mut out).expect("install");

    assert_eq!(
        fx.read_target("settings.json"),
        json!({"editor.lineNumbers": "relative"})
    );
    assert!(matches!(outcome, StepOutcome::Installed { backup: None, .. }));
    assert!(!output_of(out).contains("Backed up"));
}

#[test]
fn missing_fragment_is_reported_and_target_untouched() {
    let fx = Fixture::new();
    fx.write_target("settings.json", r#"{"keep": 1}"#);

    let mut out = Vec::new();
    let outcome = fx.installer().install::<Settings, _>(&mut out).expect("install");

    assert_eq!(
        outcome,
        StepOutcome::SourceMissing {
            source: fx.source.join("setting.json")
        }
    );
    assert!(output_of(out).contains("❌ Source settings file not found:"));
    assert!(
        !fx.target.join("settings.json.backup").exists(),
        "No backup should be made when nothing is installed"
    );
    assert_eq!(fx.read_target("settings.json"), json!({"keep": 1}));
}

#[test]
fn malformed_existing_is_backed_up_and_replaced() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"a": 1}));
    fx.write_target("settings.json", "// comment\n{ \"a\": 0 }");

    let mut out = Vec::new();
    let outcome = fx.installer().install::<Settings, _>(&mut out).expect("install");

    assert_eq!(fx.read_target("settings.json"), json!({"a": 1}));
    assert_eq!(
        fs::read_to_string(fx.target.join("settings.json.backup")).expect("backup"),
        "// comment\n{ \"a\": 0 }"
    );
    assert!(matches!(
        outcome,
        StepOutcome::Installed {
            replaced_malformed: true,
            ..
        }
    ));
    assert!(output_of(out).contains("⚠️  Existing settings.json is malformed, creating new one"));
}

#[test]
fn malformed_existing_merges_like_empty() {
    let malformed = Fixture::new();
    let empty = Fixture::new();
    let fragment = json!([{"key": "ctrl+j", "command": "foo"}]);
    malformed.write_source("keybindings.json", fragment.clone());
    empty.write_source("keybindings.json", fragment);
    malformed.write_target("keybindings.json", "[{ oops");

    let mut sink = Vec::new();
    malformed.installer().install::<Keybindings, _>(&mut sink).expect("install");
    empty.installer().install::<Keybindings, _>(&mut sink).expect("install");

    assert_eq!(
        malformed.read_target("keybindings.json"),
        empty.read_target("keybindings.json")
    );
}

#[test]
fn malformed_fragment_aborts_without_touching_target() {
    let fx = Fixture::new();
    fs::write(fx.source.join("setting.json"), "{ not json").expect("write");
    fx.write_target("settings.json", r#"{"keep": 1}"#);

    let mut out = Vec::new();
    let result = fx.installer().install::<Settings, _>(&mut out);

    assert!(matches!(result, Err(InstallError::SourceParse { .. })));
    assert_eq!(fx.read_target("settings.json"), json!({"keep": 1}));
}

#[test]
fn reinstalling_is_idempotent() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"a": {"b": 1}}));
    fx.write_source("keybindings.json", json!([{"key": "ctrl+j", "command": "foo"}]));

    let mut sink = Vec::new();
    fx.installer().run(&mut sink).expect("first run");
    let settings_once = fs::read_to_string(fx.target.join("settings.json")).expect("read");
    let keys_once = fs::read_to_string(fx.target.join("keybindings.json")).expect("read");

    fx.installer().run(&mut sink).expect("second run");

    assert_eq!(
        fs::read_to_string(fx.target.join("settings.json")).expect("read"),
        settings_once
    );
    assert_eq!(
        fs::read_to_string(fx.target.join("keybindings.json")).expect("read"),
        keys_once
    );
}

#[test]
fn custom_backup_suffix_is_used() {
    let fx = Fixture::new();
    fx.write_source("keybindings.json", json!([]));
    fx.write_target("keybindings.json", "[]");

    let mut out = Vec::new();
    let outcome = fx
        .installer()
        .with_backup_suffix(".orig")
        .install::<Keybindings, _>(&mut out)
        .expect("install");

    assert!(matches!(
        outcome,
        StepOutcome::Installed { backup: Some(ref path), .. } if path.ends_with("keybindings.json.orig")
    ));
}

#[test]
fn empty_backup_suffix_leaves_existing_file_intact() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"new": 1}));
    fx.write_target("settings.json", r#"{"keep": "me"}"#);

    let mut out = Vec::new();
    let result = fx
        .installer()
        .with_backup_suffix("")
        .install::<Settings, _>(&mut out);

    assert!(
        matches!(result, Err(InstallError::BackupOverwritesOriginal { .. })),
        "Expected BackupOverwritesOriginal, got {:?}",
        result
    );
    assert_eq!(fx.read_target("settings.json"), json!({"keep": "me"}));
}

#[test]
fn integers_beyond_64_bits_are_written_back_exactly() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"new": true}));
    fx.write_target("settings.json", r#"{"big": 123456789012345678901234567890}"#);

    let mut out = Vec::new();
    fx.installer().install::<Settings, _>(&mut out).expect("install");

    let written = fs::read_to_string(fx.target.join("settings.json")).expect("read");
    assert_eq!(
        written,
        "{\n    \"big\": 123456789012345678901234567890,\n    \"new\": true\n}\n"
    );
}

#[test]
fn run_reports_success_when_both_steps_install() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"a": 1}));
    fx.write_source("keybindings.json", json!([]));

    let mut out = Vec::new();
    let report = fx.installer().run(&mut out).expect("run");

    assert!(report.is_success());
    assert_eq!(report.exit_code(), 0);
    let text = output_of(out);
    assert!(text.starts_with("🚀 VSCode Neovim Configuration Auto-Installer\n"));
    assert!(text.contains("asvetliakov.vscode-neovim"));
    assert!(text.contains("✅ Installation completed successfully!"));
}

#[test]
fn run_continues_after_missing_fragment() {
    let fx = Fixture::new();
    fx.write_source("keybindings.json", json!([{"key": "ctrl+k", "command": "bar"}]));

    let mut out = Vec::new();
    let report = fx.installer().run(&mut out).expect("run");

    assert!(!report.settings.is_installed());
    assert!(report.keybindings.is_installed());
    assert_eq!(report.exit_code(), 1);

    let text = output_of(out);
    assert!(text.contains("📦 Required Extensions:"), "Extensions still listed");
    assert!(text.contains("❌ Installation completed with errors"));
    assert_eq!(
        fx.read_target("keybindings.json"),
        json!([{"key": "ctrl+k", "command": "bar"}])
    );
}

#[test]
fn run_output_orders_steps() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({}));
    fx.write_source("keybindings.json", json!([]));

    let mut out = Vec::new();
    fx.installer().run(&mut out).expect("run");
    let text = output_of(out);

    let settings = text.find("Installing settings to:").expect("settings line");
    let keybindings = text.find("Installing keybindings to:").expect("keybindings line");
    let extensions = text.find("📦 Required Extensions:").expect("extensions line");
    assert!(settings < keybindings && keybindings < extensions);
}

#[test]
fn from_config_uses_explicit_target_and_suffix() {
    let config = ResolvedConfig {
        target_dir: Some(PathBuf::from("/target/User")),
        source_dir: PathBuf::from("/fragments"),
        backup_suffix: ".bak".to_string(),
        ..ResolvedConfig::default()
    };

    let installer = Installer::from_config(&config, Platform::Linux).expect("installer");

    assert_eq!(installer.target_dir(), Path::new("/target/User"));
    assert_eq!(installer.source_dir(), Path::new("/fragments"));
    assert_eq!(
        installer,
        Installer::new("/fragments", "/target/User").with_backup_suffix(".bak")
    );
}

#[test]
fn written_files_parse_back_into_documents() {
    let fx = Fixture::new();
    fx.write_source("setting.json", json!({"x": [1, 2]}));
    fx.write_source(
        "keybindings.json",
        json!([{"key": "ctrl+j", "command": "foo", "args": {"n": 1}}]),
    );

    let mut sink = Vec::new();
    fx.installer().run(&mut sink).expect("run");

    let settings: SettingsDocument =
        serde_json::from_value(fx.read_target("settings.json")).expect("settings document");
    let bindings: KeybindingList =
        serde_json::from_value(fx.read_target("keybindings.json")).expect("keybinding list");
    assert_eq!(settings["x"], json!([1, 2]));
    assert_eq!(bindings[0].key(), Some("ctrl+j"));
    assert_eq!(bindings[0].fields()["args"], json!({"n": 1}));
    assert_ne!(bindings[0], BindingRecord::new("ctrl+j", "foo"));
}
