// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use autonomic::{AutonomicError, PresetStore, RangeTable, DEFAULT_PRESET};
use serde_yaml::Value;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_open_creates_directory_and_default_preset() {
    let root = tempdir().unwrap();
    let dir = root.path().join("param_ranges");

    let store = PresetStore::open(&dir, DEFAULT_PRESET, &RangeTable::default()).unwrap();
    assert!(dir.join("Default.yaml").is_file());
    assert_eq!(store.list().unwrap(), vec!["Default".to_string()]);
}

#[test]
fn test_open_keeps_existing_default() {
    let root = tempdir().unwrap();
    let store = PresetStore::new(root.path());
    let mut custom = RangeTable::default();
    custom.insert("temp_lo", Value::from(0.9));
    store.save(DEFAULT_PRESET, &custom).unwrap();

    let reopened = PresetStore::open(root.path(), DEFAULT_PRESET, &RangeTable::default()).unwrap();
    assert_eq!(reopened.read(DEFAULT_PRESET).unwrap(), custom);
}

#[test]
fn test_save_then_load_round_trip() {
    let root = tempdir().unwrap();
    let store = PresetStore::new(root.path());
    let mut table = RangeTable::default();
    table.insert("penalty_alpha_hi", Value::from(3.25));
    table.insert("top_k_hi", Value::from(40));
    table.set_debug(false);

    store.save("Agitated", &table).unwrap();
    let mut loaded = RangeTable::empty();
    let name = store.load_into("Agitated", &mut loaded).unwrap();

    assert_eq!(name, "Agitated");
    assert_eq!(loaded, table);
}

#[test]
fn test_load_merges_into_live_table() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("Partial.yaml"), "temp_hi: 1.9\nextra_note: calm\n").unwrap();
    let store = PresetStore::new(root.path());

    let mut live = RangeTable::default();
    store.load_into("Partial", &mut live).unwrap();

    assert_eq!(live.numeric("temp_hi").unwrap(), 1.9);
    assert_eq!(live.numeric("temp_lo").unwrap(), 0.4);
    assert_eq!(live.get("extra_note"), Some(&Value::from("calm")));
}

#[test]
fn test_list_filters_and_strips_extension() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("Calm.yaml"), "temp_lo: 0.3\n").unwrap();
    fs::write(root.path().join("Loud.YAML"), "temp_lo: 0.5\n").unwrap();
    fs::write(root.path().join("notes.txt"), "ignore me").unwrap();
    fs::create_dir(root.path().join("nested.yaml")).unwrap();

    let names = PresetStore::new(root.path()).list().unwrap();
    assert_eq!(names, vec!["Calm".to_string(), "Loud".to_string()]);
}

#[test]
fn test_list_creates_missing_directory() {
    let root = tempdir().unwrap();
    let dir = root.path().join("fresh");
    let names = PresetStore::new(&dir).list().unwrap();
    assert!(names.is_empty());
    assert!(dir.is_dir());
}

#[test]
fn test_missing_preset_is_io_error() {
    let root = tempdir().unwrap();
    let store = PresetStore::new(root.path());
    let mut table = RangeTable::default();
    let err = store.load_into("Nope", &mut table).unwrap_err();
    assert!(matches!(err, AutonomicError::PresetIo { .. }));
    assert_eq!(table, RangeTable::default());
}

#[test]
fn test_malformed_preset_is_parse_error() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("Broken.yaml"), "- just\n- a list\n").unwrap();
    let store = PresetStore::new(root.path());
    let err = store.read("Broken").unwrap_err();
    assert!(matches!(err, AutonomicError::PresetParse { .. }));
    assert!(err.to_string().contains("Broken.yaml"));
}

#[test]
fn test_path_escaping_names_are_rejected() {
    let root = tempdir().unwrap();
    let store = PresetStore::new(root.path().join("ranges"));
    let err = store.save("../outside", &RangeTable::default()).unwrap_err();
    assert!(matches!(err, AutonomicError::InvalidPresetName { .. }));
    assert!(!root.path().join("outside.yaml").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_names_are_not_listed() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = tempdir().unwrap();
    let store = PresetStore::new(root.path());
    store.save("Calm", &RangeTable::default()).unwrap();
    fs::write(root.path().join(OsStr::from_bytes(b"bad\xff.yaml")), "temp_lo: 0.1\n").unwrap();

    assert_eq!(store.list().unwrap(), vec!["Calm".to_string()]);
}
