use super::*;

fn scratch() -> (tempfile::TempDir, FileStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("slots"));
    (dir, storage)
}

#[test]
fn missing_slot_reads_none() {
    let (_dir, storage) = scratch();
    assert_eq!(storage.read("messageHighlightedStates").unwrap(), None);
}

#[test]
fn write_creates_directory_and_slot_file() {
    let (_dir, storage) = scratch();
    storage.write("messageHighlightedStates", "{}").unwrap();

    let path = storage.slot_path("messageHighlightedStates").unwrap();
    assert!(path.exists());
    assert_eq!(fs::read_to_string(path).unwrap(), "{}");
}

#[test]
fn write_overwrites_previous_payload() {
    let (_dir, storage) = scratch();
    storage.write("slot", r#"{"1":{"isHighlighted":true}}"#).unwrap();
    storage.write("slot", "{}").unwrap();
    assert_eq!(storage.read("slot").unwrap().as_deref(), Some("{}"));
}

#[test]
fn write_leaves_no_temp_files() {
    let (_dir, storage) = scratch();
    storage.write("slot", "one").unwrap();
    storage.write("slot", "two").unwrap();

    let names: Vec<String> = fs::read_dir(storage.dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["slot.json".to_owned()]);
}

#[test]
fn separate_instances_share_the_directory() {
    let (_dir, storage) = scratch();
    storage.write("slot", "payload").unwrap();

    let reopened = FileStorage::new(storage.dir());
    assert_eq!(reopened.read("slot").unwrap().as_deref(), Some("payload"));
}

#[test]
fn unsafe_keys_are_rejected() {
    let (_dir, storage) = scratch();
    for key in ["", "../escape", "a/b", ".hidden", "with space"] {
        assert!(
            matches!(storage.write(key, "x"), Err(StorageError::InvalidKey(_))),
            "key {key:?} should be rejected"
        );
        assert!(matches!(storage.read(key), Err(StorageError::InvalidKey(_))));
    }
}

#[test]
fn directory_in_place_of_slot_is_io_error() {
    let (_dir, storage) = scratch();
    fs::create_dir_all(storage.slot_path("slot").unwrap()).unwrap();
    assert!(matches!(storage.read("slot"), Err(StorageError::Io { .. })));
    assert!(matches!(storage.write("slot", "x"), Err(StorageError::Io { .. })));

    assert_eq!(entry_names(storage.dir()), vec!["slot.json".to_owned()]);
}

fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(target_os = "linux")]
#[test]
fn failed_temp_write_removes_temp_file() {
    // `/dev/full` fails every write with ENOSPC, like a full disk.
    if !Path::new("/dev/full").exists() {
        return;
    }
    let (_dir, storage) = scratch();
    storage.write("slot", "before").unwrap();

    let temp_path = storage.dir().join("slot.pending.tmp");
    std::os::unix::fs::symlink("/dev/full", &temp_path).unwrap();
    let target = storage.slot_path("slot").unwrap();

    let err = replace_via_temp(&temp_path, &target, "after").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFull);
    assert!(fs::symlink_metadata(&temp_path).is_err());
    assert_eq!(entry_names(storage.dir()), vec!["slot.json".to_owned()]);
    assert_eq!(storage.read("slot").unwrap().as_deref(), Some("before"));
}

#[test]
fn repeated_failed_writes_leave_only_the_slot() {
    let (_dir, storage) = scratch();
    fs::create_dir_all(storage.slot_path("slot").unwrap()).unwrap();

    for _ in 0..3 {
        assert!(storage.write("slot", "x").is_err());
    }
    assert_eq!(entry_names(storage.dir()), vec!["slot.json".to_owned()]);
}
