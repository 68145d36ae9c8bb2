use super::*;

#[test]
fn unwritten_slot_reads_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.read("missing").unwrap(), None);
}

#[test]
fn write_replaces_slot() {
    let storage = MemoryStorage::new();
    storage.write("k", "one").unwrap();
    storage.write("k", "two").unwrap();
    assert_eq!(storage.read("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn seeded_slot_is_readable() {
    let storage = MemoryStorage::new().with_slot("k", "{}");
    assert_eq!(storage.get("k").as_deref(), Some("{}"));
}

#[test]
fn remove_clears_slot() {
    let storage = MemoryStorage::new().with_slot("k", "v");
    assert_eq!(storage.remove("k").as_deref(), Some("v"));
    assert_eq!(storage.get("k"), None);
}

#[test]
fn quota_rejects_oversized_write_and_keeps_old_value() {
    let storage = MemoryStorage::with_quota(8);
    storage.write("k", "abc").unwrap();

    let err = storage.write("k", "abcdefgh").unwrap_err();
    match err {
        StorageError::QuotaExceeded { key, needed, quota } => {
            assert_eq!(key, "k");
            assert_eq!(needed, 9);
            assert_eq!(quota, 8);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(storage.get("k").as_deref(), Some("abc"));
}

#[test]
fn quota_counts_other_slots() {
    let storage = MemoryStorage::with_quota(10).with_slot("a", "1234");
    assert_eq!(storage.used_bytes(), 5);
    assert!(storage.write("b", "12345").is_err());
    assert!(storage.write("b", "123").is_ok());
}

#[test]
fn shared_reference_is_storage() {
    fn write_through<S: KeyValueStorage>(storage: S) {
        storage.write("k", "v").unwrap();
    }

    let storage = MemoryStorage::new();
    write_through(&storage);
    assert_eq!(storage.get("k").as_deref(), Some("v"));
}
