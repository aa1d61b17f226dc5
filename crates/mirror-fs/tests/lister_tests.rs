use assert_fs::prelude::*;
use mirror_fs::{EntryKind, Error, list_entries};

#[test]
fn empty_directory_lists_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();

    let entries = list_entries(temp.path()).unwrap();

    assert!(entries.is_empty());
}

#[test]
fn lists_files_and_directories_one_level_deep() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("b.txt").write_str("b").unwrap();
    temp.child("a_dir/nested/deep.txt").write_str("deep").unwrap();
    temp.child("c.bin").write_binary(&[0, 1, 2]).unwrap();

    let entries = list_entries(temp.path()).unwrap();

    let names: Vec<_> = entries
        .iter()
        .map(|e| e.name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_dir", "b.txt", "c.bin"]);

    assert_eq!(entries[0].kind, EntryKind::Directory);
    assert_eq!(entries[1].kind, EntryKind::File);
    assert_eq!(entries[2].kind, EntryKind::File);
    assert_eq!(entries[0].path, temp.path().join("a_dir"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = temp.path().join("missing");

    let err = list_entries(&missing).unwrap_err();

    match err {
        Error::Io { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn listing_a_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("plain.txt").touch().unwrap();

    assert!(list_entries(&temp.path().join("plain.txt")).is_err());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn symlinks_are_classified_by_their_target() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("real_dir").create_dir_all().unwrap();
        temp.child("real.txt").write_str("x").unwrap();
        symlink(temp.path().join("real_dir"), temp.path().join("link_dir")).unwrap();
        symlink(temp.path().join("real.txt"), temp.path().join("link.txt")).unwrap();
        symlink(temp.path().join("nowhere"), temp.path().join("dangling")).unwrap();

        let entries = list_entries(temp.path()).unwrap();
        let kind_of = |name: &str| {
            entries
                .iter()
                .find(|e| e.name() == name)
                .map(|e| e.kind)
                .unwrap()
        };

        assert_eq!(kind_of("link_dir"), EntryKind::Directory);
        assert_eq!(kind_of("link.txt"), EntryKind::File);
        assert_eq!(kind_of("dangling"), EntryKind::Other);
    }
}
