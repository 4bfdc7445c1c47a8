use chrono::Utc;
use metattr::model::{AudioTrack, Episode, Movie, MoviePart, MultiEpisode, SimpleFileInfo};
use metattr::store::{AttributeStore, FsBackend, TimestampAccessor};
use metattr::{MetaAttributes, MetaError, MetadataObject, METADATA_KEY};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch file on a filesystem that supports user attributes, or None
/// when the test environment cannot store them (tmpfs on older kernels,
/// overlay mounts, unsupported platforms).
fn setup() -> Option<(TempDir, PathBuf, FsBackend)> {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("Show.S01E02.mkv");
    fs::write(&file, b"not really a video").unwrap();

    let backend = FsBackend::new();
    match backend.set_attribute(&file, "metattr.support-check", Some("1")) {
        Ok(()) => {
            backend.set_attribute(&file, "metattr.support-check", None).unwrap();
            Some((dir, file, backend))
        }
        Err(e) => {
            eprintln!("skipping, no attribute support: {}", e);
            None
        }
    }
}

#[test]
fn test_fresh_file_has_no_attachments() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let attrs = MetaAttributes::new(&backend, &file);

    assert_eq!(attrs.original_name().unwrap(), None);
    assert_eq!(attrs.object().unwrap(), None);
}

#[test]
fn test_episode_scenario() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let attrs = MetaAttributes::new(&backend, &file);

    attrs.set_original_name(Some("Show.S01E02.mkv")).unwrap();
    attrs
        .set_object(&Episode::new("Show", 1, 2).with_title("Pilot").into())
        .unwrap();

    let reopened = MetaAttributes::new(&backend, &file);
    assert_eq!(
        reopened.original_name().unwrap().as_deref(),
        Some("Show.S01E02.mkv")
    );
    assert_eq!(
        reopened.object().unwrap(),
        Some(MetadataObject::Episode(
            Episode::new("Show", 1, 2).with_title("Pilot")
        ))
    );
}

#[test]
fn test_every_kind_roundtrips_on_disk() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let attrs = MetaAttributes::new(&backend, &file);

    let objects: Vec<MetadataObject> = vec![
        Episode::new("Show", 2, 10).into(),
        MultiEpisode {
            episodes: vec![Episode::new("Show", 2, 10), Episode::new("Show", 2, 11)],
        }
        .into(),
        Movie::new("Alien", 1979).into(),
        MoviePart {
            movie: Movie::new("Heat", 1995),
            part_index: 1,
            part_count: 2,
        }
        .into(),
        AudioTrack {
            artist: Some("Artist".to_string()),
            title: Some("Song".to_string()),
            ..Default::default()
        }
        .into(),
        SimpleFileInfo {
            path: "a/b.flac".to_string(),
            length: 1024,
        }
        .into(),
    ];

    for object in objects {
        attrs.set_object(&object).unwrap();
        assert_eq!(attrs.object().unwrap(), Some(object));
    }
}

#[test]
fn test_attribute_text_is_tagged_json() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    MetaAttributes::new(&backend, &file)
        .set_object(&Movie::new("Alien", 1979).into())
        .unwrap();

    let text = backend.get_attribute(&file, METADATA_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["@type"], "Movie");
    assert_eq!(value["name"], "Alien");
}

#[test]
fn test_clear_twice() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let attrs = MetaAttributes::new(&backend, &file);
    attrs.set_original_name(Some("a.mkv")).unwrap();
    attrs.set_object(&Movie::new("Alien", 1979).into()).unwrap();

    attrs.clear().unwrap();
    attrs.clear().unwrap();

    assert_eq!(attrs.original_name().unwrap(), None);
    assert_eq!(attrs.object().unwrap(), None);
    let leftover = xattr::list(&file)
        .unwrap()
        .filter(|name| name.to_string_lossy().contains("net.filebot"))
        .count();
    assert_eq!(leftover, 0);
}

#[test]
fn test_empty_name_removes_attribute() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let attrs = MetaAttributes::new(&backend, &file);
    attrs.set_original_name(Some("a.mkv")).unwrap();
    attrs.set_original_name(Some("")).unwrap();

    assert_eq!(attrs.original_name().unwrap(), None);
}

#[test]
fn test_foreign_tag_is_decode_failure() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    backend
        .set_attribute(&file, METADATA_KEY, Some(r#"{"@type":"Artwork"}"#))
        .unwrap();

    let attrs = MetaAttributes::new(&backend, &file);
    assert!(matches!(attrs.object(), Err(MetaError::Decode(_))));
}

#[test]
fn test_oversized_value_is_encode_failure() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let attrs = MetaAttributes::new(&backend, &file);
    let previous: MetadataObject = Movie::new("Alien", 1979).into();
    attrs.set_object(&previous).unwrap();

    let big: MetadataObject = SimpleFileInfo {
        path: "x".repeat(10_000),
        length: 1,
    }
    .into();
    // ext4 refuses values over one block; filesystems with larger limits
    // accept the write
    match attrs.set_object(&big) {
        Ok(()) => assert_eq!(attrs.object().unwrap(), Some(big)),
        Err(MetaError::Encode(msg)) => {
            assert!(msg.contains("bytes"));
            assert_eq!(attrs.object().unwrap(), Some(previous));
        }
        Err(other) => panic!("expected Encode, got {:?}", other),
    }
}

#[test]
fn test_non_utf8_metadata_is_decode_failure() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    let name = format!("{}{}", backend.prefix(), METADATA_KEY);
    xattr::set(&file, &name, &[0xff, 0xfe, b'{']).unwrap();

    let attrs = MetaAttributes::new(&backend, &file);
    assert!(matches!(attrs.object(), Err(MetaError::Decode(_))));

    attrs.set_object(&Movie::new("Alien", 1979).into()).unwrap();
    assert_eq!(
        attrs.object().unwrap(),
        Some(Movie::new("Alien", 1979).into())
    );
}

#[test]
fn test_clearing_missing_attribute_succeeds() {
    let Some((_dir, file, backend)) = setup() else {
        return;
    };
    backend.set_attribute(&file, METADATA_KEY, None).unwrap();
    backend.set_attribute(&file, METADATA_KEY, Some("")).unwrap();
    assert_eq!(backend.get_attribute(&file, METADATA_KEY).unwrap(), None);
}

#[test]
fn test_attachments_follow_rename() {
    let Some((dir, file, backend)) = setup() else {
        return;
    };
    MetaAttributes::new(&backend, &file)
        .set_original_name(Some("Show.S01E02.mkv"))
        .unwrap();

    let renamed = dir.path().join("Show - 1x02 - Pilot.mkv");
    fs::rename(&file, &renamed).unwrap();

    let attrs = MetaAttributes::new(&backend, &renamed);
    assert_eq!(
        attrs.original_name().unwrap().as_deref(),
        Some("Show.S01E02.mkv")
    );
}

#[test]
fn test_copy_to_other_file() {
    let Some((dir, file, backend)) = setup() else {
        return;
    };
    let target = dir.path().join("copy.mkv");
    fs::write(&target, b"copy").unwrap();

    let source = MetaAttributes::new(&backend, &file);
    source.set_original_name(Some("orig.mkv")).unwrap();
    source.set_object(&Movie::new("Alien", 1979).into()).unwrap();
    source.copy_to(&target).unwrap();

    let copied = MetaAttributes::new(&backend, &target);
    assert_eq!(copied.original_name().unwrap().as_deref(), Some("orig.mkv"));
    assert_eq!(
        copied.object().unwrap(),
        Some(Movie::new("Alien", 1979).into())
    );
}

#[test]
fn test_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new();
    let attrs = MetaAttributes::new(&backend, dir.path().join("gone.mkv"));

    assert!(attrs.original_name().is_err());
}

#[test]
fn test_creation_time_never_fails() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new();

    let attrs = MetaAttributes::new(&backend, dir.path().join("gone.mkv"));
    assert_eq!(attrs.creation_time().timestamp_millis(), 0);

    let file = dir.path().join("here.mkv");
    fs::write(&file, b"x").unwrap();
    let attrs = MetaAttributes::new(&backend, &file);
    // birth time may not be recorded by every filesystem
    let created = attrs.creation_time();
    assert!(created.timestamp_millis() == 0 || created <= Utc::now());
}

#[cfg(not(any(target_os = "macos", windows)))]
#[test]
fn test_set_creation_time_unsupported_is_io_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("here.mkv");
    fs::write(&file, b"x").unwrap();

    let err = FsBackend::new()
        .set_creation_time(&file, Utc::now())
        .unwrap_err();
    assert!(matches!(err, MetaError::Io(_)));
}
