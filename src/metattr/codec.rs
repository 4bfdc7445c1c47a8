//! Text encoding for [`MetadataObject`] values.
//!
//! A blob is a single JSON object whose `"@type"` member holds the registry
//! tag and whose remaining members are the variant's payload:
//!
//! ```text
//! {"@type":"Episode","seriesName":"Show","season":1,"episode":2,"title":"Pilot"}
//! ```
//!
//! Both directions are pure and return explicit errors; callers decide whether
//! a bad blob is fatal or just treated as missing.

use crate::error::{MetaError, Result};
use crate::model::{MetadataKind, MetadataObject};
use crate::registry::TypeRegistry;
use serde_json::{Map, Value};

pub const TYPE_KEY: &str = "@type";

pub fn encode(object: &MetadataObject, registry: &TypeRegistry) -> Result<String> {
    validate(object).map_err(MetaError::Encode)?;

    let payload = match object {
        MetadataObject::Episode(v) => serde_json::to_value(v),
        MetadataObject::MultiEpisode(v) => serde_json::to_value(v),
        MetadataObject::Movie(v) => serde_json::to_value(v),
        MetadataObject::MoviePart(v) => serde_json::to_value(v),
        MetadataObject::AudioTrack(v) => serde_json::to_value(v),
        MetadataObject::SimpleFileInfo(v) => serde_json::to_value(v),
    }
    .map_err(|e| MetaError::Encode(e.to_string()))?;

    let Value::Object(fields) = payload else {
        return Err(MetaError::Encode(format!(
            "{} payload is not a JSON object",
            registry.tag_of(object.kind())
        )));
    };

    let mut blob = Map::new();
    blob.insert(
        TYPE_KEY.to_string(),
        Value::String(registry.tag_of(object.kind()).to_string()),
    );
    blob.extend(fields);

    serde_json::to_string(&Value::Object(blob)).map_err(|e| MetaError::Encode(e.to_string()))
}

pub fn decode(text: &str, registry: &TypeRegistry) -> Result<MetadataObject> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| MetaError::Decode(e.to_string()))?;

    let Value::Object(mut fields) = value else {
        return Err(MetaError::Decode("expected a JSON object".to_string()));
    };

    let tag = match fields.remove(TYPE_KEY) {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(MetaError::Decode(format!(
                "type tag must be a string, found {}",
                other
            )))
        }
        None => return Err(MetaError::Decode("missing type tag".to_string())),
    };

    let kind = registry
        .kind_of(&tag)
        .map_err(|e| MetaError::Decode(e.to_string()))?;

    let payload = Value::Object(fields);
    let object = match kind {
        MetadataKind::Episode => serde_json::from_value(payload).map(MetadataObject::Episode),
        MetadataKind::MultiEpisode => {
            serde_json::from_value(payload).map(MetadataObject::MultiEpisode)
        }
        MetadataKind::Movie => serde_json::from_value(payload).map(MetadataObject::Movie),
        MetadataKind::MoviePart => serde_json::from_value(payload).map(MetadataObject::MoviePart),
        MetadataKind::AudioTrack => {
            serde_json::from_value(payload).map(MetadataObject::AudioTrack)
        }
        MetadataKind::SimpleFileInfo => {
            serde_json::from_value(payload).map(MetadataObject::SimpleFileInfo)
        }
    }
    .map_err(|e| MetaError::Decode(format!("invalid {} payload: {}", tag, e)))?;

    Ok(object)
}

/// Checked on encode only; stored blobs written by other tools are read
/// back as they are.
fn validate(object: &MetadataObject) -> std::result::Result<(), String> {
    match object {
        MetadataObject::MultiEpisode(multi) if multi.episodes.is_empty() => {
            Err("MultiEpisode requires at least one episode".to_string())
        }
        MetadataObject::MoviePart(part)
            if part.part_index == 0 || part.part_index > part.part_count =>
        {
            Err(format!(
                "MoviePart index {} out of range 1..={}",
                part.part_index, part.part_count
            ))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AudioTrack, Episode, Movie, MoviePart, MultiEpisode, SimpleFileInfo};

    fn registry() -> &'static TypeRegistry {
        TypeRegistry::standard()
    }

    fn samples() -> Vec<MetadataObject> {
        let mut ep = Episode::new("Show", 1, 2).with_title("Pilot");
        ep.airdate = chrono::NaiveDate::from_ymd_opt(2010, 4, 3);
        ep.id = Some(4711);

        vec![
            ep.clone().into(),
            MultiEpisode {
                episodes: vec![ep, Episode::new("Show", 1, 3).with_title("Second")],
            }
            .into(),
            Movie {
                name: "Alien".to_string(),
                year: Some(1979),
                imdb_id: Some(78748),
                tmdb_id: Some(348),
                language: Some("en".to_string()),
            }
            .into(),
            MoviePart {
                movie: Movie::new("Heat", 1995),
                part_index: 2,
                part_count: 2,
            }
            .into(),
            AudioTrack {
                artist: Some("Artist".to_string()),
                title: Some("Song".to_string()),
                album: Some("Album".to_string()),
                track_index: Some(3),
                track_count: Some(12),
                ..Default::default()
            }
            .into(),
            SimpleFileInfo {
                path: "disc/track01.flac".to_string(),
                length: 31_457_280,
            }
            .into(),
        ]
    }

    #[test]
    fn test_every_kind_survives_encode_and_decode() {
        for object in samples() {
            let text = encode(&object, registry()).unwrap();
            let decoded = decode(&text, registry()).unwrap();
            assert_eq!(decoded, object);
        }
    }

    #[test]
    fn test_encoded_blob_carries_short_tag() {
        let text = encode(&Episode::new("Show", 1, 2).into(), registry()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[TYPE_KEY], "Episode");
        assert_eq!(value["seriesName"], "Show");
    }

    #[test]
    fn test_decode_existing_blob() {
        let text = r#"{"@type":"Episode","seriesName":"Show","season":1,"episode":2,"title":"Pilot"}"#;
        let decoded = decode(text, registry()).unwrap();
        assert_eq!(
            decoded,
            MetadataObject::Episode(Episode::new("Show", 1, 2).with_title("Pilot"))
        );
    }

    #[test]
    fn test_decode_ignores_unknown_members_and_nulls() {
        let text = r#"{"@type":"Movie","name":"Alien","year":1979,"imdbId":null,"aliasNames":[]}"#;
        let decoded = decode(text, registry()).unwrap();
        assert_eq!(decoded, MetadataObject::Movie(Movie::new("Alien", 1979)));
    }

    #[test]
    fn test_unknown_tag_is_decode_failure() {
        let err = decode(r#"{"@type":"Series","name":"x"}"#, registry()).unwrap_err();
        match err {
            MetaError::Decode(msg) => assert!(msg.contains("Series")),
            other => panic!("expected decode failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tag_is_decode_failure() {
        let err = decode(r#"{"name":"Alien"}"#, registry()).unwrap_err();
        assert!(matches!(err, MetaError::Decode(_)));
    }

    #[test]
    fn test_non_string_tag_is_decode_failure() {
        let err = decode(r#"{"@type":3}"#, registry()).unwrap_err();
        assert!(matches!(err, MetaError::Decode(_)));
    }

    #[test]
    fn test_truncated_text_is_decode_failure() {
        let text = encode(&Movie::new("Alien", 1979).into(), registry()).unwrap();
        let truncated = &text[..text.len() / 2];
        assert!(matches!(
            decode(truncated, registry()),
            Err(MetaError::Decode(_))
        ));
    }

    #[test]
    fn test_top_level_array_is_decode_failure() {
        assert!(matches!(
            decode("[1,2,3]", registry()),
            Err(MetaError::Decode(_))
        ));
    }

    #[test]
    fn test_payload_mismatch_is_decode_failure() {
        // a Movie payload under the Episode tag lacks seriesName
        let err = decode(r#"{"@type":"Episode","name":"Alien"}"#, registry()).unwrap_err();
        match err {
            MetaError::Decode(msg) => assert!(msg.contains("Episode")),
            other => panic!("expected decode failure, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_multi_episode_is_rejected_on_encode() {
        let empty: MetadataObject = MultiEpisode { episodes: vec![] }.into();
        assert!(matches!(
            encode(&empty, registry()),
            Err(MetaError::Encode(_))
        ));
    }

    #[test]
    fn test_stored_blobs_decode_without_validation() {
        let decoded = decode(r#"{"@type":"MultiEpisode","episodes":[]}"#, registry()).unwrap();
        assert_eq!(decoded, MultiEpisode { episodes: vec![] }.into());

        let decoded = decode(
            r#"{"@type":"MoviePart","movie":{"name":"Heat"},"partIndex":3,"partCount":2}"#,
            registry(),
        )
        .unwrap();
        assert_eq!(
            decoded,
            MoviePart {
                movie: Movie {
                    name: "Heat".to_string(),
                    ..Default::default()
                },
                part_index: 3,
                part_count: 2,
            }
            .into()
        );
    }

    #[test]
    fn test_movie_part_index_out_of_range_is_rejected() {
        let part: MetadataObject = MoviePart {
            movie: Movie::new("Heat", 1995),
            part_index: 3,
            part_count: 2,
        }
        .into();
        assert!(matches!(encode(&part, registry()), Err(MetaError::Encode(_))));
    }
}
