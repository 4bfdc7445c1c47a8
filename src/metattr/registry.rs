//! # Type Registry
//!
//! Maps each [`MetadataKind`] to the short tag written into the `"@type"`
//! member of an encoded blob, and back.
//!
//! Tags are part of the on-disk format and are shared with attachments
//! written by other tools. They never change when a payload struct is renamed
//! or reshaped, which is why they are spelled out here instead of being
//! derived from Rust type names.

use crate::error::{MetaError, Result};
use crate::model::MetadataKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static STANDARD: Lazy<TypeRegistry> = Lazy::new(|| TypeRegistry::new(&MetadataKind::ALL));

#[derive(Debug)]
pub struct TypeRegistry {
    by_tag: HashMap<&'static str, MetadataKind>,
}

impl TypeRegistry {
    fn new(kinds: &[MetadataKind]) -> Self {
        let by_tag = kinds.iter().map(|&kind| (tag(kind), kind)).collect();
        Self { by_tag }
    }

    /// The registry covering every supported kind.
    pub fn standard() -> &'static TypeRegistry {
        &STANDARD
    }

    pub fn tag_of(&self, kind: MetadataKind) -> &'static str {
        tag(kind)
    }

    pub fn kind_of(&self, tag: &str) -> Result<MetadataKind> {
        self.by_tag
            .get(tag)
            .copied()
            .ok_or_else(|| MetaError::UnknownVariant(tag.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

fn tag(kind: MetadataKind) -> &'static str {
    match kind {
        MetadataKind::Episode => "Episode",
        MetadataKind::MultiEpisode => "MultiEpisode",
        MetadataKind::Movie => "Movie",
        MetadataKind::MoviePart => "MoviePart",
        MetadataKind::AudioTrack => "AudioTrack",
        MetadataKind::SimpleFileInfo => "SimpleFileInfo",
    }
}
