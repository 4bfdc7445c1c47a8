use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of metadata shapes that can be attached to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Episode,
    MultiEpisode,
    Movie,
    MoviePart,
    AudioTrack,
    SimpleFileInfo,
}

impl MetadataKind {
    pub const ALL: [MetadataKind; 6] = [
        MetadataKind::Episode,
        MetadataKind::MultiEpisode,
        MetadataKind::Movie,
        MetadataKind::MoviePart,
        MetadataKind::AudioTrack,
        MetadataKind::SimpleFileInfo,
    ];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub series_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airdate: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<i64>,
}

impl Episode {
    pub fn new(series_name: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            series_name: series_name.into(),
            season: Some(season),
            episode: Some(episode),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.series_name)?;
        match (self.season, self.episode, self.special) {
            (Some(s), Some(e), _) => write!(f, " - {}x{:02}", s, e)?,
            (None, Some(e), _) => write!(f, " - {:02}", e)?,
            (_, None, Some(sp)) => write!(f, " - Special {}", sp)?,
            _ => {}
        }
        if let Some(title) = &self.title {
            write!(f, " - {}", title)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiEpisode {
    pub episodes: Vec<Episode>,
}

impl fmt::Display for MultiEpisode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.episodes.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join(" & "))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Movie {
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year: Some(year),
            ..Default::default()
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.name, year),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One file of a movie that is split across several files (CD1, CD2, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePart {
    pub movie: Movie,
    pub part_index: u32,
    pub part_count: u32,
}

impl fmt::Display for MoviePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}/{}]", self.movie, self.part_index, self.part_count)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
}

impl fmt::Display for AudioTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artist = self.artist.as_deref().unwrap_or("Unknown Artist");
        let title = self
            .track_title
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("Unknown Title");
        write!(f, "{} - {}", artist, title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleFileInfo {
    pub path: String,
    pub length: u64,
}

impl fmt::Display for SimpleFileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.path, self.length)
    }
}

/// A metadata value as attached to a file. Payloads are opaque to the
/// attachment layer; only the variant decides how the value is tagged.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataObject {
    Episode(Episode),
    MultiEpisode(MultiEpisode),
    Movie(Movie),
    MoviePart(MoviePart),
    AudioTrack(AudioTrack),
    SimpleFileInfo(SimpleFileInfo),
}

impl MetadataObject {
    pub fn kind(&self) -> MetadataKind {
        match self {
            MetadataObject::Episode(_) => MetadataKind::Episode,
            MetadataObject::MultiEpisode(_) => MetadataKind::MultiEpisode,
            MetadataObject::Movie(_) => MetadataKind::Movie,
            MetadataObject::MoviePart(_) => MetadataKind::MoviePart,
            MetadataObject::AudioTrack(_) => MetadataKind::AudioTrack,
            MetadataObject::SimpleFileInfo(_) => MetadataKind::SimpleFileInfo,
        }
    }
}

impl fmt::Display for MetadataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataObject::Episode(v) => fmt::Display::fmt(v, f),
            MetadataObject::MultiEpisode(v) => fmt::Display::fmt(v, f),
            MetadataObject::Movie(v) => fmt::Display::fmt(v, f),
            MetadataObject::MoviePart(v) => fmt::Display::fmt(v, f),
            MetadataObject::AudioTrack(v) => fmt::Display::fmt(v, f),
            MetadataObject::SimpleFileInfo(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<Episode> for MetadataObject {
    fn from(value: Episode) -> Self {
        MetadataObject::Episode(value)
    }
}

impl From<MultiEpisode> for MetadataObject {
    fn from(value: MultiEpisode) -> Self {
        MetadataObject::MultiEpisode(value)
    }
}

impl From<Movie> for MetadataObject {
    fn from(value: Movie) -> Self {
        MetadataObject::Movie(value)
    }
}

impl From<MoviePart> for MetadataObject {
    fn from(value: MoviePart) -> Self {
        MetadataObject::MoviePart(value)
    }
}

impl From<AudioTrack> for MetadataObject {
    fn from(value: AudioTrack) -> Self {
        MetadataObject::AudioTrack(value)
    }
}

impl From<SimpleFileInfo> for MetadataObject {
    fn from(value: SimpleFileInfo) -> Self {
        MetadataObject::SimpleFileInfo(value)
    }
}
