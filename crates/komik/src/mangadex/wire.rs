//! Upstream response shapes.
//!
//! Every MangaDex payload is parsed into these types before anything else looks at it. Fields the
//! view models cannot do without are required, so a response missing them fails with
//! [`KomikError::MalformedResponse`] at the client instead of leaking half-filled values into the
//! models. Fields that are routinely absent upstream carry `#[serde(default)]`.

use super::*;

/// Singular endpoint wrapper: `{ "data": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
  /// The wrapped entity
  pub data: T,
}

/// List endpoint wrapper with pagination counters.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
  /// Entities on this page
  pub data:   Vec<T>,
  /// Page size the server applied
  #[serde(default)]
  pub limit:  u32,
  /// Offset of the first entity on this page
  #[serde(default)]
  pub offset: u32,
  /// Total number of entities matching the query
  #[serde(default)]
  pub total:  u32,
}

/// A map from language code to text.
///
/// MangaDex serializes an empty map as `[]`, which is accepted here as an empty map too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocalizedText(pub BTreeMap<String, String>);

/// Link from one entity to another, optionally with the target's attributes expanded.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
  /// Target identifier
  pub id:         String,
  /// Target type, e.g. `cover_art` or `scanlation_group`
  #[serde(rename = "type")]
  pub kind:       String,
  /// Target attributes when requested through `includes[]`
  #[serde(default)]
  pub attributes: Option<serde_json::Value>,
}

/// A manga entity.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaData {
  /// Series identifier
  pub id:            String,
  /// Series attributes
  pub attributes:    MangaAttributes,
  /// Related entities
  #[serde(default)]
  pub relationships: Vec<Relationship>,
}

/// Attributes of a manga entity.
#[derive(Debug, Clone, Deserialize)]
pub struct MangaAttributes {
  /// Titles by language
  pub title:       LocalizedText,
  /// Descriptions by language
  #[serde(default)]
  pub description: LocalizedText,
  /// Publication status
  #[serde(default)]
  pub status:      Option<String>,
  /// Year of first publication
  #[serde(default)]
  pub year:        Option<i32>,
  /// Attached tags
  #[serde(default)]
  pub tags:        Vec<TagData>,
}

/// A tag entity.
#[derive(Debug, Clone, Deserialize)]
pub struct TagData {
  /// Tag identifier
  pub id:         String,
  /// Tag attributes
  pub attributes: TagAttributes,
}

/// Attributes of a tag entity.
#[derive(Debug, Clone, Deserialize)]
pub struct TagAttributes {
  /// Names by language
  pub name:  LocalizedText,
  /// Tag group, e.g. `genre`, `theme`, `format`
  #[serde(default)]
  pub group: String,
}

/// A chapter entity.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterData {
  /// Chapter identifier
  pub id:            String,
  /// Chapter attributes
  pub attributes:    ChapterAttributes,
  /// Related entities
  #[serde(default)]
  pub relationships: Vec<Relationship>,
}

/// Attributes of a chapter entity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
  /// Chapter number as published
  #[serde(default)]
  pub chapter:             Option<String>,
  /// Chapter title
  #[serde(default)]
  pub title:               Option<String>,
  /// Volume number
  #[serde(default)]
  pub volume:              Option<String>,
  /// Translated language code
  #[serde(default)]
  pub translated_language: Option<String>,
  /// Number of pages
  #[serde(default)]
  pub pages:               Option<u32>,
  /// Publication timestamp
  #[serde(default)]
  pub publish_at:          Option<DateTime<Utc>>,
}

/// Response of the chapter image server lookup (`/at-home/server/{id}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHome {
  /// Image server base URL
  pub base_url: String,
  /// Image manifests
  pub chapter:  AtHomeChapter,
}

/// Image manifests of a chapter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeChapter {
  /// Content hash used in page URLs
  pub hash:       String,
  /// Full size file names
  #[serde(default)]
  pub data:       Vec<String>,
  /// Reduced size file names
  #[serde(default)]
  pub data_saver: Vec<String>,
}

/// Any entity whose attributes carry a plain `name`, such as groups and authors.
#[derive(Debug, Clone, Deserialize)]
pub struct Named {
  /// Entity identifier
  pub id:         String,
  /// Entity attributes
  pub attributes: NamedAttributes,
}

/// Attributes of a [`Named`] entity.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedAttributes {
  /// Display name
  pub name: String,
}

/// Languages tried after the preferred one, before falling back to sorted order.
const FALLBACK_LANGUAGES: [&str; 3] = ["en", "ja-ro", "ja"];

impl LocalizedText {
  /// Picks a text: `preferred` first, then [`FALLBACK_LANGUAGES`], then the first remaining
  /// language in sorted order. Empty strings are skipped.
  pub fn resolve(&self, preferred: &str) -> Option<&str> {
    let lookup = |lang: &str| self.0.get(lang).map(String::as_str).filter(|t| !t.trim().is_empty());

    std::iter::once(preferred)
      .chain(FALLBACK_LANGUAGES)
      .find_map(lookup)
      .or_else(|| self.0.values().map(String::as_str).find(|t| !t.trim().is_empty()))
  }

  /// Whether no language has any text.
  pub fn is_empty(&self) -> bool { self.0.values().all(|t| t.trim().is_empty()) }
}

impl<const N: usize> From<[(&str, &str); N]> for LocalizedText {
  fn from(entries: [(&str, &str); N]) -> Self {
    Self(entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
  }
}

impl<'de> Deserialize<'de> for LocalizedText {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where D: serde::Deserializer<'de> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Map(BTreeMap<String, Option<String>>),
      List(Vec<serde_json::Value>),
    }

    match Raw::deserialize(deserializer)? {
      Raw::Map(map) =>
        Ok(Self(map.into_iter().filter_map(|(lang, text)| Some((lang, text?))).collect())),
      Raw::List(list) if list.is_empty() => Ok(Self::default()),
      Raw::List(_) => Err(serde::de::Error::custom("expected a language map")),
    }
  }
}

impl MangaData {
  /// First relationship of the given type.
  pub fn relationship(&self, kind: &str) -> Option<&Relationship> {
    self.relationships.iter().find(|rel| rel.kind == kind)
  }

  /// Cover file name, when the cover art was included.
  pub fn cover_file(&self) -> Option<&str> {
    self.relationship("cover_art")?.attribute_str("fileName")
  }
}

impl ChapterData {
  /// Ids of the credited scanlation groups, in upstream order.
  pub fn group_ids(&self) -> impl Iterator<Item = &str> {
    self.relationships.iter().filter(|rel| rel.kind == "scanlation_group").map(|rel| rel.id.as_str())
  }

  /// Id of the series this chapter belongs to.
  pub fn manga_id(&self) -> Option<&str> {
    self.relationships.iter().find(|rel| rel.kind == "manga").map(|rel| rel.id.as_str())
  }
}

impl Relationship {
  /// A string attribute of the expanded target.
  pub fn attribute_str(&self, key: &str) -> Option<&str> {
    self.attributes.as_ref()?.get(key)?.as_str()
  }
}

impl AtHomeChapter {
  /// File names of one manifest.
  pub fn files(&self, set: ImageSet) -> &[String] {
    match set {
      ImageSet::Data => &self.data,
      ImageSet::DataSaver => &self.data_saver,
    }
  }
}
