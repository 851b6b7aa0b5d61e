use super::*;

/// Sort orders supported by [`MangaDex::browse`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesOrder {
  /// Most followed first
  #[default]
  Popular,
  /// Most recently updated first
  LatestUpload,
  /// Most recently added first
  Newest,
  /// Alphabetical
  Title,
  /// Best rated first
  Rating,
}

impl SeriesOrder {
  /// The `order[...]` query pair.
  fn param(self) -> (&'static str, &'static str) {
    match self {
      SeriesOrder::Popular => ("order[followedCount]", "desc"),
      SeriesOrder::LatestUpload => ("order[latestUploadedChapter]", "desc"),
      SeriesOrder::Newest => ("order[createdAt]", "desc"),
      SeriesOrder::Title => ("order[title]", "asc"),
      SeriesOrder::Rating => ("order[rating]", "desc"),
    }
  }
}

impl FromStr for SeriesOrder {
  type Err = KomikError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_lowercase().as_str() {
      "popular" => Ok(SeriesOrder::Popular),
      "latest" => Ok(SeriesOrder::LatestUpload),
      "newest" => Ok(SeriesOrder::Newest),
      "title" => Ok(SeriesOrder::Title),
      "rating" => Ok(SeriesOrder::Rating),
      other => Err(KomikError::Config(format!("Unknown sort order \"{other}\""))),
    }
  }
}

/// Criteria for [`MangaDex::browse`].
///
/// ```
/// use komik::{mangadex::{SeriesFilter, SeriesOrder}, models::SeriesStatus};
///
/// let filter = SeriesFilter::default()
///   .with_title("frieren")
///   .with_status(SeriesStatus::Completed)
///   .ordered_by(SeriesOrder::Rating);
/// assert_eq!(filter.statuses, vec![SeriesStatus::Completed]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesFilter {
  /// Title search text
  pub title:    Option<String>,
  /// Accepted publication statuses; empty accepts all
  pub statuses: Vec<SeriesStatus>,
  /// Tag ids every result must carry
  pub tags:     Vec<String>,
  /// Sort order; `None` leaves ranking to the upstream
  pub order:    Option<SeriesOrder>,
}

impl SeriesFilter {
  /// Restricts results to titles matching `title`.
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  /// Adds an accepted status.
  pub fn with_status(mut self, status: SeriesStatus) -> Self {
    if status != SeriesStatus::Unknown && !self.statuses.contains(&status) {
      self.statuses.push(status);
    }
    self
  }

  /// Adds a required tag.
  pub fn with_tag(mut self, tag_id: impl Into<String>) -> Self {
    self.tags.push(tag_id.into());
    self
  }

  /// Sets the sort order.
  pub fn ordered_by(mut self, order: SeriesOrder) -> Self {
    self.order = Some(order);
    self
  }

  fn params(&self) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
      params.push(("title", title.to_string()));
    }
    params.extend(
      self.statuses.iter().filter_map(|s| s.as_upstream()).map(|s| ("status[]", s.to_string())),
    );
    params.extend(self.tags.iter().map(|tag| ("includedTags[]", tag.clone())));
    if let Some((key, value)) = self.order.map(SeriesOrder::param) {
      params.push((key, value.to_string()));
    }
    params
  }
}

impl<T: Transport> MangaDex<T> {
  /// Full details of a series, with author and artist names when they can be resolved.
  ///
  /// # Errors
  ///
  /// Fails with `Failed to load manga` when the series itself cannot be fetched. Author and artist
  /// failures only leave the corresponding field empty.
  pub async fn series(&self, id: &str) -> Result<Series> {
    self.fetch_series(id).await.map_err(|e| e.context("manga"))
  }

  async fn fetch_series(&self, id: &str) -> Result<Series> {
    let params = [("includes[]", "cover_art"), ("includes[]", "author"), ("includes[]", "artist")];
    let Envelope { data: manga }: Envelope<MangaData> = self.get(&format!("manga/{id}"), params).await?;

    let author = manga.relationship("author");
    let artist = manga.relationship("artist").filter(|artist| author.map(|a| &a.id) != Some(&artist.id));
    let (author, artist) = futures::join!(self.creator_name(author), self.creator_name(artist));

    let attributes = &manga.attributes;
    let tags =
      attributes.tags.iter().filter_map(|tag| self.text(&tag.attributes.name)).map(String::from).collect();

    Ok(Series {
      id: manga.id.clone(),
      title: self.title(&manga),
      cover_url: self.cover_url(&manga),
      description: self.text(&attributes.description).unwrap_or(NO_DESCRIPTION).to_string(),
      status: SeriesStatus::from_upstream(attributes.status.as_deref()),
      year: attributes.year,
      tags,
      author,
      artist,
    })
  }

  /// Name of an author or artist: the included attribute if present, else a lookup.
  async fn creator_name(&self, relationship: Option<&Relationship>) -> Option<String> {
    let relationship = relationship?;
    if let Some(name) = relationship.attribute_str("name") {
      return Some(name.to_string());
    }
    let lookup: Result<Envelope<Named>> = self.get(&format!("author/{}", relationship.id), NO_PARAMS).await;
    match lookup {
      Ok(Envelope { data }) => Some(data.attributes.name),
      Err(e) => {
        warn!("Could not resolve {} {}: {e}", relationship.kind, relationship.id);
        None
      },
    }
  }

  /// Series whose title matches `query`, at most `limit` of them.
  pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<SeriesSummary>> {
    let filter = SeriesFilter::default().with_title(query);
    self.list_series(&filter, limit, 0).await.map_err(|e| e.context("search results"))
  }

  /// Most followed series.
  pub async fn popular(&self, limit: u32, offset: u32) -> Result<Vec<SeriesSummary>> {
    let filter = SeriesFilter::default().ordered_by(SeriesOrder::Popular);
    self.list_series(&filter, limit, offset).await.map_err(|e| e.context("popular manga"))
  }

  /// Series matching an arbitrary filter.
  pub async fn browse(
    &self,
    filter: &SeriesFilter,
    limit: u32,
    offset: u32,
  ) -> Result<Vec<SeriesSummary>> {
    self.list_series(filter, limit, offset).await.map_err(|e| e.context("manga list"))
  }

  /// Most followed series carrying the tag `genre_id`.
  pub async fn by_genre(&self, genre_id: &str, limit: u32, offset: u32) -> Result<Vec<SeriesSummary>> {
    let filter = SeriesFilter::default().with_tag(genre_id).ordered_by(SeriesOrder::Popular);
    self.list_series(&filter, limit, offset).await.map_err(|e| e.context("manga by genre"))
  }

  async fn list_series(&self, filter: &SeriesFilter, limit: u32, offset: u32) -> Result<Vec<SeriesSummary>> {
    let mut params = filter.params();
    params.push(("limit", limit.clamp(1, MAX_PAGE_SIZE).to_string()));
    params.push(("offset", offset.to_string()));
    params.push(("includes[]", "cover_art".to_string()));

    let page: Collection<MangaData> = self.get("manga", params).await?;
    debug!("Listed {} of {} series", page.data.len(), page.total);
    Ok(page.data.iter().map(|manga| self.summary(manga)).collect())
  }

  /// Tags in the `genre` group.
  pub async fn genres(&self) -> Result<Vec<Genre>> {
    let tags = self.fetch_tags().await.map_err(|e| e.context("genres"))?;
    Ok(
      tags
        .into_iter()
        .filter(|tag| tag.group == "genre")
        .map(|tag| Genre { id: tag.id, name: tag.name })
        .collect(),
    )
  }

  /// Every tag, with its group.
  pub async fn tags(&self) -> Result<Vec<Tag>> { self.fetch_tags().await.map_err(|e| e.context("tags")) }

  async fn fetch_tags(&self) -> Result<Vec<Tag>> {
    let page: Collection<TagData> = self.get("manga/tag", NO_PARAMS).await?;
    let mut tags: Vec<Tag> = page
      .data
      .into_iter()
      .map(|tag| Tag {
        name:  self.text(&tag.attributes.name).unwrap_or(&tag.id).to_string(),
        group: tag.attributes.group,
        id:    tag.id,
      })
      .collect();
    tags.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tags)
  }
}
