use futures::future::join_all;

use super::*;

/// Deepest offset the chapter feed serves; MangaDex rejects `offset + limit` beyond 10 000.
const MAX_FEED_OFFSET: u32 = 10_000;

/// Picks the manifest for `quality`, falling back to the other one when it is empty.
///
/// ```
/// use komik::{
///   mangadex::{select_images, wire::AtHomeChapter},
///   models::{ImageSet, Quality},
/// };
///
/// let manifest = AtHomeChapter {
///   hash:       "h".to_string(),
///   data:       vec!["1.png".to_string()],
///   data_saver: vec![],
/// };
/// let (set, files) = select_images(&manifest, Quality::Low).unwrap();
/// assert_eq!(set, ImageSet::Data);
/// assert_eq!(files, ["1.png".to_string()]);
/// ```
///
/// # Errors
///
/// [`KomikError::NoImageData`] when both manifests are empty.
pub fn select_images(manifest: &AtHomeChapter, quality: Quality) -> Result<(ImageSet, &[String])> {
  let preferred = quality.preferred_set();
  [preferred, preferred.other()]
    .into_iter()
    .map(|set| (set, manifest.files(set)))
    .find(|(_, files)| !files.is_empty())
    .ok_or(KomikError::NoImageData)
}

impl<T: Transport> MangaDex<T> {
  /// Every chapter of a series in the configured languages, newest first, with group names.
  ///
  /// The feed is paged through until the reported total is reached. Each distinct scanlation group
  /// is looked up once, concurrently; groups that fail to resolve are shown as
  /// [`UNKNOWN_GROUP`].
  pub async fn chapters(&self, series_id: &str) -> Result<Vec<ChapterListing>> {
    self.fetch_chapters(series_id).await.map_err(|e| e.context("chapters"))
  }

  async fn fetch_chapters(&self, series_id: &str) -> Result<Vec<ChapterListing>> {
    let feed = self.chapter_feed(series_id, "desc").await?;

    let group_ids: BTreeSet<&str> = feed.iter().flat_map(|chapter| chapter.group_ids()).collect();
    let names: BTreeMap<&str, String> =
      join_all(group_ids.into_iter().map(|id| async move { (id, self.group_name(id).await) }))
        .await
        .into_iter()
        .collect();

    Ok(
      feed
        .iter()
        .map(|chapter| {
          let group_ids: Vec<String> = chapter.group_ids().map(String::from).collect();
          let group_names = group_ids
            .iter()
            .map(|id| names.get(id.as_str()).cloned().unwrap_or_else(|| UNKNOWN_GROUP.to_string()))
            .collect();
          let attributes = &chapter.attributes;
          ChapterListing {
            id: chapter.id.clone(),
            chapter: attributes.chapter.clone(),
            title: attributes.title.clone().filter(|t| !t.is_empty()),
            language: attributes.translated_language.clone().unwrap_or_default(),
            pages: attributes.pages,
            published_at: attributes.publish_at,
            group_ids,
            group_names,
          }
        })
        .collect(),
    )
  }

  /// Name of a scanlation group, or [`UNKNOWN_GROUP`] when the lookup fails.
  async fn group_name(&self, id: &str) -> String {
    let lookup: Result<Envelope<Named>> = self.get(&format!("group/{id}"), NO_PARAMS).await;
    match lookup {
      Ok(Envelope { data }) => data.attributes.name,
      Err(e) => {
        warn!("Could not resolve scanlation group {id}: {e}");
        UNKNOWN_GROUP.to_string()
      },
    }
  }

  /// The chapters before and after `chapter_id` in ascending order.
  ///
  /// # Errors
  ///
  /// Fetch failures are returned as errors. A chapter that is not in the feed is not an error; both
  /// neighbours are simply absent.
  pub async fn chapter_navigation(&self, series_id: &str, chapter_id: &str) -> Result<ChapterNavigation> {
    let feed = self.chapter_feed(series_id, "asc").await.map_err(|e| e.context("chapter navigation"))?;
    let links: Vec<ChapterLink> = feed
      .into_iter()
      .map(|chapter| ChapterLink { id: chapter.id, chapter: chapter.attributes.chapter })
      .collect();
    Ok(ChapterNavigation::locate(&links, chapter_id))
  }

  /// Walks the whole chapter feed of a series in the given `order[chapter]` direction.
  async fn chapter_feed(&self, series_id: &str, order: &str) -> Result<Vec<ChapterData>> {
    let mut chapters = Vec::new();
    let mut offset = 0;

    loop {
      let mut params = vec![
        ("manga", series_id.to_string()),
        ("order[chapter]", order.to_string()),
        ("limit", self.chapter_page_size.to_string()),
        ("offset", offset.to_string()),
      ];
      params.extend(self.language_params());

      let page: Collection<ChapterData> = self.get("chapter", params).await?;
      let received = page.data.len() as u32;
      chapters.extend(page.data);
      offset += received;
      debug!("Chapter feed for {series_id}: {offset} of {}", page.total);

      if received == 0 || offset >= page.total || offset + self.chapter_page_size > MAX_FEED_OFFSET {
        break;
      }
    }
    Ok(chapters)
  }

  /// Page image URLs for a chapter, plus its details when they can be fetched.
  ///
  /// # Errors
  ///
  /// Fails with `Failed to load chapter` when the image server lookup fails or when neither
  /// manifest lists any file. A failed details lookup only leaves the descriptive fields at their
  /// defaults.
  pub async fn chapter_pages(&self, chapter_id: &str, quality: Quality) -> Result<ChapterPages> {
    self.fetch_chapter_pages(chapter_id, quality).await.map_err(|e| e.context("chapter"))
  }

  async fn fetch_chapter_pages(&self, chapter_id: &str, quality: Quality) -> Result<ChapterPages> {
    let at_home: AtHome = self.get(&format!("at-home/server/{chapter_id}"), NO_PARAMS).await?;
    let (image_set, files) = select_images(&at_home.chapter, quality)?;
    if image_set != quality.preferred_set() {
      warn!("No {} images for chapter {chapter_id}, using {}", quality, image_set.path_segment());
    }

    let details: Result<Envelope<ChapterData>> = self.get(&format!("chapter/{chapter_id}"), NO_PARAMS).await;
    let details = match details {
      Ok(Envelope { data }) => data.attributes,
      Err(e) => {
        warn!("Could not fetch details of chapter {chapter_id}: {e}");
        ChapterAttributes::default()
      },
    };

    let base_url = at_home.base_url.trim_end_matches('/');
    let hash = &at_home.chapter.hash;
    let pages = files
      .iter()
      .map(|file| format!("{base_url}/{}/{hash}/{file}", image_set.path_segment()))
      .collect();

    Ok(ChapterPages {
      id: chapter_id.to_string(),
      title: details.title.unwrap_or_default(),
      chapter: details.chapter,
      volume: details.volume,
      translated_language: details.translated_language.unwrap_or_else(|| "en".to_string()),
      hash: hash.clone(),
      image_set,
      pages,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn manifest(data: &[&str], data_saver: &[&str]) -> AtHomeChapter {
    AtHomeChapter {
      hash:       "abc".to_string(),
      data:       data.iter().map(|f| f.to_string()).collect(),
      data_saver: data_saver.iter().map(|f| f.to_string()).collect(),
    }
  }

  #[test]
  fn test_low_prefers_data_saver() {
    let manifest = manifest(&["full.png"], &["small.jpg"]);
    let (set, files) = select_images(&manifest, Quality::Low).unwrap();
    assert_eq!(set, ImageSet::DataSaver);
    assert_eq!(files, ["small.jpg".to_string()]);

    let (set, _) = select_images(&manifest, Quality::Medium).unwrap();
    assert_eq!(set, ImageSet::DataSaver);
  }

  #[test]
  fn test_high_prefers_data() {
    let manifest = manifest(&["full.png"], &["small.jpg"]);
    let (set, files) = select_images(&manifest, Quality::High).unwrap();
    assert_eq!(set, ImageSet::Data);
    assert_eq!(files, ["full.png".to_string()]);
  }

  #[test]
  fn test_empty_preferred_falls_back() {
    let (set, _) = select_images(&manifest(&["full.png"], &[]), Quality::Low).unwrap();
    assert_eq!(set, ImageSet::Data);

    let (set, _) = select_images(&manifest(&[], &["small.jpg"]), Quality::High).unwrap();
    assert_eq!(set, ImageSet::DataSaver);
  }

  #[test]
  fn test_both_empty_is_no_image_data() {
    let err = select_images(&manifest(&[], &[]), Quality::Low).unwrap_err();
    assert!(matches!(err, KomikError::NoImageData));
    assert_eq!(err.to_string(), "no image data found in the chapter");
  }
}
