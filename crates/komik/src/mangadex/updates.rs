use futures::future::join_all;

use super::*;

/// Label used when a chapter has no number.
const UNNUMBERED_CHAPTER: &str = "Chapter ?";

impl<T: Transport> MangaDex<T> {
  /// The most recently published chapters in the configured languages, with their series.
  ///
  /// Series details are fetched once per distinct series, concurrently. Chapters whose series
  /// cannot be loaded are dropped with a warning rather than failing the whole list.
  pub async fn latest_updates(&self, limit: u32) -> Result<Vec<LatestUpdate>> {
    self.fetch_latest_updates(limit).await.map_err(|e| e.context("latest updates"))
  }

  async fn fetch_latest_updates(&self, limit: u32) -> Result<Vec<LatestUpdate>> {
    let mut params = vec![
      ("limit", limit.clamp(1, MAX_PAGE_SIZE).to_string()),
      ("order[publishAt]", "desc".to_string()),
      ("includes[]", "manga".to_string()),
    ];
    params.extend(self.language_params());
    let page: Collection<ChapterData> = self.get("chapter", params).await?;

    let series_ids: BTreeSet<&str> = page.data.iter().filter_map(ChapterData::manga_id).collect();
    let series: BTreeMap<&str, SeriesSummary> =
      join_all(series_ids.into_iter().map(|id| async move { (id, self.series_summary(id).await) }))
        .await
        .into_iter()
        .filter_map(|(id, summary)| match summary {
          Ok(summary) => Some((id, summary)),
          Err(e) => {
            warn!("Skipping updates for series {id}: {e}");
            None
          },
        })
        .collect();

    let now = Utc::now();
    Ok(
      page
        .data
        .iter()
        .filter_map(|chapter| {
          let summary = series.get(chapter.manga_id()?)?;
          let attributes = &chapter.attributes;
          Some(LatestUpdate {
            chapter_id:    chapter.id.clone(),
            series_id:     summary.id.clone(),
            title:         summary.title.clone(),
            chapter:       attributes
              .chapter
              .as_deref()
              .map_or_else(|| UNNUMBERED_CHAPTER.to_string(), |n| format!("Chapter {n}")),
            published_at:  attributes.publish_at,
            relative_time: attributes
              .publish_at
              .map_or_else(String::new, |published| relative_time(published, now)),
            cover_url:     summary.cover_url.clone(),
          })
        })
        .collect(),
    )
  }

  /// A single series reduced to a list entry.
  async fn series_summary(&self, id: &str) -> Result<SeriesSummary> {
    let Envelope { data }: Envelope<MangaData> =
      self.get(&format!("manga/{id}"), [("includes[]", "cover_art")]).await?;
    Ok(self.summary(&data))
  }
}
