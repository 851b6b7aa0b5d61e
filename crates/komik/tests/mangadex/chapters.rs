use super::*;

const CHAPTER: &str = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";

fn at_home(data: &[&str], data_saver: &[&str]) -> Value {
  json!({
    "result": "ok",
    "baseUrl": "https://cdn.test/",
    "chapter": {"hash": "h4sh", "data": data, "dataSaver": data_saver}
  })
}

fn chapter_details() -> Value {
  json!({
    "data": {
      "id": CHAPTER,
      "attributes": {"chapter": "12", "title": "Festival", "volume": "2", "translatedLanguage": "id"}
    }
  })
}

#[traced_test]
#[tokio::test]
async fn test_chapters_resolve_groups_once() {
  let feed = collection(
    vec![
      chapter_json("c3", Some("3"), &["g1"], None),
      chapter_json("c2", Some("2"), &["g1", "g2"], None),
      chapter_json("c1", None, &[], None),
    ],
    0,
    3,
  );
  let upstream = Arc::new(
    Upstream::new()
      .json("/chapter", feed)
      .json("/group/g1", group_json("g1", "Alpha Scans"))
      .reply("/group/g2", Reply::status(500)),
  );

  let chapters = service(&upstream, 0).chapters(SERIES).await.unwrap();
  let ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
  assert_eq!(ids, ["c3", "c2", "c1"]);
  assert_eq!(chapters[0].group_names, vec!["Alpha Scans"]);
  assert_eq!(chapters[1].group_ids, vec!["g1", "g2"]);
  assert_eq!(chapters[1].group_names, vec!["Alpha Scans", UNKNOWN_GROUP]);
  assert!(chapters[2].group_names.is_empty());
  assert_eq!(chapters[2].chapter, None);
  assert_eq!(chapters[0].language, "en");
  assert_eq!(chapters[0].pages, Some(20));
  assert!(chapters[0].published_at.is_some());

  assert_eq!(upstream.hits("/group/g1"), 1);
  assert_eq!(upstream.hits("/group/g2"), 1);
  assert_eq!(upstream.query("/chapter", "manga"), vec![SERIES]);
  assert_eq!(upstream.query("/chapter", "order[chapter]"), vec!["desc"]);
  assert_eq!(upstream.query("/chapter", "translatedLanguage[]"), vec!["en"]);
}

#[traced_test]
#[tokio::test]
async fn test_chapters_page_through_total() {
  let first: Vec<Value> =
    (0..100).map(|i| chapter_json(&format!("c{i}"), Some(i.to_string().as_str()), &[], None)).collect();
  let second = vec![chapter_json("c100", Some("100"), &[], None)];
  let upstream = Arc::new(
    Upstream::new().json("/chapter", collection(first, 0, 101)).json("/chapter", collection(second, 100, 101)),
  );

  let chapters = service(&upstream, 0).chapters(SERIES).await.unwrap();
  assert_eq!(chapters.len(), 101);
  assert_eq!(upstream.hits("/chapter"), 2);

  let offsets: Vec<String> = upstream
    .requests()
    .iter()
    .flat_map(|url| url.query_pairs().filter(|(k, _)| k == "offset").map(|(_, v)| v.into_owned()).collect::<Vec<_>>())
    .collect();
  assert_eq!(offsets, ["0", "100"]);
}

#[traced_test]
#[tokio::test]
async fn test_chapters_failure_is_wrapped() {
  let upstream = Arc::new(Upstream::new().reply("/chapter", Reply::status(502)));
  let err = service(&upstream, 1).chapters(SERIES).await.unwrap_err();
  assert!(err.to_string().starts_with("Failed to load chapters:"), "{err}");
  assert_eq!(upstream.hits("/chapter"), 2);
}

#[traced_test]
#[tokio::test]
async fn test_navigation() {
  let feed = collection(
    vec![
      chapter_json("c1", Some("1"), &[], None),
      chapter_json("c2", Some("2"), &[], None),
      chapter_json("c3", Some("3"), &[], None),
    ],
    0,
    3,
  );
  let upstream = Arc::new(Upstream::new().json("/chapter", feed));
  let mangadex = service(&upstream, 0);

  let middle = mangadex.chapter_navigation(SERIES, "c2").await.unwrap();
  assert_eq!(middle.prev.map(|c| c.id), Some("c1".to_string()));
  assert_eq!(middle.next.map(|c| (c.id, c.chapter)), Some(("c3".to_string(), Some("3".to_string()))));

  let first = mangadex.chapter_navigation(SERIES, "c1").await.unwrap();
  assert!(first.prev.is_none());
  assert_eq!(first.next.map(|c| c.id), Some("c2".to_string()));

  let last = mangadex.chapter_navigation(SERIES, "c3").await.unwrap();
  assert_eq!(last.prev.map(|c| c.id), Some("c2".to_string()));
  assert!(last.next.is_none());

  let unknown = mangadex.chapter_navigation(SERIES, "zzz").await.unwrap();
  assert!(unknown.prev.is_none() && unknown.next.is_none());

  assert_eq!(upstream.query("/chapter", "order[chapter]"), vec!["asc"]);
}

#[traced_test]
#[tokio::test]
async fn test_navigation_propagates_failures() {
  let upstream = Arc::new(Upstream::new().reply("/chapter", Reply::status(500)));
  let err = service(&upstream, 0).chapter_navigation(SERIES, "c1").await.unwrap_err();
  assert!(err.to_string().starts_with("Failed to load chapter navigation:"), "{err}");
}

#[traced_test]
#[tokio::test]
async fn test_pages_low_quality() {
  let upstream = Arc::new(
    Upstream::new()
      .json(&format!("/at-home/server/{CHAPTER}"), at_home(&["1.png", "2.png"], &["1.jpg", "2.jpg"]))
      .json(&format!("/chapter/{CHAPTER}"), chapter_details()),
  );

  let pages = service(&upstream, 0).chapter_pages(CHAPTER, Quality::Low).await.unwrap();
  assert_eq!(pages.image_set, ImageSet::DataSaver);
  assert_eq!(pages.pages, vec![
    "https://cdn.test/data-saver/h4sh/1.jpg",
    "https://cdn.test/data-saver/h4sh/2.jpg"
  ]);
  assert_eq!(pages.title, "Festival");
  assert_eq!(pages.chapter.as_deref(), Some("12"));
  assert_eq!(pages.volume.as_deref(), Some("2"));
  assert_eq!(pages.translated_language, "id");
  assert_eq!(pages.hash, "h4sh");
}

#[traced_test]
#[tokio::test]
async fn test_pages_fall_back_to_full_size() {
  let upstream = Arc::new(
    Upstream::new()
      .json(&format!("/at-home/server/{CHAPTER}"), at_home(&["1.png"], &[]))
      .reply(&format!("/chapter/{CHAPTER}"), Reply::status(404)),
  );

  let pages = service(&upstream, 0).chapter_pages(CHAPTER, Quality::Medium).await.unwrap();
  assert_eq!(pages.image_set, ImageSet::Data);
  assert_eq!(pages.pages, vec!["https://cdn.test/data/h4sh/1.png"]);
  // Details lookup failed: defaults
  assert_eq!(pages.title, "");
  assert_eq!(pages.translated_language, "en");
}

#[traced_test]
#[tokio::test]
async fn test_pages_without_images_fail() {
  let upstream = Arc::new(
    Upstream::new()
      .json(&format!("/at-home/server/{CHAPTER}"), at_home(&[], &[]))
      .json(&format!("/chapter/{CHAPTER}"), chapter_details()),
  );

  let err = service(&upstream, 0).chapter_pages(CHAPTER, Quality::High).await.unwrap_err();
  assert!(matches!(cause(&err), KomikError::NoImageData));
  assert_eq!(err.to_string(), "Failed to load chapter: no image data found in the chapter");
}

#[traced_test]
#[tokio::test]
async fn test_pages_rate_limited_then_served() {
  let upstream = Arc::new(
    Upstream::new()
      .reply(&format!("/at-home/server/{CHAPTER}"), Reply::rate_limited(Some("0")))
      .reply(&format!("/at-home/server/{CHAPTER}"), Reply::rate_limited(Some("0")))
      .json(&format!("/at-home/server/{CHAPTER}"), at_home(&["1.png"], &["1.jpg"]))
      .json(&format!("/chapter/{CHAPTER}"), chapter_details()),
  );

  let pages = service(&upstream, 3).chapter_pages(CHAPTER, Quality::High).await.unwrap();
  assert_eq!(pages.pages.len(), 1);
  assert_eq!(upstream.hits(&format!("/at-home/server/{CHAPTER}")), 3);
}
