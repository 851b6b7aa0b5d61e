use komik::mangadex::{SeriesFilter, SeriesOrder};

use super::*;

#[traced_test]
#[tokio::test]
async fn test_series_details() {
  let mut manga = manga_json(SERIES, "Komi Can't Communicate", Some("komi.jpg"));
  manga["relationships"]
    .as_array_mut()
    .unwrap()
    .push(json!({"id": "artist-9", "type": "artist", "attributes": {"name": "Oda Tomohito"}}));
  let upstream = Arc::new(
    Upstream::new()
      .json(&format!("/manga/{SERIES}"), json!({"result": "ok", "data": manga}))
      .json(&format!("/author/author-{SERIES}"), json!({
        "data": {"id": "author", "attributes": {"name": "Tomohito Oda"}}
      })),
  );

  let series = service(&upstream, 0).series(SERIES).await.unwrap();
  assert_eq!(series.title, "Komi Can't Communicate");
  assert_eq!(series.description, "About Komi Can't Communicate");
  assert_eq!(series.status, SeriesStatus::Ongoing);
  assert_eq!(series.year, Some(2020));
  assert_eq!(series.tags, vec!["Action", "School Life"]);
  assert_eq!(series.cover_url, format!("https://uploads.test/covers/{SERIES}/komi.jpg.256.jpg"));
  assert_eq!(series.author.as_deref(), Some("Tomohito Oda"));
  // Included attributes are used without a lookup
  assert_eq!(series.artist.as_deref(), Some("Oda Tomohito"));
  assert_eq!(upstream.hits("/author/artist-9"), 0);

  assert_eq!(upstream.query(&format!("/manga/{SERIES}"), "includes[]"), vec![
    "cover_art",
    "author",
    "artist"
  ]);
}

#[traced_test]
#[tokio::test]
async fn test_series_degrades_without_creators() {
  let mut manga = manga_json(SERIES, "Lonely", None);
  manga["attributes"]["description"] = json!([]);
  manga["attributes"]["status"] = json!("something-new");
  let upstream = Arc::new(
    Upstream::new()
      .json(&format!("/manga/{SERIES}"), json!({"data": manga}))
      .reply(&format!("/author/author-{SERIES}"), Reply::status(500)),
  );

  let series = service(&upstream, 1).series(SERIES).await.unwrap();
  assert_eq!(series.description, "No description available");
  assert_eq!(series.status, SeriesStatus::Unknown);
  assert_eq!(series.cover_url, "/placeholder.png");
  assert_eq!(series.author, None);
  assert_eq!(series.artist, None);
  // The failing author lookup spent its whole budget
  assert_eq!(upstream.hits(&format!("/author/author-{SERIES}")), 2);
}

#[traced_test]
#[tokio::test]
async fn test_artist_same_as_author_is_skipped() {
  let mut manga = manga_json(SERIES, "Solo", None);
  manga["relationships"]
    .as_array_mut()
    .unwrap()
    .push(json!({"id": format!("author-{SERIES}"), "type": "artist"}));
  let upstream = Arc::new(
    Upstream::new()
      .json(&format!("/manga/{SERIES}"), json!({"data": manga}))
      .json(&format!("/author/author-{SERIES}"), json!({
        "data": {"id": "a", "attributes": {"name": "Both"}}
      })),
  );

  let series = service(&upstream, 0).series(SERIES).await.unwrap();
  assert_eq!(series.author.as_deref(), Some("Both"));
  assert_eq!(series.artist, None);
  assert_eq!(upstream.hits(&format!("/author/author-{SERIES}")), 1);
}

#[traced_test]
#[tokio::test]
async fn test_series_failure_is_wrapped() {
  let upstream = Arc::new(Upstream::new().reply(&format!("/manga/{SERIES}"), Reply::status(503)));

  let err = service(&upstream, 2).series(SERIES).await.unwrap_err();
  assert!(err.to_string().starts_with("Failed to load manga:"), "{err}");
  assert!(err.to_string().contains("503"), "{err}");
  assert!(matches!(cause(&err), KomikError::Status(503)));
  assert!(std::error::Error::source(&err).is_some());
  assert_eq!(upstream.hits(&format!("/manga/{SERIES}")), 3);
}

#[traced_test]
#[tokio::test]
async fn test_malformed_series_is_typed() {
  let upstream = Arc::new(
    Upstream::new().json(&format!("/manga/{SERIES}"), json!({"data": {"id": SERIES, "attributes": {}}})),
  );

  let err = service(&upstream, 3).series(SERIES).await.unwrap_err();
  assert!(matches!(cause(&err), KomikError::MalformedResponse(_)), "{err}");
  assert_eq!(upstream.hits(&format!("/manga/{SERIES}")), 1);
}

#[traced_test]
#[tokio::test]
async fn test_search_and_lists() {
  let page = collection(
    vec![manga_json("m1", "First", Some("a.png")), manga_json("m2", "Second", None)],
    0,
    2,
  );
  let upstream = Arc::new(Upstream::new().json("/manga", page));
  let mangadex = service(&upstream, 0);

  let results = mangadex.search("fir", 5).await.unwrap();
  assert_eq!(results.len(), 2);
  assert_eq!(results[0].title, "First");
  assert_eq!(results[0].cover_url, "https://uploads.test/covers/m1/a.png.256.jpg");
  assert_eq!(results[1].cover_url, "/placeholder.png");
  assert_eq!(upstream.query("/manga", "title"), vec!["fir"]);
  assert_eq!(upstream.query("/manga", "limit"), vec!["5"]);
  assert_eq!(upstream.query("/manga", "includes[]"), vec!["cover_art"]);

  mangadex.popular(20, 40).await.unwrap();
  let popular = upstream.requests().last().cloned().unwrap();
  let pairs: Vec<(String, String)> = popular.query_pairs().into_owned().collect();
  assert!(pairs.contains(&("order[followedCount]".to_string(), "desc".to_string())));
  assert!(pairs.contains(&("offset".to_string(), "40".to_string())));

  mangadex.by_genre("t-action", 10, 0).await.unwrap();
  let by_genre = upstream.requests().last().cloned().unwrap();
  assert!(by_genre.query_pairs().any(|(k, v)| k == "includedTags[]" && v == "t-action"));

  let filter = SeriesFilter::default().with_status(SeriesStatus::Completed).ordered_by(SeriesOrder::Title);
  mangadex.browse(&filter, 500, 0).await.unwrap();
  let browse = upstream.requests().last().cloned().unwrap();
  assert!(browse.query_pairs().any(|(k, v)| k == "status[]" && v == "completed"));
  assert!(browse.query_pairs().any(|(k, v)| k == "order[title]" && v == "asc"));
  assert!(browse.query_pairs().any(|(k, v)| k == "limit" && v == "100"));
}

#[traced_test]
#[tokio::test]
async fn test_list_failures_name_the_list() {
  let upstream = Arc::new(Upstream::new().reply("/manga", Reply::status(500)));
  let mangadex = service(&upstream, 0);

  let err = mangadex.search("x", 5).await.unwrap_err();
  assert!(err.to_string().starts_with("Failed to load search results:"), "{err}");
  let err = mangadex.popular(5, 0).await.unwrap_err();
  assert!(err.to_string().starts_with("Failed to load popular manga:"), "{err}");
}

#[traced_test]
#[tokio::test]
async fn test_genres_keep_only_genre_group() {
  let tags = collection(
    vec![
      json!({"id": "t2", "attributes": {"name": {"en": "Romance"}, "group": "genre"}}),
      json!({"id": "t3", "attributes": {"name": {"en": "Long Strip"}, "group": "format"}}),
      json!({"id": "t1", "attributes": {"name": {"en": "Action"}, "group": "genre"}}),
    ],
    0,
    3,
  );
  let upstream = Arc::new(Upstream::new().json("/manga/tag", tags));
  let mangadex = service(&upstream, 0);

  let genres = mangadex.genres().await.unwrap();
  let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
  assert_eq!(names, ["Action", "Romance"]);
  assert_eq!(genres[0].id, "t1");

  let tags = mangadex.tags().await.unwrap();
  assert_eq!(tags.len(), 3);
  assert!(tags.iter().any(|t| t.group == "format" && t.name == "Long Strip"));
}
