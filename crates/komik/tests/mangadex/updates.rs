use super::*;

#[traced_test]
#[tokio::test]
async fn test_latest_updates() {
  let feed = collection(
    vec![
      chapter_json("c1", Some("7"), &[], Some("m1")),
      chapter_json("c2", None, &[], Some("m2")),
      chapter_json("c3", Some("1"), &[], Some("m-broken")),
      chapter_json("c4", Some("8"), &[], Some("m1")),
      chapter_json("c5", Some("9"), &[], None),
    ],
    0,
    5,
  );
  let upstream = Arc::new(
    Upstream::new()
      .json("/chapter", feed)
      .json("/manga/m1", json!({"data": manga_json("m1", "One", Some("one.png"))}))
      .json("/manga/m2", json!({"data": manga_json("m2", "Two", None)}))
      .reply("/manga/m-broken", Reply::status(500)),
  );

  let updates = service(&upstream, 0).latest_updates(5).await.unwrap();
  let ids: Vec<&str> = updates.iter().map(|u| u.chapter_id.as_str()).collect();
  assert_eq!(ids, ["c1", "c2", "c4"]);

  assert_eq!(updates[0].title, "One");
  assert_eq!(updates[0].series_id, "m1");
  assert_eq!(updates[0].chapter, "Chapter 7");
  assert_eq!(updates[0].cover_url, "https://uploads.test/covers/m1/one.png.256.jpg");
  assert!(updates[0].relative_time.ends_with("ago"), "{}", updates[0].relative_time);
  assert_eq!(updates[1].chapter, "Chapter ?");
  assert_eq!(updates[1].cover_url, "/placeholder.png");

  // One lookup per series even when it appears twice
  assert_eq!(upstream.hits("/manga/m1"), 1);
  assert_eq!(upstream.query("/chapter", "order[publishAt]"), vec!["desc"]);
  assert_eq!(upstream.query("/chapter", "includes[]"), vec!["manga"]);
}

#[traced_test]
#[tokio::test]
async fn test_latest_updates_feed_failure() {
  let upstream = Arc::new(Upstream::new().reply("/chapter", Reply::rate_limited(Some("0"))));
  let err = service(&upstream, 2).latest_updates(5).await.unwrap_err();
  assert!(matches!(cause(&err), KomikError::RateLimited { attempts: 3 }));
  assert!(err.to_string().starts_with("Failed to load latest updates:"), "{err}");
  assert_eq!(upstream.hits("/chapter"), 3);
}
