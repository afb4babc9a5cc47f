use octo_storage::users;

mod test_helpers;
use test_helpers::{user, users, TestDb};

#[tokio::test]
async fn test_get_all_orders_by_id() {
    let db = TestDb::new().await;

    users::upsert_many(db.pool(), &users([30, 10, 20]))
        .await
        .unwrap();

    let all = users::get_all(db.pool()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
}

#[tokio::test]
async fn test_upsert_replaces_by_id() {
    let db = TestDb::new().await;

    users::upsert_many(db.pool(), &[user(1, "mojombo")])
        .await
        .unwrap();

    let mut renamed = user(1, "mojombo-renamed");
    renamed.site_admin = Some(true);
    users::upsert_many(db.pool(), &[renamed.clone()])
        .await
        .unwrap();

    assert_eq!(users::get_all(db.pool()).await.unwrap().len(), 1);
    let stored = users::get_by_id(db.pool(), 1).await.unwrap().unwrap();
    assert_eq!(stored, renamed);
}

#[tokio::test]
async fn test_all_fields_round_trip_through_storage() {
    let db = TestDb::new().await;

    let mut full = user(583_231, "octocat");
    full.gravatar_id = Some(String::new());
    full.followers_url = Some("https://api.github.com/users/octocat/followers".to_string());
    full.following_url =
        Some("https://api.github.com/users/octocat/following{/other_user}".to_string());
    full.user_view_type = Some("public".to_string());
    full.site_admin = None;

    users::upsert_many(db.pool(), &[full.clone()]).await.unwrap();

    let stored = users::get_by_id(db.pool(), 583_231).await.unwrap();
    assert_eq!(stored, Some(full));
}

#[tokio::test]
async fn test_get_by_id_missing() {
    let db = TestDb::new().await;
    assert!(users::get_by_id(db.pool(), 404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_max_id() {
    let db = TestDb::new().await;

    assert_eq!(users::max_id(db.pool()).await.unwrap(), None);

    users::upsert_many(db.pool(), &users([5, 46, 12]))
        .await
        .unwrap();
    assert_eq!(users::max_id(db.pool()).await.unwrap(), Some(46));
}

#[tokio::test]
async fn test_search_is_case_insensitive_containment() {
    let db = TestDb::new().await;

    users::upsert_many(
        db.pool(),
        &[
            user(1, "mojombo"),
            user(2, "defunkt"),
            user(3, "pjhyett"),
            user(4, "MOJO-fan"),
        ],
    )
    .await
    .unwrap();

    let found = users::search(db.pool(), "Mojo").await.unwrap();
    let ids: Vec<i64> = found.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = TestDb::new().await;

    users::upsert_many(
        db.pool(),
        &[user(1, "under_score"), user(2, "underXscore"), user(3, "100%")],
    )
    .await
    .unwrap();

    let underscore = users::search(db.pool(), "_").await.unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].id, 1);

    let percent = users::search(db.pool(), "%").await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].id, 3);
}

#[tokio::test]
async fn test_search_skips_users_without_login() {
    let db = TestDb::new().await;

    let mut ghost = user(9, "ghost");
    ghost.login = None;
    users::upsert_many(db.pool(), &[ghost, user(10, "ghostwriter")])
        .await
        .unwrap();

    let found = users::search(db.pool(), "ghost").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 10);
}

#[tokio::test]
async fn test_delete_all_reports_rows() {
    let db = TestDb::new().await;

    users::upsert_many(db.pool(), &users(1..=3)).await.unwrap();
    assert_eq!(users::delete_all(db.pool()).await.unwrap(), 3);
    assert_eq!(users::delete_all(db.pool()).await.unwrap(), 0);
    assert!(users::get_all(db.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replace_all_swaps_contents() {
    let db = TestDb::new().await;

    users::upsert_many(db.pool(), &users(1..=5)).await.unwrap();
    users::replace_all(db.pool(), &users([100, 101])).await.unwrap();

    let ids: Vec<i64> = users::get_all(db.pool())
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![100, 101]);
}
