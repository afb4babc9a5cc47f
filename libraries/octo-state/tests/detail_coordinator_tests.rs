//! Behavior of `UserDetailCoordinator`

use octo_core::UserCache;
use octo_state::{UserDetailCoordinator, UserDetailIntent, USER_NOT_FOUND};

use test_helpers::{user, BreakableCache, TestCache, DISK_GONE, WAIT};

async fn settled(coordinator: &UserDetailCoordinator) {
    tokio::time::timeout(WAIT, coordinator.wait_until_idle())
        .await
        .expect("coordinator never settled");
}

#[tokio::test]
async fn load_user_finds_cached_record() {
    let cache = TestCache::with_users(&[user(1, "mojombo"), user(2, "defunkt")]).await;
    let coordinator = UserDetailCoordinator::new(cache.handle());

    coordinator.send_intent(UserDetailIntent::LoadUser(2));
    settled(&coordinator).await;

    let state = coordinator.state();
    assert_eq!(state.user.unwrap().login.as_deref(), Some("defunkt"));
    assert!(!state.is_loading);
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn load_user_reports_missing_id() {
    let cache = TestCache::with_users(&[user(1, "mojombo")]).await;
    let coordinator = UserDetailCoordinator::new(cache.handle());

    coordinator.send_intent(UserDetailIntent::LoadUser(404));
    settled(&coordinator).await;

    let state = coordinator.state();
    assert!(state.user.is_none());
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some(USER_NOT_FOUND));
    assert_eq!(USER_NOT_FOUND, "User not found");
}

#[tokio::test]
async fn not_found_is_not_remembered() {
    let cache = TestCache::new().await;
    let coordinator = UserDetailCoordinator::new(cache.handle());

    coordinator.send_intent(UserDetailIntent::LoadUser(9));
    settled(&coordinator).await;
    assert_eq!(coordinator.state().error_message.as_deref(), Some(USER_NOT_FOUND));

    cache.cache.insert_users(&[user(9, "late-arrival")]).await.unwrap();

    coordinator.send_intent(UserDetailIntent::LoadUser(9));
    settled(&coordinator).await;

    let state = coordinator.state();
    assert_eq!(state.user.map(|u| u.id), Some(9));
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn navigate_back_emits_true() {
    let cache = TestCache::new().await;
    let coordinator = UserDetailCoordinator::new(cache.handle());
    let mut back = coordinator.back_navigation();

    coordinator.send_intent(UserDetailIntent::NavigateBack);

    let event = tokio::time::timeout(WAIT, back.recv()).await.unwrap().unwrap();
    assert!(event);
}

#[tokio::test]
async fn lookup_failure_reports_message() {
    let cache = BreakableCache::with_users(&[user(1, "mojombo")]).await;
    let coordinator = UserDetailCoordinator::new(cache.clone());

    cache.break_storage();
    coordinator.send_intent(UserDetailIntent::LoadUser(1));
    settled(&coordinator).await;

    let state = coordinator.state();
    assert!(state.user.is_none());
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some(DISK_GONE));
}

#[tokio::test]
async fn lookup_failure_keeps_previous_user() {
    let cache = BreakableCache::with_users(&[user(1, "mojombo"), user(2, "defunkt")]).await;
    let coordinator = UserDetailCoordinator::new(cache.clone());

    coordinator.send_intent(UserDetailIntent::LoadUser(1));
    settled(&coordinator).await;

    cache.break_storage();
    coordinator.send_intent(UserDetailIntent::LoadUser(2));
    settled(&coordinator).await;

    let state = coordinator.state();
    assert_eq!(state.user.map(|u| u.id), Some(1));
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some(DISK_GONE));
}
