// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for selection and action reporting.
//!
//! Each test creates an isolated TestHarness with a temp SQLite store.
//! Tests are independent and order-insensitive.

use std::sync::Arc;

use jitm_config::MessageConfig;
use jitm_core::{DismissalState, DismissalStore, JitmError, UserId};
use jitm_engine::{Context, JitmService, Selector, load_catalog};
use jitm_test_utils::{FailingDismissalStore, TestHarness, message};

fn notices(screen: &str) -> Context {
    Context::new("wp", screen).with_event("admin_notices")
}

// ---- Built-in setup notices ----

#[tokio::test]
async fn test_builtin_notices_follow_site_state() {
    let harness = TestHarness::builder().build().await.unwrap();

    assert_eq!(
        harness.selected_id("1", &notices("upload")).await.unwrap().as_deref(),
        Some("jpsetup-upload")
    );
    assert_eq!(
        harness.selected_id("1", &notices("widgets")).await.unwrap().as_deref(),
        Some("jpsetup-widgets")
    );
    assert_eq!(
        harness
            .selected_id("1", &notices("edit-post").with_published_count(4))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        harness
            .selected_id("1", &notices("edit-post").with_published_count(5))
            .await
            .unwrap()
            .as_deref(),
        Some("jpsetup-posts")
    );
}

#[tokio::test]
async fn test_admin_url_shapes_cta_link() {
    let harness = TestHarness::builder()
        .with_admin_url("https://example.test/wp-admin/")
        .build()
        .await
        .unwrap();
    let selected = harness
        .select("1", &notices("upload"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        selected.cta_link,
        "https://example.test/wp-admin/admin.php?page=jetpack#/setup"
    );
}

// ---- Threshold scenario ----

#[tokio::test]
async fn test_threshold_scenario() {
    let gated = MessageConfig {
        min_required_count: Some(5),
        ..message("c", "wp:edit-post:admin_notices")
    };
    let harness = TestHarness::builder()
        .without_builtin()
        .with_messages(vec![message("a", "wp:upload:admin_notices"), gated])
        .build()
        .await
        .unwrap();

    let pick = |ctx: Context| {
        let harness = &harness;
        async move { harness.selected_id("1", &ctx).await.unwrap() }
    };

    assert_eq!(
        pick(notices("upload").with_published_count(2)).await.as_deref(),
        Some("a")
    );
    assert_eq!(pick(notices("edit-post").with_published_count(3)).await, None);
    assert_eq!(
        pick(notices("edit-post").with_published_count(5)).await.as_deref(),
        Some("c")
    );
}

// ---- Dismissal memory ----

#[tokio::test]
async fn test_dismissal_persists_and_falls_through_to_next_candidate() {
    let harness = TestHarness::builder()
        .without_builtin()
        .with_messages(vec![
            message("first", "wp:upload:admin_notices"),
            message("second", "wp:*:admin_notices"),
        ])
        .build()
        .await
        .unwrap();

    assert_eq!(
        harness.selected_id("1", &notices("upload")).await.unwrap().as_deref(),
        Some("first")
    );

    harness.dismiss("1", "first").await.unwrap();
    assert_eq!(
        harness
            .store
            .get(&UserId::from("1"), &"first".into())
            .await
            .unwrap(),
        DismissalState::Dismissed
    );
    assert_eq!(
        harness.selected_id("1", &notices("upload")).await.unwrap().as_deref(),
        Some("second")
    );

    harness.accept("1", "second").await.unwrap();
    assert_eq!(harness.selected_id("1", &notices("upload")).await.unwrap(), None);

    // Another user is unaffected.
    assert_eq!(
        harness.selected_id("2", &notices("upload")).await.unwrap().as_deref(),
        Some("first")
    );
}

#[tokio::test]
async fn test_report_unknown_id_leaves_store_untouched() {
    let harness = TestHarness::builder().build().await.unwrap();

    let err = harness.dismiss("1", "retired-notice").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(
        harness
            .store
            .snapshot(&UserId::from("1"))
            .await
            .unwrap()
            .is_empty()
    );
}

// ---- Arity ----

#[tokio::test]
async fn test_pattern_arity_must_match_context() {
    let harness = TestHarness::builder()
        .without_builtin()
        .with_messages(vec![
            message("three", "wp:upload:admin_notices"),
            message("two", "wp:plugins"),
        ])
        .build()
        .await
        .unwrap();

    assert_eq!(
        harness
            .selected_id("1", &Context::new("wp", "upload"))
            .await
            .unwrap(),
        None
    );
    assert_eq!(harness.selected_id("1", &notices("plugins")).await.unwrap(), None);
    assert_eq!(
        harness
            .selected_id("1", &Context::new("wp", "plugins"))
            .await
            .unwrap()
            .as_deref(),
        Some("two")
    );
}

// ---- Variations ----

#[tokio::test]
async fn test_forced_variation_selects_branch() {
    let control = MessageConfig {
        variation: Some("original".into()),
        ..message("control", "wp:upload:admin_notices")
    };
    let treatment = MessageConfig {
        variation: Some("new-copy".into()),
        ..message("treatment", "wp:upload:admin_notices")
    };
    let harness = TestHarness::builder()
        .without_builtin()
        .with_messages(vec![control, treatment])
        .build()
        .await
        .unwrap();

    assert_eq!(
        harness.selected_id("1", &notices("upload")).await.unwrap().as_deref(),
        Some("control")
    );

    harness.service.force_variation("new-copy");
    assert_eq!(
        harness.selected_id("1", &notices("upload")).await.unwrap().as_deref(),
        Some("treatment")
    );

    harness.service.clear_forced_variation();
    assert_eq!(
        harness
            .selected_id("1", &notices("upload").with_assigned_variation("new-copy"))
            .await
            .unwrap()
            .as_deref(),
        Some("treatment")
    );
}

#[tokio::test]
async fn test_default_variation_is_configurable() {
    let tagged = MessageConfig {
        variation: Some("baseline".into()),
        ..message("tagged", "wp:upload:admin_notices")
    };
    let harness = TestHarness::builder()
        .without_builtin()
        .with_default_variation("baseline")
        .with_messages(vec![tagged])
        .build()
        .await
        .unwrap();

    assert_eq!(
        harness.selected_id("1", &notices("upload")).await.unwrap().as_deref(),
        Some("tagged")
    );
}

// ---- Plans ----

#[tokio::test]
async fn test_plan_gated_message() {
    let premium = MessageConfig {
        plans: vec!["premium".into(), "business".into()],
        ..message("upsell", "wp:upload:admin_notices")
    };
    let harness = TestHarness::builder()
        .without_builtin()
        .with_messages(vec![premium])
        .build()
        .await
        .unwrap();

    assert_eq!(harness.selected_id("1", &notices("upload")).await.unwrap(), None);
    assert_eq!(
        harness
            .selected_id("1", &notices("upload").with_plan("free"))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        harness
            .selected_id("1", &notices("upload").with_plan("business"))
            .await
            .unwrap()
            .as_deref(),
        Some("upsell")
    );
}

// ---- Store failures ----

#[tokio::test]
async fn test_store_failure_propagates_from_select_and_report() {
    let catalog = load_catalog(&[message("a", "wp:upload:admin_notices")]).unwrap();
    let store = Arc::new(FailingDismissalStore::new());
    let service = JitmService::new(catalog, Selector::new("original"), store.clone());
    let user = UserId::from("1");

    let err = service.select(&user, &notices("upload")).await.unwrap_err();
    assert!(matches!(err, JitmError::Storage { .. }));

    let err = service
        .report_action(&user, "a", jitm_core::UserAction::Dismissed)
        .await
        .unwrap_err();
    assert!(matches!(err, JitmError::Storage { .. }));
    assert_eq!(store.calls(), 2);

    // Unknown ids are rejected before the store is consulted.
    let err = service
        .report_action(&user, "missing", jitm_core::UserAction::Dismissed)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.calls(), 2);
}
