// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in pre-connection setup notices.
//!
//! Returns hardcoded entries that invite the site owner to finish setup. They
//! go through the same validation as configured entries; the posts-traffic
//! notice is gated declaratively through `min_required_count`.

use jitm_config::MessageConfig;

/// Published posts required before the posts-traffic notice is eligible.
pub const POSTS_NOTICE_MIN_PUBLISHED: u64 = 5;

const SETUP_CAPTION: &str = "Set up Jetpack";

/// Link to the setup screen under the given admin base URL (which ends with `/`).
pub fn setup_url(admin_url: &str) -> String {
    format!("{admin_url}admin.php?page=jetpack#/setup")
}

/// Returns the built-in entries in priority order:
/// - `jpsetup-upload` on the media upload screen
/// - `jpsetup-widgets` on the widgets screen
/// - `jpsetup-posts` on the posts list, once the site has enough published posts
pub fn builtin_entries(admin_url: &str) -> Vec<MessageConfig> {
    let link = setup_url(admin_url);
    let entry = |id: &str, path: &str, headline: &str, description: &str| MessageConfig {
        id: Some(id.to_string()),
        path: Some(path.to_string()),
        headline: Some(headline.to_string()),
        description: Some(description.to_string()),
        cta_link: Some(link.clone()),
        cta_label: Some(SETUP_CAPTION.to_string()),
        ..MessageConfig::default()
    };

    vec![
        entry(
            "jpsetup-upload",
            "wp:upload:admin_notices",
            "Do you want lightning-fast images?",
            "Set up Jetpack, enable Site Accelerator, and start serving your images lightning fast, for free.",
        ),
        entry(
            "jpsetup-widgets",
            "wp:widgets:admin_notices",
            "Looking for even more widgets?",
            "Set up Jetpack for great additional widgets that display business contact info and maps, blog stats, and top posts.",
        ),
        MessageConfig {
            min_required_count: Some(POSTS_NOTICE_MIN_PUBLISHED),
            ..entry(
                "jpsetup-posts",
                "wp:edit-post:admin_notices",
                "Do you know which of these posts gets the most traffic?",
                "Set up Jetpack to get in-depth stats about your content and visitors.",
            )
        },
    ]
}
