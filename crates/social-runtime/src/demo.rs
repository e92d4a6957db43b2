//! Seeded walkthrough run at startup.
//!
//! Registers a few users, connects them, hosts two activities and chats in
//! one, then reads everything back through the cross-module queries.

use crate::container::ServiceContainer;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sa_01_users::UserApi;
use sa_02_social::SocialApi;
use sa_03_activity::{ActivityApi, NewActivity, Visibility};
use sa_04_chat::ChatApi;
use tracing::info;

/// What the walkthrough saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    /// Friends listed for the first user.
    pub friends: usize,
    /// Feed size for a friend of the host.
    pub friend_feed: usize,
    /// Feed size for a stranger.
    pub stranger_feed: usize,
    /// Messages on the detail page after blocking.
    pub visible_messages: usize,
}

/// Seed the stores and exercise every query kind once.
pub async fn run(container: &ServiceContainer) -> Result<DemoSummary> {
    let users = container.users.as_ref();
    let alice = users
        .register_user("alice", "Alice", None)
        .await
        .context("Failed to register alice")?;
    let bob = users
        .register_user("bob", "Bob", None)
        .await
        .context("Failed to register bob")?;
    let carol = users
        .register_user("carol", "Carol", Some("https://example.org/carol.png".into()))
        .await
        .context("Failed to register carol")?;
    let dave = users
        .register_user("dave", "", None)
        .await
        .context("Failed to register dave")?;

    users.add_friend(alice.id, bob.id).await?;
    users.add_friend(bob.id, carol.id).await?;
    users.add_friend(alice.id, carol.id).await?;

    let profile = users.view_profile(alice.id, bob.id).await?;
    info!(
        viewer = %alice.username,
        target = %profile.user.username,
        is_friend = profile.is_friend,
        mutual_friends = profile.mutual_friends,
        "[demo] Profile viewed"
    );

    let friends = container.social.friend_list(alice.id).await?;

    let starts_at = Utc::now() + Duration::days(1);
    let hike = container
        .activity
        .create_activity(NewActivity {
            host_id: alice.id,
            title: "Sunday hike".into(),
            description: "Meet at the trailhead".into(),
            starts_at,
            visibility: Visibility::Public,
        })
        .await?;
    container
        .activity
        .create_activity(NewActivity {
            host_id: alice.id,
            title: "Board games".into(),
            description: String::new(),
            starts_at: starts_at + Duration::hours(6),
            visibility: Visibility::FriendsOnly,
        })
        .await?;

    let hello = container.chat.post_message(hike.id, bob.id, "Count me in").await?;
    container.chat.post_message(hike.id, dave.id, "Me too").await?;
    container.chat.like_message(hello.id, alice.id).await?;
    container.chat.like_message(hello.id, carol.id).await?;

    let friend_feed = container.activity.feed(bob.id).await?;
    let stranger_feed = container.activity.feed(dave.id).await?;
    for entry in &friend_feed {
        info!(
            title = %entry.activity.title,
            messages = entry.message_count,
            "[demo] Feed entry"
        );
    }

    container.activity.block_user(carol.id, dave.id).await?;
    let detail = container.activity.activity_detail(carol.id, hike.id).await?;
    for message in &detail.messages {
        info!(
            sender = %message.sender.display_name,
            likes = message.like_count(),
            content = %message.content,
            "[demo] Chat message"
        );
    }

    let summary = DemoSummary {
        friends: friends.len(),
        friend_feed: friend_feed.len(),
        stranger_feed: stranger_feed.len(),
        visible_messages: detail.messages.len(),
    };
    info!(?summary, "[demo] Walkthrough finished");
    Ok(summary)
}
