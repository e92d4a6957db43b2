//! # Module Flows
//!
//! The User, Social, Activity and Chat modules wired onto one bus by the
//! runtime, talking only through the query bridge.

#[cfg(test)]
mod tests {
    use crate::support::QUERY_TIMEOUT;
    use chrono::{Duration as ChronoDuration, Utc};
    use query_bridge::{ChatMessageHydrator, ChatQueries, NotFoundReason, UserQueries};
    use sa_01_users::UserApi;
    use sa_02_social::SocialApi;
    use sa_03_activity::{ActivityApi, NewActivity, Visibility};
    use sa_04_chat::{ChatApi, ChatStore};
    use shared_types::{ActivityId, UserId, UserSnapshot};
    use social_runtime::{RuntimeConfig, ServiceContainer, SocialRuntime};
    use std::collections::HashSet;
    use tokio::time::Instant;

    fn started() -> SocialRuntime {
        let runtime = SocialRuntime::new(RuntimeConfig::default()).unwrap();
        runtime.start();
        runtime
    }

    async fn register(container: &ServiceContainer, name: &str) -> UserSnapshot {
        container.users.register_user(name, name, None).await.unwrap()
    }

    // =========================================================================
    // BATCH COMPLETENESS
    // =========================================================================

    #[tokio::test]
    async fn test_batch_holds_exactly_the_keys_with_messages() {
        let runtime = started();
        let container = runtime.container();
        let alice = register(&container, "alice").await;
        let (busy, quiet, also_busy) = (ActivityId::new(), ActivityId::new(), ActivityId::new());

        container.chat.post_message(busy, alice.id, "one").await.unwrap();
        container.chat.post_message(busy, alice.id, "two").await.unwrap();
        container.chat.post_message(also_busy, alice.id, "three").await.unwrap();

        let chat = ChatQueries::new(container.bridge.clone());
        let batch = chat.message_ids_batch(&[busy, quiet, also_busy]).await;

        let keys: HashSet<ActivityId> = batch.keys().copied().collect();
        assert_eq!(keys, HashSet::from([busy, also_busy]));
        assert_eq!(batch[&busy].len(), 2);
        assert_eq!(batch[&also_busy].len(), 1);

        // Absent reads the same as an explicit empty list
        let quiet_ids = batch.get(&quiet).cloned().unwrap_or_default();
        assert_eq!(quiet_ids, chat.message_ids(quiet).await);
        assert!(quiet_ids.is_empty());

        runtime.shutdown().await;
    }

    // =========================================================================
    // HYDRATION
    // =========================================================================

    #[tokio::test]
    async fn test_message_from_unknown_sender_is_dropped() {
        let runtime = started();
        let container = runtime.container();
        let alice = register(&container, "alice").await;
        let bob = register(&container, "bob").await;
        let ghost = UserId::new();
        let activity_id = ActivityId::new();

        // Written straight to the store: the chat service would refuse the ghost
        let store = &container.chat_store;
        let first = store
            .append(activity_id, alice.id, "first".into(), Utc::now())
            .unwrap();
        store
            .append(
                activity_id,
                ghost,
                "boo".into(),
                Utc::now() + ChronoDuration::seconds(1),
            )
            .unwrap();
        let last = store
            .append(
                activity_id,
                bob.id,
                "last".into(),
                Utc::now() + ChronoDuration::seconds(2),
            )
            .unwrap();
        store.like(last.id, ghost).unwrap();
        store.like(last.id, alice.id).unwrap();

        let hydrator = ChatMessageHydrator::new(
            ChatQueries::new(container.bridge.clone()),
            UserQueries::new(container.bridge.clone()),
        );
        let messages = hydrator.hydrate_activity_messages(activity_id).await;

        let ids: Vec<_> = messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![first.id, last.id]);
        assert_eq!(messages[0].sender, alice);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].sender, bob);
        assert_eq!(messages[1].liked_by, vec![alice]);

        runtime.shutdown().await;
    }

    // =========================================================================
    // FAILURE MODES
    // =========================================================================

    #[tokio::test]
    async fn test_unknown_user_is_missing_without_waiting() {
        let runtime = started();
        let container = runtime.container();
        let users = UserQueries::new(container.bridge.clone());

        let started_at = Instant::now();
        let err = users.get_user(UserId::new()).await.unwrap_err();

        assert_eq!(err.reason, NotFoundReason::Missing);
        assert!(started_at.elapsed() < QUERY_TIMEOUT);
        runtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_profile_degrades_when_social_module_is_silent() {
        let container = ServiceContainer::new(RuntimeConfig::default());
        container.response_listener().spawn();
        let (users_responder, _silent_social, _silent_chat) = container.responders();
        users_responder.spawn();

        let alice = register(&container, "alice").await;
        let bob = register(&container, "bob").await;

        let started_at = Instant::now();
        let profile = container.users.view_profile(alice.id, bob.id).await.unwrap();

        assert_eq!(profile.user, bob);
        assert!(!profile.is_friend);
        assert_eq!(profile.mutual_friends, 0);
        assert!(started_at.elapsed() >= QUERY_TIMEOUT);
        // Both checks waited side by side, not one after the other
        assert!(started_at.elapsed() < QUERY_TIMEOUT * 2);

        assert!(!container.users.add_friend(alice.id, bob.id).await.unwrap());
        assert_eq!(container.registry.pending_count(), 0);
    }

    // =========================================================================
    // END TO END
    // =========================================================================

    #[tokio::test]
    async fn test_friends_feed_and_detail() {
        let runtime = started();
        let container = runtime.container();
        let host = register(&container, "host").await;
        let friend = register(&container, "friend").await;
        let stranger = register(&container, "stranger").await;

        assert!(container.users.add_friend(host.id, friend.id).await.unwrap());
        let friends = container.social.friend_list(friend.id).await.unwrap();
        assert_eq!(friends, vec![host.clone()]);

        let party = container
            .activity
            .create_activity(NewActivity {
                host_id: host.id,
                title: "Rooftop party".into(),
                description: String::new(),
                starts_at: Utc::now() + ChronoDuration::hours(3),
                visibility: Visibility::FriendsOnly,
            })
            .await
            .unwrap();
        let hi = container
            .chat
            .post_message(party.id, friend.id, "See you there")
            .await
            .unwrap();
        container.chat.like_message(hi.id, host.id).await.unwrap();

        let feed = container.activity.feed(friend.id).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].activity.id, party.id);
        assert_eq!(feed[0].message_count, 1);
        assert!(container.activity.feed(stranger.id).await.unwrap().is_empty());

        let detail = container
            .activity
            .activity_detail(friend.id, party.id)
            .await
            .unwrap();
        assert_eq!(detail.host, host);
        assert_eq!(detail.messages.len(), 1);
        assert_eq!(detail.messages[0].liked_by, vec![host.clone()]);

        container.activity.block_user(friend.id, host.id).await.unwrap();
        let detail = container
            .activity
            .activity_detail(friend.id, party.id)
            .await
            .unwrap();
        assert!(detail.messages[0].liked_by.is_empty());

        runtime.shutdown().await;
        assert_eq!(container.registry.pending_count(), 0);
    }
}
