//! # Query Bridge Scenarios
//!
//! The bridge end to end: a caller, the bus, a scripted responder and the
//! response listener, with virtual time so 5000 ms windows elapse instantly.

#[cfg(test)]
mod tests {
    use crate::support::{capture_warnings, Bridged, QUERY_TIMEOUT};
    use futures::future::join_all;
    use chrono::Utc;
    use query_bridge::{
        ChatMessageHydrator, ChatQueries, NotFoundReason, SocialQueries, UserQueries,
    };
    use shared_bus::{EventTopic, SocialEvent, DEFAULT_CHANNEL_CAPACITY};
    use shared_types::{ActivityId, ChatMessageRecord, MessageId, UserId, UserSnapshot};
    use std::collections::HashSet;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn friendship_checked(event: SocialEvent, answer: bool) -> Vec<SocialEvent> {
        match event {
            SocialEvent::AreFriends { request_id, .. } => vec![SocialEvent::FriendshipChecked {
                request_id,
                result: Ok(answer),
            }],
            _ => Vec::new(),
        }
    }

    // =========================================================================
    // ROUND TRIP AND TIMEOUT
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_answer_after_ten_millis_reaches_caller() {
        let world = Bridged::new();
        world.respond_after(EventTopic::Social, Duration::from_millis(10), |event| {
            friendship_checked(event, true)
        });
        let social = SocialQueries::new(world.bridge.clone());

        let started = Instant::now();
        let is_friend = social.are_friends(UserId::new(), UserId::new()).await;

        assert!(is_friend);
        assert!(started.elapsed() >= Duration::from_millis(10));
        assert!(started.elapsed() < QUERY_TIMEOUT);
        assert_eq!(world.registry.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_check_is_false_after_window_with_one_warning() {
        let (logs, _guard) = capture_warnings();
        let world = Bridged::new();
        let _social_module = world.silent(EventTopic::Social);
        let social = SocialQueries::new(world.bridge.clone());

        let started = Instant::now();
        let is_friend = social.are_friends(UserId::new(), UserId::new()).await;
        let elapsed = started.elapsed();

        assert!(!is_friend);
        assert!(elapsed >= QUERY_TIMEOUT);
        assert!(elapsed < QUERY_TIMEOUT + Duration::from_millis(100));

        let warnings = logs.lines_at("WARN");
        assert_eq!(warnings.len(), 1, "expected one warning, got {warnings:?}");
        assert!(warnings[0].contains("timed out"));
        assert!(warnings[0].contains("are_friends"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_lookup_is_not_found_not_empty() {
        let world = Bridged::new();
        let _users_module = world.silent(EventTopic::Users);
        let users = UserQueries::new(world.bridge.clone());
        let user_id = UserId::new();

        let err = users.get_user(user_id).await.unwrap_err();

        assert_eq!(err.user_id, user_id);
        assert_eq!(err.reason, NotFoundReason::NoResponse);
        assert!(err.is_timeout());
        assert!(!err.is_missing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanswered_count_is_zero() {
        let world = Bridged::new();
        let _social_module = world.silent(EventTopic::Social);
        let social = SocialQueries::new(world.bridge.clone());

        assert_eq!(
            social.count_mutual_friends(UserId::new(), UserId::new()).await,
            0
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_module_takes_fallback_at_once() {
        let world = Bridged::new();
        let social = SocialQueries::new(world.bridge.clone());
        let users = UserQueries::new(world.bridge.clone());

        let started = Instant::now();
        assert!(!social.are_friends(UserId::new(), UserId::new()).await);
        let err = users.get_user(UserId::new()).await.unwrap_err();

        assert_eq!(err.reason, NotFoundReason::DispatchFailed);
        assert!(started.elapsed() < Duration::from_millis(100));
        assert_eq!(world.registry.pending_count(), 0);
    }

    // =========================================================================
    // REGISTRY HYGIENE
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_calls_leave_no_entries() {
        let world = Bridged::new();
        // Users in this set get an answer, everyone else times out
        let answered: Arc<HashSet<UserId>> =
            Arc::new((0..20).map(|_| UserId::new()).collect());
        let silent: Vec<UserId> = (0..20).map(|_| UserId::new()).collect();

        let answered_for_responder = Arc::clone(&answered);
        world.respond_after(EventTopic::Social, Duration::from_millis(5), move |event| {
            match event {
                SocialEvent::AreFriends {
                    request_id,
                    user_id,
                    ..
                } if answered_for_responder.contains(&user_id) => {
                    vec![SocialEvent::FriendshipChecked {
                        request_id,
                        result: Ok(true),
                    }]
                }
                _ => Vec::new(),
            }
        });
        let social = SocialQueries::new(world.bridge.clone());
        let before = world.registry.pending_count();

        let callers = answered
            .iter()
            .chain(silent.iter())
            .map(|user_id| social.are_friends(*user_id, UserId::new()));
        let results = join_all(callers).await;

        assert_eq!(results.iter().filter(|r| **r).count(), answered.len());
        assert_eq!(world.registry.pending_count(), before);

        let stats = world.registry.stats();
        assert_eq!(stats.total_registered.load(Ordering::Relaxed), 40);
        assert_eq!(stats.total_completed.load(Ordering::Relaxed), 20);
        assert_eq!(stats.total_timeouts.load(Ordering::Relaxed), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_of_two_responses_wins() {
        let world = Bridged::new();
        world.respond_after(EventTopic::Social, Duration::from_millis(1), |event| {
            match event {
                SocialEvent::CountMutualFriends { request_id, .. } => vec![
                    SocialEvent::MutualFriendsCounted {
                        request_id,
                        result: Ok(3),
                    },
                    SocialEvent::MutualFriendsCounted {
                        request_id,
                        result: Ok(99),
                    },
                ],
                _ => Vec::new(),
            }
        });
        let social = SocialQueries::new(world.bridge.clone());

        let count = social
            .count_mutual_friends(UserId::new(), UserId::new())
            .await;
        // Let the listener see the duplicate
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(count, 3);
        assert_eq!(
            world.registry.stats().total_discarded.load(Ordering::Relaxed),
            1
        );
        assert_eq!(world.registry.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_timeout_is_discarded() {
        let world = Bridged::new();
        world.respond_after(EventTopic::Social, QUERY_TIMEOUT * 2, |event| {
            friendship_checked(event, true)
        });
        let social = SocialQueries::new(world.bridge.clone());

        assert!(!social.are_friends(UserId::new(), UserId::new()).await);

        tokio::time::sleep(QUERY_TIMEOUT * 2).await;
        let (_, completed, discarded, timeouts, _) = world.registry.stats().snapshot();
        assert_eq!((completed, discarded, timeouts), (0, 1, 1));
        assert_eq!(world.registry.pending_count(), 0);
    }

    // =========================================================================
    // MORE CALLERS THAN THE BUS HOLDS
    // =========================================================================

    fn snapshot(id: UserId) -> UserSnapshot {
        UserSnapshot {
            id,
            username: format!("user-{}", &id.to_string()[..8]),
            display_name: "Someone".into(),
            avatar_url: None,
        }
    }

    fn user_fetched(event: SocialEvent) -> Vec<SocialEvent> {
        match event {
            SocialEvent::GetUser {
                request_id,
                user_id,
            } => vec![SocialEvent::UserFetched {
                request_id,
                result: Ok(Some(snapshot(user_id))),
            }],
            _ => Vec::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hydration_resolves_more_users_than_bus_capacity() {
        let world = Bridged::new();
        world.respond_after(EventTopic::Users, Duration::from_millis(1), user_fetched);
        let hydrator = ChatMessageHydrator::new(
            ChatQueries::new(world.bridge.clone()),
            UserQueries::new(world.bridge.clone()),
        );

        let sender = UserId::new();
        let likers: Vec<UserId> = (0..DEFAULT_CHANNEL_CAPACITY + 500)
            .map(|_| UserId::new())
            .collect();
        let record = ChatMessageRecord {
            id: MessageId::new(),
            activity_id: ActivityId::new(),
            sender_id: sender,
            content: "who is in".into(),
            sent_at: Utc::now(),
            liked_by: likers.clone(),
        };

        let views = hydrator.hydrate(vec![record]).await;

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].sender.id, sender);
        let liked_by: Vec<UserId> = views[0].liked_by.iter().map(|u| u.id).collect();
        assert_eq!(liked_by, likers);
        assert_eq!(world.registry.pending_count(), 0);
        let (registered, completed, _, timeouts, _) = world.registry.stats().snapshot();
        assert_eq!(registered, likers.len() as u64 + 1);
        assert_eq!(completed, registered);
        assert_eq!(timeouts, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checks_from_many_tasks_all_get_their_answer() {
        let world = Bridged::new();
        world.respond_after(EventTopic::Social, Duration::from_millis(1), |event| {
            friendship_checked(event, true)
        });
        let social = SocialQueries::new(world.bridge.clone());

        let started = Instant::now();
        let tasks: Vec<_> = (0..DEFAULT_CHANNEL_CAPACITY * 2)
            .map(|_| {
                let social = social.clone();
                tokio::spawn(async move { social.are_friends(UserId::new(), UserId::new()).await })
            })
            .collect();
        let results = join_all(tasks).await;

        assert_eq!(results.len(), DEFAULT_CHANNEL_CAPACITY * 2);
        assert!(results.into_iter().all(|joined| joined.unwrap()));
        assert!(started.elapsed() < QUERY_TIMEOUT);
        assert_eq!(world.registry.pending_count(), 0);
        assert_eq!(world.registry.stats().snapshot().3, 0);
    }
}
