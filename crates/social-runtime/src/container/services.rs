//! Module instances and the query plumbing they share.

use super::config::RuntimeConfig;
use query_bridge::{
    ChatMessageHydrator, ChatQueries, CorrelationRegistry, QueryBridge, ResponseListener,
    SocialQueries, UserQueries,
};
use sa_01_users::{InMemoryUserDirectory, UserDirectory, UserQueryResponder, UserService};
use sa_02_social::{FriendshipStore, InMemoryFriendshipStore, SocialQueryResponder, SocialService};
use sa_03_activity::{
    ActivityQueries, ActivityService, ActivityStore, BlockList, InMemoryActivityStore,
    InMemoryBlockList,
};
use sa_04_chat::{ChatQueryResponder, ChatService, ChatStore, InMemoryChatStore};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use tracing::info;

/// Every module, wired to one bus.
pub struct ServiceContainer {
    /// Configuration the container was built from.
    pub config: RuntimeConfig,
    /// The shared event bus.
    pub bus: Arc<InMemoryEventBus>,
    /// Pending queries of every caller in the process.
    pub registry: Arc<CorrelationRegistry>,
    /// Query bridge shared by all façades.
    pub bridge: QueryBridge,

    pub user_directory: Arc<dyn UserDirectory>,
    pub friendships: Arc<dyn FriendshipStore>,
    pub activities: Arc<dyn ActivityStore>,
    pub blocks: Arc<dyn BlockList>,
    pub chat_store: Arc<dyn ChatStore>,

    pub users: Arc<UserService>,
    pub social: Arc<SocialService>,
    pub activity: Arc<ActivityService>,
    pub chat: Arc<ChatService>,
}

impl ServiceContainer {
    /// Build every module over in-memory stores.
    pub fn new(config: RuntimeConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.channel_capacity));
        let registry = Arc::new(CorrelationRegistry::new());
        let bridge = QueryBridge::new(Arc::clone(&registry), bus.clone(), &config.bridge);

        let user_queries = UserQueries::new(bridge.clone());
        let social_queries = SocialQueries::new(bridge.clone());
        let chat_queries = ChatQueries::new(bridge.clone());
        let hydrator = ChatMessageHydrator::new(chat_queries.clone(), user_queries.clone());

        let user_directory: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        let friendships: Arc<dyn FriendshipStore> = Arc::new(InMemoryFriendshipStore::new());
        let activities: Arc<dyn ActivityStore> = Arc::new(InMemoryActivityStore::new());
        let blocks: Arc<dyn BlockList> = Arc::new(InMemoryBlockList::new());
        let chat_store: Arc<dyn ChatStore> = Arc::new(InMemoryChatStore::new());

        let users = Arc::new(UserService::new(
            Arc::clone(&user_directory),
            social_queries.clone(),
        ));
        let social = Arc::new(SocialService::new(
            Arc::clone(&friendships),
            user_queries.clone(),
        ));
        let activity = Arc::new(ActivityService::new(
            Arc::clone(&activities),
            Arc::clone(&blocks),
            ActivityQueries {
                users: user_queries.clone(),
                social: social_queries,
                chat: chat_queries,
                hydrator: hydrator.clone(),
            },
        ));
        let chat = Arc::new(ChatService::new(
            Arc::clone(&chat_store),
            user_queries,
            hydrator,
        ));

        info!(
            query_timeout_ms = config.bridge.query_timeout.as_millis(),
            bus_capacity = bus.capacity(),
            "Service container built"
        );

        Self {
            config,
            bus,
            registry,
            bridge,
            user_directory,
            friendships,
            activities,
            blocks,
            chat_store,
            users,
            social,
            activity,
            chat,
        }
    }

    /// The listener completing this container's pending queries.
    ///
    /// Subscribes immediately.
    pub fn response_listener(&self) -> ResponseListener {
        ResponseListener::new(self.bus.as_ref(), Arc::clone(&self.registry))
    }

    /// Responders answering queries about users, friendships and chat.
    ///
    /// Each subscribes immediately.
    pub fn responders(&self) -> (UserQueryResponder, SocialQueryResponder, ChatQueryResponder) {
        (
            UserQueryResponder::new(Arc::clone(&self.user_directory), self.bus.clone()),
            SocialQueryResponder::new(Arc::clone(&self.friendships), self.bus.clone()),
            ChatQueryResponder::new(Arc::clone(&self.chat_store), self.bus.clone()),
        )
    }
}
