//! Entity lookups against the User module.

use super::settle;
use crate::bridge::QueryBridge;
use crate::error::{EntityNotFound, NotFoundReason};
use crate::reply::QueryReply;
use shared_bus::{QueryKind, SocialEvent};
use shared_types::{UserId, UserSnapshot};

/// Queries answered by the User module.
#[derive(Clone)]
pub struct UserQueries {
    bridge: QueryBridge,
}

impl UserQueries {
    pub fn new(bridge: QueryBridge) -> Self {
        Self { bridge }
    }

    /// Fetch a user snapshot.
    ///
    /// Fails loud: a missing user, a timeout and a responder failure all
    /// produce [`EntityNotFound`], with the reason telling them apart.
    pub async fn get_user(&self, user_id: UserId) -> Result<UserSnapshot, EntityNotFound> {
        let kind = QueryKind::GetUser;
        let key = user_id.to_string();

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::GetUser {
                request_id,
                user_id,
            })
            .await;

        let found = settle(kind, &key, outcome, |reply| match reply {
            QueryReply::User(answer) => Some(answer),
            _ => None,
        });

        match found {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(EntityNotFound {
                user_id,
                reason: NotFoundReason::Missing,
            }),
            Err(unanswered) => Err(EntityNotFound {
                user_id,
                reason: NotFoundReason::from(unanswered),
            }),
        }
    }
}
