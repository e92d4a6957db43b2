//! # Typed Query Façades
//!
//! One wrapper per cross-module query kind. Each fixes the event pair it
//! speaks and what the caller gets when no usable answer arrives:
//!
//! | Façade method | Fallback |
//! |---|---|
//! | `UserQueries::get_user` | `Err(EntityNotFound)` |
//! | `SocialQueries::are_friends` | `false` |
//! | `SocialQueries::count_mutual_friends` | `0` |
//! | `SocialQueries::save_friendship` | `false` |
//! | `ChatQueries::message_ids` | empty list |
//! | `ChatQueries::message_ids_batch` | empty map |
//! | `ChatQueries::full_messages` | empty list |

mod chat;
mod social;
mod users;

pub use chat::ChatQueries;
pub use social::SocialQueries;
pub use users::UserQueries;

use crate::error::{BridgeError, NotFoundReason};
use crate::reply::QueryReply;
use shared_bus::{Answer, QueryKind};
use shared_types::ResponderError;
use tracing::warn;

/// Why a façade call produced no payload.
#[derive(Debug)]
pub(crate) enum Unanswered {
    /// Timeout or dispatch failure, already logged by the bridge.
    Bridge(BridgeError),
    /// The owning module answered with an error.
    Responder(ResponderError),
}

impl From<Unanswered> for NotFoundReason {
    fn from(unanswered: Unanswered) -> Self {
        match unanswered {
            Unanswered::Bridge(err) => NotFoundReason::from(&err),
            Unanswered::Responder(err) => NotFoundReason::ResponderFailed(err),
        }
    }
}

/// Unwrap a bridge outcome down to the responder's payload.
///
/// `extract` picks the payload out of the reply variant `kind` answers with.
pub(crate) fn settle<T>(
    kind: QueryKind,
    key: &str,
    outcome: Result<QueryReply, BridgeError>,
    extract: impl FnOnce(QueryReply) -> Option<Answer<T>>,
) -> Result<T, Unanswered> {
    let reply = outcome.map_err(Unanswered::Bridge)?;
    let actual = reply.kind();
    let answer = extract(reply)
        .ok_or(Unanswered::Bridge(BridgeError::MalformedQuery { kind, actual }))?;

    answer.map_err(|err| {
        warn!(
            kind = %kind,
            key = %key,
            code = err.code,
            error = %err.message,
            "Responder failed, using fallback"
        );
        Unanswered::Responder(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn extract_bool(reply: QueryReply) -> Option<Answer<bool>> {
        match reply {
            QueryReply::AreFriends(answer) => Some(answer),
            _ => None,
        }
    }

    #[test]
    fn test_settle_payload() {
        let settled = settle(
            QueryKind::AreFriends,
            "k",
            Ok(QueryReply::AreFriends(Ok(true))),
            extract_bool,
        );
        assert!(matches!(settled, Ok(true)));
    }

    #[test]
    fn test_settle_responder_failure() {
        let settled = settle(
            QueryKind::AreFriends,
            "k",
            Ok(QueryReply::AreFriends(Err(ResponderError::invalid("self")))),
            extract_bool,
        );
        assert!(matches!(settled, Err(Unanswered::Responder(_))));
    }

    #[test]
    fn test_settle_wrong_variant() {
        let settled = settle(
            QueryKind::AreFriends,
            "k",
            Ok(QueryReply::MutualFriends(Ok(1))),
            extract_bool,
        );
        assert!(matches!(
            settled,
            Err(Unanswered::Bridge(BridgeError::MalformedQuery { .. }))
        ));
    }

    #[test]
    fn test_unanswered_reason() {
        let timeout = Unanswered::Bridge(BridgeError::Timeout {
            kind: QueryKind::GetUser,
            timeout: Duration::from_millis(1),
        });
        assert_eq!(NotFoundReason::from(timeout), NotFoundReason::NoResponse);
    }
}
