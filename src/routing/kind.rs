//! Entity kinds exposed through public routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of entity kinds a route placeholder can refer to.
///
/// Adding a kind means adding it here and to the strategy table below;
/// there is no runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Content,
    ContentRelated,
    Notification,
    Comment,
    CommentReply,
    Entry,
    EntryReply,
    Group,
    User,
    Conversation,
}

/// How a raw path segment is turned into an entity reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// The segment is a unique display name.
    ByName,
    /// The segment is an opaque token encoding the primary key.
    ByKey,
}

impl EntityKind {
    /// All kinds, in declaration order.
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Content,
        EntityKind::ContentRelated,
        EntityKind::Notification,
        EntityKind::Comment,
        EntityKind::CommentReply,
        EntityKind::Entry,
        EntityKind::EntryReply,
        EntityKind::Group,
        EntityKind::User,
        EntityKind::Conversation,
    ];

    /// Static mapping from kind to resolution strategy.
    ///
    /// Groups and users are addressed by their unique name; everything
    /// else by an encoded primary key.
    pub fn strategy(self) -> ResolutionStrategy {
        match self {
            EntityKind::Group | EntityKind::User => ResolutionStrategy::ByName,
            _ => ResolutionStrategy::ByKey,
        }
    }

    /// Stable snake_case tag, used in routes, seed files, and metrics
    /// labels.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Content => "content",
            EntityKind::ContentRelated => "content_related",
            EntityKind::Notification => "notification",
            EntityKind::Comment => "comment",
            EntityKind::CommentReply => "comment_reply",
            EntityKind::Entry => "entry",
            EntityKind::EntryReply => "entry_reply",
            EntityKind::Group => "group",
            EntityKind::User => "user",
            EntityKind::Conversation => "conversation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
