//! GitHub activity event model.
//!
//! Events arrive in the shape of the GitHub REST `/events` endpoints and are
//! treated as read-only values. Payload fields are a superset of what the
//! individual event types carry; each field is optional and null-safe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Kind of activity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "CommitCommentEvent", alias = "CommitComment")]
    CommitComment,
    #[serde(rename = "CreateEvent", alias = "Create")]
    Create,
    #[serde(rename = "DeleteEvent", alias = "Delete")]
    Delete,
    #[serde(rename = "ForkEvent", alias = "Fork")]
    Fork,
    #[serde(rename = "GollumEvent", alias = "Gollum")]
    Gollum,
    #[serde(rename = "IssueCommentEvent", alias = "IssueComment")]
    IssueComment,
    #[serde(rename = "IssuesEvent", alias = "Issues")]
    Issues,
    #[serde(rename = "MemberEvent", alias = "Member")]
    Member,
    #[serde(rename = "PublicEvent", alias = "Public")]
    Public,
    #[serde(rename = "PullRequestEvent", alias = "PullRequest")]
    PullRequest,
    #[serde(rename = "PullRequestReviewEvent", alias = "PullRequestReview")]
    PullRequestReview,
    #[serde(
        rename = "PullRequestReviewCommentEvent",
        alias = "PullRequestReviewComment"
    )]
    PullRequestReviewComment,
    #[serde(rename = "PushEvent", alias = "Push")]
    Push,
    #[serde(rename = "ReleaseEvent", alias = "Release")]
    Release,
    #[serde(rename = "WatchEvent", alias = "Watch")]
    Watch,
    /// Synthetic aggregate of several stars by one user.
    #[serde(
        rename = "WatchEvent:OneUserMultipleRepos",
        alias = "Watch:OneUserMultipleRepos"
    )]
    WatchMultipleRepos,
    /// Any event type this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Wire name of the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommitComment => "CommitCommentEvent",
            Self::Create => "CreateEvent",
            Self::Delete => "DeleteEvent",
            Self::Fork => "ForkEvent",
            Self::Gollum => "GollumEvent",
            Self::IssueComment => "IssueCommentEvent",
            Self::Issues => "IssuesEvent",
            Self::Member => "MemberEvent",
            Self::Public => "PublicEvent",
            Self::PullRequest => "PullRequestEvent",
            Self::PullRequestReview => "PullRequestReviewEvent",
            Self::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            Self::Push => "PushEvent",
            Self::Release => "ReleaseEvent",
            Self::Watch => "WatchEvent",
            Self::WatchMultipleRepos => "WatchEvent:OneUserMultipleRepos",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `payload.action` sub-discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Opened,
    Closed,
    Reopened,
    Assigned,
    Unassigned,
    Labeled,
    Unlabeled,
    Edited,
    Milestoned,
    Demilestoned,
    Created,
    Deleted,
    Published,
    Started,
    Added,
    Submitted,
    #[serde(other)]
    Other,
}

/// `payload.ref_type` of create/delete events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefType {
    Repository,
    Branch,
    Tag,
    #[serde(other)]
    Other,
}

/// State of an issue or pull request as reported by GitHub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// What happened to a wiki page in a gollum event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAction {
    Created,
    Edited,
    #[default]
    #[serde(other)]
    Other,
}

/// A GitHub user, used for event actors and for authors of nested records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,

    #[serde(default)]
    pub login: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_login: Option<String>,

    #[serde(default)]
    pub avatar_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: u64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            ..Default::default()
        }
    }

    /// Name shown for the user: `display_login` when present, else `login`.
    #[must_use]
    pub fn username(&self) -> &str {
        self.display_login
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }

    /// Bot accounts carry a `[bot]` suffix in their login.
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.login.contains("[bot]")
    }
}

/// A repository reference.
///
/// Event `repo` objects carry the full `owner/name` in `name`; fork targets
/// carry it in `full_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default)]
    pub private: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl Repo {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the privacy flag.
    #[must_use]
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// `owner/name` of the repository.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    /// Split the full name into `(owner, name)`.
    ///
    /// Returns `None` unless both halves are non-empty.
    #[must_use]
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        let (owner, name) = self.full_name().split_once('/')?;
        (!owner.is_empty() && !name.is_empty()).then_some((owner, name))
    }
}

/// Author block of a pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A commit listed in a push payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A wiki page touched by a gollum event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    #[serde(default)]
    pub page_name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub action: PageAction,

    #[serde(default)]
    pub sha: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Link object GitHub attaches to issues that are really pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

/// An issue (or a pull request seen through the issues API).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,

    #[serde(default)]
    pub number: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default)]
    pub state: IssueState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub user: User,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestLink>,
}

impl Issue {
    /// Whether this issue record actually describes a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
            || self
                .html_url
                .as_deref()
                .is_some_and(|url| url.contains("/pull/"))
    }
}

/// A pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,

    #[serde(default)]
    pub number: u64,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default)]
    pub state: IssueState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub user: User,
}

/// A comment on a commit, issue, or pull request review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub user: User,
}

/// A published release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,

    #[serde(default)]
    pub tag_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default)]
    pub target_commitish: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub author: User,
}

/// Type-dependent event payload.
///
/// Which fields are populated depends on the event type; everything is
/// optional so that partial or unexpected payloads still classify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<EventAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<RefType>,

    /// Git ref, e.g. `refs/heads/master` for pushes or a branch name for creates.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_size: Option<u64>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub commits: Vec<Commit>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub forced: bool,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pages: Vec<WikiPage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forkee: Option<Repo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<User>,
}

impl EventPayload {
    /// Payload carrying only an action.
    #[must_use]
    pub fn with_action(action: EventAction) -> Self {
        Self {
            action: Some(action),
            ..Default::default()
        }
    }
}

/// A single activity event, or a synthetic aggregate produced by merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubEvent {
    /// Unique event identifier.
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: EventType,

    /// User who generated the event.
    pub actor: User,

    /// Repository the event happened in. Absent on aggregates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<Repo>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub payload: EventPayload,

    pub created_at: DateTime<Utc>,

    #[serde(default = "default_public")]
    pub public: bool,

    /// Repositories of an aggregate, deduplicated by id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repos: Vec<Repo>,

    /// Ids of the original events absorbed into an aggregate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged: Vec<String>,
}

const fn default_public() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GitHubEvent {
    /// Create a public event with an empty payload.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        event_type: EventType,
        actor: User,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            event_type,
            actor,
            repo: None,
            payload: EventPayload::default(),
            created_at,
            public: true,
            repos: Vec::new(),
            merged: Vec::new(),
        }
    }

    /// Set the repository.
    #[must_use]
    pub fn with_repo(mut self, repo: Repo) -> Self {
        self.repo = Some(repo);
        self
    }

    /// Set the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Set the visibility flag.
    #[must_use]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// The `payload.action` sub-discriminant, if any.
    #[must_use]
    pub const fn action(&self) -> Option<EventAction> {
        self.payload.action
    }

    /// Whether this is a synthetic aggregate.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        self.event_type == EventType::WatchMultipleRepos
    }

    /// Repositories the event refers to: the aggregate's `repos`, else the single `repo`.
    #[must_use]
    pub fn repositories(&self) -> Vec<&Repo> {
        if self.repos.is_empty() {
            self.repo.iter().collect()
        } else {
            self.repos.iter().collect()
        }
    }
}

/// Decode a JSON array of events.
///
/// `null` entries are skipped. Every event must carry a non-empty id since ids
/// key rows and track merges.
///
/// # Errors
/// Returns `CoreError::Json` for malformed input and `CoreError::Validation`
/// for events without an id.
pub fn parse_events(json: &str) -> Result<Vec<GitHubEvent>> {
    let raw: Vec<Option<GitHubEvent>> = serde_json::from_str(json)?;
    let events: Vec<GitHubEvent> = raw.into_iter().flatten().collect();

    if let Some(position) = events.iter().position(|e| e.id.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "event at position {position} has an empty id"
        )));
    }

    Ok(events)
}
