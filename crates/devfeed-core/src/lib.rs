//! devfeed-core: GitHub event normalization and merge engine.
//!
//! This crate provides:
//! - `GitHubEvent`: the activity event model, including merged aggregates
//! - `classify`: icon/color descriptor for an event
//! - `describe`: human-readable action text for an event
//! - `merge_similar_events`: folding of repeated stars into one aggregate
//! - `event_card`: header and detail rows for rendering an event

pub mod card;
pub mod classify;
pub mod column;
pub mod describe;
pub mod error;
pub mod event;
pub mod icon;
pub mod merge;
pub mod palette;
pub mod state;

pub use card::{CardHeader, CardOptions, CardRow, EventCard, event_card, event_cards};
pub use classify::classify;
pub use column::{ColumnHeader, RequestSubtype, RequestType, column_header};
pub use describe::{DescribeOptions, describe};
pub use error::{CoreError, Result};
pub use event::{
    Comment, Commit, EventAction, EventPayload, EventType, GitHubEvent, Issue, IssueState,
    PageAction, PullRequest, RefType, Release, Repo, User, WikiPage, parse_events,
};
pub use icon::{Icon, IconDescriptor};
pub use merge::{
    MergePolicy, merge_similar_events, merge_similar_events_with, try_merge, try_merge_with,
};
pub use palette::Palette;
pub use state::{
    PullRequestState, issue_icon_and_color, issue_state_icon, pull_request_icon_and_color,
    pull_request_state_icon,
};
