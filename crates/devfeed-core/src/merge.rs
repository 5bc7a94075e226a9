//! Merging of adjacent similar events.
//!
//! Repeated stars by one user are folded into a single
//! `WatchEvent:OneUserMultipleRepos` aggregate. The scan is a single left
//! fold: once an event is absorbed it is never reconsidered.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{EventType, GitHubEvent, Repo};

/// Limits applied when merging events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePolicy {
    /// Events this many minutes apart or more are never merged.
    pub window_minutes: i64,

    /// Maximum number of event ids one aggregate may hold.
    ///
    /// Values below 2 disable merging.
    pub max_merged: usize,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            window_minutes: 24 * 60,
            max_merged: 4,
        }
    }
}

/// Try to merge `b` into the accumulator `a` using the default policy.
///
/// Returns `None` when the pair is not mergeable. Neither input is modified.
#[must_use]
pub fn try_merge(a: &GitHubEvent, b: &GitHubEvent) -> Option<GitHubEvent> {
    try_merge_with(&MergePolicy::default(), a, b)
}

/// Try to merge `b` into the accumulator `a`.
#[must_use]
pub fn try_merge_with(
    policy: &MergePolicy,
    a: &GitHubEvent,
    b: &GitHubEvent,
) -> Option<GitHubEvent> {
    if a.actor.id != b.actor.id {
        return None;
    }

    // Assumes `a` is the more recent event; older-first input always passes.
    let minutes_apart = (a.created_at - b.created_at).num_minutes();
    if minutes_apart >= policy.window_minutes {
        return None;
    }

    // A plain event stands for itself.
    if a.merged.len().max(1) >= policy.max_merged {
        return None;
    }

    match (a.event_type, b.event_type) {
        (EventType::Watch, EventType::Watch) => {
            let repos = a.repo.iter().chain(b.repo.iter()).cloned().collect();

            Some(GitHubEvent {
                event_type: EventType::WatchMultipleRepos,
                repo: None,
                repos,
                merged: vec![a.id.clone(), b.id.clone()],
                ..a.clone()
            })
        }

        (EventType::WatchMultipleRepos, EventType::Watch) => {
            let repos = unique_by(a.repos.iter().chain(b.repo.iter()).cloned(), |r: &Repo| r.id);
            let merged = unique_by(
                a.merged.iter().cloned().chain(std::iter::once(b.id.clone())),
                String::clone,
            );

            Some(GitHubEvent {
                repos,
                merged,
                ..a.clone()
            })
        }

        _ => None,
    }
}

/// Merge similar adjacent events using the default policy.
///
/// When nothing was merged the input slice itself is returned as
/// `Cow::Borrowed`, so callers can detect the no-op without comparing events.
#[must_use]
pub fn merge_similar_events(events: &[GitHubEvent]) -> Cow<'_, [GitHubEvent]> {
    merge_similar_events_with(&MergePolicy::default(), events)
}

/// Merge similar adjacent events.
#[must_use]
pub fn merge_similar_events_with<'a>(
    policy: &MergePolicy,
    events: &'a [GitHubEvent],
) -> Cow<'a, [GitHubEvent]> {
    let (mut output, pending) = events.iter().fold(
        (Vec::<Cow<'a, GitHubEvent>>::new(), None::<Cow<'a, GitHubEvent>>),
        |(mut output, pending), event| match pending {
            None => (output, Some(Cow::Borrowed(event))),
            Some(current) => match try_merge_with(policy, &current, event) {
                Some(merged) => (output, Some(Cow::Owned(merged))),
                None => {
                    output.push(current);
                    (output, Some(Cow::Borrowed(event)))
                }
            },
        },
    );
    output.extend(pending);

    if output.len() == events.len() {
        return Cow::Borrowed(events);
    }

    debug!(
        input = events.len(),
        output = output.len(),
        "Merged similar events"
    );

    Cow::Owned(output.into_iter().map(Cow::into_owned).collect())
}

/// Keep the first occurrence of every key, preserving order.
fn unique_by<T, K, I, F>(items: I, key: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut unique: Vec<T> = Vec::new();
    for item in items {
        let item_key = key(&item);
        if !unique.iter().any(|existing| key(existing) == item_key) {
            unique.push(item);
        }
    }
    unique
}
