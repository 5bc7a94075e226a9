//! Human-readable action text for events.

use serde::{Deserialize, Serialize};

use crate::event::{EventAction, EventType, GitHubEvent, PageAction, RefType};

/// Text returned when nothing more specific applies.
pub const FALLBACK_TEXT: &str = "did something";

/// Context already visible to the reader.
///
/// When a flag is set the phrase says "this repository" / "this issue"
/// instead of the indefinite form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeOptions {
    pub repo_is_known: bool,
    pub issue_or_pull_request_is_known: bool,
}

/// Describe what the actor did, e.g. `pushed 3 commits to master`.
///
/// The result is lower-case, never empty, and has no leading, trailing or
/// repeated spaces.
#[must_use]
pub fn describe(event: &GitHubEvent, options: DescribeOptions) -> String {
    let issue_text = if options.issue_or_pull_request_is_known {
        "this issue"
    } else {
        "an issue"
    };
    let pull_request_text = if options.issue_or_pull_request_is_known {
        "this pr"
    } else {
        "a pr"
    };
    let repository_text = if options.repo_is_known {
        "this repository"
    } else {
        "a repository"
    };

    let payload = &event.payload;

    let text = match event.event_type {
        EventType::CommitComment => "commented on a commit".to_string(),

        EventType::Create => match payload.ref_type {
            Some(RefType::Repository) => format!("created {repository_text}"),
            Some(RefType::Branch) => "created a branch".to_string(),
            Some(RefType::Tag) => "created a tag".to_string(),
            _ => "created something".to_string(),
        },

        EventType::Delete => match payload.ref_type {
            Some(RefType::Repository) => format!("deleted {repository_text}"),
            Some(RefType::Branch) => "deleted a branch".to_string(),
            Some(RefType::Tag) => "deleted a tag".to_string(),
            _ => "deleted something".to_string(),
        },

        EventType::Gollum => {
            let count = payload.pages.len().max(1);
            let pages_text = if count > 1 {
                format!("{count} wiki pages")
            } else {
                "a wiki page".to_string()
            };

            match payload.pages.first().map(|page| page.action) {
                Some(PageAction::Created) => format!("created {pages_text}"),
                _ => format!("updated {pages_text}"),
            }
        }

        EventType::Fork => format!("forked {repository_text}"),

        EventType::IssueComment => {
            let target = if payload.issue.as_ref().is_some_and(|i| i.is_pull_request()) {
                pull_request_text
            } else {
                issue_text
            };
            format!("commented on {target}")
        }

        EventType::Issues => match payload.action.and_then(issue_action_verb) {
            Some(verb) => format!("{verb} {issue_text}"),
            None => format!("interacted with {issue_text}"),
        },

        EventType::Member => format!("added a user to {repository_text}"),
        EventType::Public => format!("made {repository_text} public"),

        EventType::PullRequest => {
            let merged = payload
                .pull_request
                .as_ref()
                .is_some_and(|pr| pr.merged_at.is_some());

            match payload.action {
                Some(EventAction::Closed) if merged => format!("merged {pull_request_text}"),
                Some(action) => match pull_request_action_verb(action) {
                    Some(verb) => format!("{verb} {pull_request_text}"),
                    None => format!("interacted with {pull_request_text}"),
                },
                None => format!("interacted with {pull_request_text}"),
            }
        }

        EventType::PullRequestReview => format!("reviewed {pull_request_text}"),

        EventType::PullRequestReviewComment => match payload.action {
            Some(EventAction::Created) => format!("commented on {pull_request_text} review"),
            Some(EventAction::Edited) => format!("edited {pull_request_text} review"),
            Some(EventAction::Deleted) => format!("deleted {pull_request_text} review"),
            _ => format!("interacted with {pull_request_text} review"),
        },

        EventType::Push => push_text(event),

        EventType::Release => "published a release".to_string(),
        EventType::Watch => format!("starred {repository_text}"),

        EventType::WatchMultipleRepos => {
            let count = event.repositories().len();
            if count > 1 {
                format!("starred {count} repositories")
            } else {
                format!("starred {repository_text}")
            }
        }

        EventType::Unknown => FALLBACK_TEXT.to_string(),
    };

    let normalized = normalize_whitespace(&text);
    if normalized.is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        normalized
    }
}

fn push_text(event: &GitHubEvent) -> String {
    let payload = &event.payload;

    let commit_count = [
        1,
        payload.size.unwrap_or(0),
        payload.distinct_size.unwrap_or(0),
        payload.commits.len() as u64,
    ]
    .into_iter()
    .max()
    .unwrap_or(1);

    let branch = payload
        .git_ref
        .as_deref()
        .and_then(|git_ref| git_ref.rsplit('/').next())
        .unwrap_or_default();

    let pushed_text = if payload.forced {
        "force pushed"
    } else {
        "pushed"
    };
    let commit_text = if commit_count > 1 {
        format!("{commit_count} commits")
    } else {
        "a commit".to_string()
    };
    // Only the default branch is worth naming.
    let branch_text = if branch == "master" {
        format!("to {branch}")
    } else {
        String::new()
    };

    format!("{pushed_text} {commit_text} {branch_text}")
}

const fn issue_action_verb(action: EventAction) -> Option<&'static str> {
    match action {
        EventAction::Opened => Some("opened"),
        EventAction::Closed => Some("closed"),
        EventAction::Reopened => Some("reopened"),
        EventAction::Assigned => Some("assigned"),
        EventAction::Unassigned => Some("unassigned"),
        EventAction::Labeled => Some("labeled"),
        EventAction::Unlabeled => Some("unlabeled"),
        EventAction::Edited => Some("edited"),
        EventAction::Milestoned => Some("milestoned"),
        EventAction::Demilestoned => Some("demilestoned"),
        _ => None,
    }
}

const fn pull_request_action_verb(action: EventAction) -> Option<&'static str> {
    match action {
        EventAction::Opened => Some("opened"),
        EventAction::Closed => Some("closed"),
        EventAction::Reopened => Some("reopened"),
        EventAction::Assigned => Some("assigned"),
        EventAction::Unassigned => Some("unassigned"),
        EventAction::Labeled => Some("labeled"),
        EventAction::Unlabeled => Some("unlabeled"),
        EventAction::Edited => Some("edited"),
        _ => None,
    }
}

/// Collapse runs of whitespace to a single space and trim both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
