//! Icon/color classification of events.

use crate::event::{EventAction, EventType, GitHubEvent, IssueState, RefType};
use crate::icon::{Icon, IconDescriptor};
use crate::palette::Palette;
use crate::state::{
    PullRequestState, issue_icon_and_color, issue_state_icon, pull_request_icon_and_color,
    pull_request_state_icon,
};

/// Map an event to its presentation descriptor.
///
/// Total over every event: unknown types and actions land on a fallback arm.
/// When `palette` is `None` the default palette is used.
#[must_use]
pub fn classify(event: &GitHubEvent, palette: Option<&Palette>) -> IconDescriptor {
    let palette = Palette::or_default(palette);
    let payload = &event.payload;

    match event.event_type {
        EventType::CommitComment => {
            IconDescriptor::new(Icon::GitCommit).with_sub_icon(Icon::CommentDiscussion)
        }

        EventType::Create => match payload.ref_type {
            Some(RefType::Repository) => IconDescriptor::new(Icon::Repo),
            Some(RefType::Branch) => IconDescriptor::new(Icon::GitBranch),
            Some(RefType::Tag) => IconDescriptor::new(Icon::Tag),
            _ => IconDescriptor::new(Icon::Plus),
        },

        EventType::Delete => match payload.ref_type {
            Some(RefType::Repository) => IconDescriptor::new(Icon::Repo).with_color(&palette.red),
            Some(RefType::Branch) => IconDescriptor::new(Icon::GitBranch).with_color(&palette.red),
            Some(RefType::Tag) => IconDescriptor::new(Icon::Tag).with_color(&palette.red),
            _ => IconDescriptor::new(Icon::Trashcan),
        },

        EventType::Gollum => IconDescriptor::new(Icon::Book),
        EventType::Fork => IconDescriptor::new(Icon::RepoForked),

        EventType::IssueComment => {
            let descriptor = match &payload.issue {
                Some(issue) if issue.is_pull_request() => {
                    pull_request_state_icon(issue.pull_request_state(), Some(palette))
                }
                Some(issue) => issue_icon_and_color(issue, Some(palette)),
                None => issue_state_icon(IssueState::Unknown, Some(palette)),
            };
            descriptor.with_sub_icon(Icon::CommentDiscussion)
        }

        EventType::Issues => match payload.action {
            Some(EventAction::Opened) => issue_state_icon(IssueState::Open, Some(palette)),
            Some(EventAction::Closed) => issue_state_icon(IssueState::Closed, Some(palette)),
            Some(EventAction::Reopened) => {
                issue_state_icon(IssueState::Open, Some(palette)).with_icon(Icon::IssueReopened)
            }
            _ => {
                let state = payload.issue.as_ref().map_or(IssueState::Unknown, |i| i.state);
                issue_state_icon(state, Some(palette))
            }
        },

        EventType::Member => IconDescriptor::new(Icon::Person),
        EventType::Public => IconDescriptor::new(Icon::Globe).with_color(&palette.blue),

        EventType::PullRequest => match payload.action {
            Some(EventAction::Opened | EventAction::Reopened) => {
                pull_request_state_icon(PullRequestState::Open, Some(palette))
            }
            _ => pull_request_descriptor(event, palette),
        },

        EventType::PullRequestReview | EventType::PullRequestReviewComment => {
            pull_request_descriptor(event, palette).with_sub_icon(Icon::CommentDiscussion)
        }

        EventType::Push => IconDescriptor::new(Icon::Code),
        EventType::Release => IconDescriptor::new(Icon::Tag),

        EventType::Watch | EventType::WatchMultipleRepos => {
            IconDescriptor::new(Icon::Star).with_color(&palette.star)
        }

        EventType::Unknown => IconDescriptor::new(Icon::MarkGithub),
    }
}

fn pull_request_descriptor(event: &GitHubEvent, palette: &Palette) -> IconDescriptor {
    match &event.payload.pull_request {
        Some(pull_request) => pull_request_icon_and_color(pull_request, Some(palette)),
        None => pull_request_state_icon(PullRequestState::Unknown, Some(palette)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventPayload, Issue, PullRequest, PullRequestLink, User};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn event(event_type: EventType, payload: EventPayload) -> GitHubEvent {
        let created_at = Utc.with_ymd_and_hms(2018, 6, 1, 12, 0, 0).unwrap();
        GitHubEvent::new("1", event_type, User::new(1, "alice"), created_at).with_payload(payload)
    }

    fn ref_payload(ref_type: RefType) -> EventPayload {
        EventPayload {
            ref_type: Some(ref_type),
            ..EventPayload::default()
        }
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let descriptor = classify(&event(EventType::Unknown, EventPayload::default()), None);
        assert_eq!(descriptor, IconDescriptor::new(Icon::MarkGithub));
    }

    #[test]
    fn test_create_and_delete_by_ref_type() {
        let red = Palette::default().red;

        let created = classify(&event(EventType::Create, ref_payload(RefType::Branch)), None);
        assert_eq!(created, IconDescriptor::new(Icon::GitBranch));

        let deleted = classify(&event(EventType::Delete, ref_payload(RefType::Tag)), None);
        assert_eq!(deleted.icon, Icon::Tag);
        assert_eq!(deleted.color, Some(red));

        let other = classify(&event(EventType::Delete, ref_payload(RefType::Other)), None);
        assert_eq!(other, IconDescriptor::new(Icon::Trashcan));

        let missing = classify(&event(EventType::Create, EventPayload::default()), None);
        assert_eq!(missing, IconDescriptor::new(Icon::Plus));
    }

    #[test]
    fn test_reopened_issue_uses_open_color_with_reopened_icon() {
        let descriptor = classify(
            &event(EventType::Issues, EventPayload::with_action(EventAction::Reopened)),
            None,
        );

        assert_eq!(descriptor.icon, Icon::IssueReopened);
        assert_eq!(descriptor.color, Some(Palette::default().green));
    }

    #[test]
    fn test_labeled_issue_uses_issue_state() {
        let payload = EventPayload {
            issue: Some(Issue {
                state: IssueState::Closed,
                ..Issue::default()
            }),
            ..EventPayload::with_action(EventAction::Labeled)
        };

        let descriptor = classify(&event(EventType::Issues, payload), None);
        assert_eq!(descriptor.icon, Icon::IssueClosed);
    }

    #[test]
    fn test_comment_on_pull_request_issue() {
        let payload = EventPayload {
            issue: Some(Issue {
                state: IssueState::Open,
                pull_request: Some(PullRequestLink::default()),
                ..Issue::default()
            }),
            ..EventPayload::with_action(EventAction::Created)
        };

        let descriptor = classify(&event(EventType::IssueComment, payload), None);
        assert_eq!(descriptor.icon, Icon::GitPullRequest);
        assert_eq!(descriptor.sub_icon, Some(Icon::CommentDiscussion));
        assert_eq!(descriptor.card_icon(), Icon::CommentDiscussion);
    }

    #[test]
    fn test_closed_pull_request_event_reports_merge() {
        let payload = EventPayload {
            pull_request: Some(PullRequest {
                state: IssueState::Closed,
                merged_at: Some(Utc::now()),
                ..PullRequest::default()
            }),
            ..EventPayload::with_action(EventAction::Closed)
        };

        let descriptor = classify(&event(EventType::PullRequest, payload), None);
        assert_eq!(descriptor.icon, Icon::GitMerge);
    }

    #[test]
    fn test_review_comment_without_pull_request_still_classifies() {
        let descriptor = classify(
            &event(EventType::PullRequestReviewComment, EventPayload::default()),
            None,
        );

        assert_eq!(descriptor.icon, Icon::GitPullRequest);
        assert_eq!(descriptor.sub_icon, Some(Icon::CommentDiscussion));
        assert_eq!(descriptor.color, None);
    }

    #[test]
    fn test_star_events_use_star_color() {
        let palette = Palette {
            star: "gold".to_string(),
            ..Palette::default()
        };

        for event_type in [EventType::Watch, EventType::WatchMultipleRepos] {
            let descriptor = classify(&event(event_type, EventPayload::default()), Some(&palette));
            assert_eq!(descriptor.icon, Icon::Star);
            assert_eq!(descriptor.color.as_deref(), Some("gold"));
        }
    }
}
