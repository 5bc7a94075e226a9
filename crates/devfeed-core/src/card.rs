//! Event card view model.
//!
//! Turns one (possibly merged) event into a header plus the ordered detail
//! rows a feed renderer shows underneath it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::describe::{DescribeOptions, describe};
use crate::event::{
    Comment, Commit, EventAction, EventType, GitHubEvent, Repo, User, WikiPage,
};
use crate::icon::Icon;
use crate::palette::Palette;
use crate::state::{issue_icon_and_color, pull_request_icon_and_color};

/// Longest comment excerpt shown on a card, in characters.
pub const COMMENT_EXCERPT_LEN: usize = 400;

/// Options for building a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardOptions {
    /// The feed is scoped to the event's repository, so it need not be listed.
    pub repo_is_known: bool,
}

/// Header line of an event card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHeader {
    pub action_text: String,
    pub icon: Icon,
    pub icon_color: String,
    pub avatar_url: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_link_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_bot: bool,
    pub is_private: bool,
}

/// An issue or pull request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueOrPullRequestRow {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub icon: Icon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub username: String,
    pub avatar_url: String,
}

/// A comment excerpt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub username: String,
    pub avatar_url: String,
}

/// A release line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRow {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub username: String,
}

/// One detail row of an event card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum CardRow {
    Repositories {
        repos: Vec<Repo>,
        is_push: bool,
        is_force_push: bool,
    },
    Branch {
        branch: String,
        owner: String,
        repository: String,
        event_type: EventType,
    },
    Fork {
        owner: String,
        repository: String,
    },
    Users {
        users: Vec<User>,
    },
    WikiPages {
        pages: Vec<WikiPage>,
    },
    PullRequest(IssueOrPullRequestRow),
    Commits {
        commits: Vec<Commit>,
    },
    Issue(IssueOrPullRequestRow),
    Comment(CommentRow),
    Release(ReleaseRow),
}

/// A fully classified event ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCard {
    pub id: String,
    pub header: CardHeader,
    pub rows: Vec<CardRow>,
}

/// Build the card for one event.
#[must_use]
pub fn event_card(
    event: &GitHubEvent,
    options: CardOptions,
    palette: Option<&Palette>,
) -> EventCard {
    let palette = Palette::or_default(palette);
    let payload = &event.payload;

    let repos: Vec<Repo> = event
        .repositories()
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !(options.repo_is_known && *index == 0))
        .map(|(_, repo)| repo.clone())
        .collect();
    let single_repo = match repos.as_slice() {
        [repo] => Some(repo),
        _ => None,
    };

    let descriptor = classify(event, Some(palette));
    let action_text = describe(
        event,
        DescribeOptions {
            repo_is_known: options.repo_is_known,
            ..DescribeOptions::default()
        },
    );

    let is_push = event.event_type == EventType::Push;
    let is_force_push = is_push && payload.forced;
    let is_private = !event.public || single_repo.is_some_and(|repo| repo.private);

    let header = CardHeader {
        action_text,
        icon: descriptor.card_icon(),
        icon_color: descriptor
            .color
            .clone()
            .unwrap_or_else(|| palette.foreground.clone()),
        avatar_url: event.actor.avatar_url.clone(),
        username: event.actor.username().to_string(),
        user_link_url: event.actor.html_url.clone(),
        created_at: event.created_at,
        is_bot: event.actor.is_bot(),
        is_private,
    };

    let mut rows = Vec::new();

    if !repos.is_empty() {
        rows.push(CardRow::Repositories {
            repos: repos.clone(),
            is_push,
            is_force_push,
        });
    }

    if let (Some((owner, repository)), Some(branch)) = (
        single_repo.and_then(Repo::owner_and_name),
        payload.git_ref.as_deref().filter(|r| !r.is_empty()),
    ) {
        rows.push(CardRow::Branch {
            branch: branch.to_string(),
            owner: owner.to_string(),
            repository: repository.to_string(),
            event_type: event.event_type,
        });
    }

    if let Some((owner, repository)) = payload.forkee.as_ref().and_then(Repo::owner_and_name) {
        rows.push(CardRow::Fork {
            owner: owner.to_string(),
            repository: repository.to_string(),
        });
    }

    if let Some(member) = &payload.member {
        rows.push(CardRow::Users {
            users: vec![member.clone()],
        });
    }

    if !payload.pages.is_empty() {
        rows.push(CardRow::WikiPages {
            pages: payload.pages.clone(),
        });
    }

    if let Some(pull_request) = &payload.pull_request {
        let state = pull_request_icon_and_color(pull_request, Some(palette));
        let url = bodiless_comment_url(payload.comment.as_ref())
            .or_else(|| pull_request.html_url.clone().or_else(|| pull_request.url.clone()));

        rows.push(CardRow::PullRequest(IssueOrPullRequestRow {
            id: pull_request.id,
            number: pull_request.number,
            title: pull_request.title.clone(),
            icon: state.icon,
            icon_color: state.color,
            url,
            username: pull_request.user.username().to_string(),
            avatar_url: pull_request.user.avatar_url.clone(),
        }));
    }

    if !payload.commits.is_empty() {
        rows.push(CardRow::Commits {
            commits: payload.commits.clone(),
        });
    }

    if let Some(issue) = &payload.issue {
        let state = issue_icon_and_color(issue, Some(palette));
        let url = bodiless_comment_url(payload.comment.as_ref())
            .or_else(|| issue.html_url.clone().or_else(|| issue.url.clone()));

        rows.push(CardRow::Issue(IssueOrPullRequestRow {
            id: issue.id,
            number: issue.number,
            title: issue.title.clone(),
            icon: state.icon,
            icon_color: state.color,
            url,
            username: issue.user.username().to_string(),
            avatar_url: issue.user.avatar_url.clone(),
        }));
    }

    if let Some(comment) = comment_row(event) {
        rows.push(CardRow::Comment(comment));
    }

    if let Some(release) = &payload.release {
        rows.push(CardRow::Release(ReleaseRow {
            tag_name: release.tag_name.clone(),
            name: release.name.clone(),
            branch: release.target_commitish.clone(),
            body: release.body.clone(),
            url: release.html_url.clone().or_else(|| release.url.clone()),
            username: release.author.username().to_string(),
        }));
    }

    EventCard {
        id: event.id.clone(),
        header,
        rows,
    }
}

/// Build cards for a whole feed.
#[must_use]
pub fn event_cards(
    events: &[GitHubEvent],
    options: CardOptions,
    palette: Option<&Palette>,
) -> Vec<EventCard> {
    events
        .iter()
        .map(|event| event_card(event, options, palette))
        .collect()
}

/// Link to a comment that has no body of its own (e.g. an approving review).
fn bodiless_comment_url(comment: Option<&Comment>) -> Option<String> {
    let comment = comment?;
    if comment.body.as_deref().is_some_and(|body| !body.trim().is_empty()) {
        return None;
    }
    comment.html_url.clone().or_else(|| comment.url.clone())
}

/// The single comment excerpt a card shows.
///
/// An opened issue or pull request shows its description; anything else shows
/// the attached comment.
fn comment_row(event: &GitHubEvent) -> Option<CommentRow> {
    let payload = &event.payload;
    let opened = payload.action == Some(EventAction::Opened);

    if event.event_type == EventType::Issues && opened {
        if let Some(issue) = &payload.issue {
            if let Some(body) = issue.body.as_deref().and_then(excerpt) {
                return Some(CommentRow {
                    body,
                    url: issue.html_url.clone().or_else(|| issue.url.clone()),
                    username: issue.user.username().to_string(),
                    avatar_url: issue.user.avatar_url.clone(),
                });
            }
        }
    }

    if event.event_type == EventType::PullRequest && opened {
        if let Some(pull_request) = &payload.pull_request {
            if let Some(body) = pull_request.body.as_deref().and_then(excerpt) {
                return Some(CommentRow {
                    body,
                    url: pull_request.html_url.clone().or_else(|| pull_request.url.clone()),
                    username: pull_request.user.username().to_string(),
                    avatar_url: pull_request.user.avatar_url.clone(),
                });
            }
        }
    }

    let comment = payload.comment.as_ref()?;
    let body = comment.body.as_deref().and_then(excerpt)?;
    Some(CommentRow {
        body,
        url: comment.html_url.clone().or_else(|| comment.url.clone()),
        username: comment.user.username().to_string(),
        avatar_url: comment.user.avatar_url.clone(),
    })
}

/// Collapse whitespace and cut the text to [`COMMENT_EXCERPT_LEN`] characters.
fn excerpt(body: &str) -> Option<String> {
    let collapsed = crate::describe::normalize_whitespace(body);
    if collapsed.is_empty() {
        return None;
    }

    if collapsed.chars().count() <= COMMENT_EXCERPT_LEN {
        return Some(collapsed);
    }

    let cut: String = collapsed.chars().take(COMMENT_EXCERPT_LEN - 3).collect();
    Some(format!("{}...", cut.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventPayload, Issue, IssueState, PullRequest, Release};
    use crate::merge::merge_similar_events;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(event_type: EventType, payload: EventPayload) -> GitHubEvent {
        GitHubEvent::new("e1", event_type, User::new(1, "alice"), t0())
            .with_repo(Repo::new(10, "devhub/app"))
            .with_payload(payload)
    }

    fn row_kinds(card: &EventCard) -> Vec<&'static str> {
        card.rows
            .iter()
            .map(|row| match row {
                CardRow::Repositories { .. } => "repositories",
                CardRow::Branch { .. } => "branch",
                CardRow::Fork { .. } => "fork",
                CardRow::Users { .. } => "users",
                CardRow::WikiPages { .. } => "wiki_pages",
                CardRow::PullRequest(_) => "pull_request",
                CardRow::Commits { .. } => "commits",
                CardRow::Issue(_) => "issue",
                CardRow::Comment(_) => "comment",
                CardRow::Release(_) => "release",
            })
            .collect()
    }

    #[test]
    fn test_push_card_rows() {
        let payload = EventPayload {
            git_ref: Some("refs/heads/master".to_string()),
            size: Some(1),
            commits: vec![Commit {
                sha: "abc".to_string(),
                ..Commit::default()
            }],
            ..EventPayload::default()
        };

        let card = event_card(&event(EventType::Push, payload), CardOptions::default(), None);

        assert_eq!(row_kinds(&card), vec!["repositories", "branch", "commits"]);
        assert_eq!(card.header.action_text, "pushed a commit to master");
        assert_eq!(card.header.icon, Icon::Code);
        assert_eq!(card.header.icon_color, Palette::default().foreground);
    }

    #[test]
    fn test_known_repo_is_not_listed() {
        let card = event_card(
            &event(EventType::Watch, EventPayload::default()),
            CardOptions { repo_is_known: true },
            None,
        );

        assert!(card.rows.is_empty());
        assert_eq!(card.header.action_text, "starred this repository");
    }

    #[test]
    fn test_merged_stars_list_every_repo() {
        let stars: Vec<GitHubEvent> = (1..=3)
            .map(|i| {
                let created_at = t0() - Duration::minutes(i);
                let actor = User::new(1, "alice");
                GitHubEvent::new(format!("s{i}"), EventType::Watch, actor, created_at)
                    .with_repo(Repo::new(u64::try_from(i).unwrap(), format!("devhub/repo{i}")))
            })
            .collect();
        let merged = merge_similar_events(&stars);

        let card = event_card(&merged[0], CardOptions::default(), None);
        match &card.rows[0] {
            CardRow::Repositories { repos, .. } => assert_eq!(repos.len(), 3),
            other => panic!("unexpected row {other:?}"),
        }
        assert_eq!(card.header.action_text, "starred 3 repositories");
        assert_eq!(card.header.icon_color, Palette::default().star);

        let known = event_card(&merged[0], CardOptions { repo_is_known: true }, None);
        match &known.rows[0] {
            CardRow::Repositories { repos, .. } => assert_eq!(repos.len(), 2),
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_opened_issue_shows_body_excerpt() {
        let payload = EventPayload {
            issue: Some(Issue {
                id: 7,
                number: 42,
                title: "Crash on start".to_string(),
                body: Some("It   crashes\n\nevery time".to_string()),
                state: IssueState::Open,
                ..Issue::default()
            }),
            ..EventPayload::with_action(EventAction::Opened)
        };

        let card = event_card(&event(EventType::Issues, payload), CardOptions::default(), None);

        assert_eq!(row_kinds(&card), vec!["repositories", "issue", "comment"]);
        match card.rows.last() {
            Some(CardRow::Comment(comment)) => assert_eq!(comment.body, "It crashes every time"),
            other => panic!("unexpected row {other:?}"),
        }
    }

    #[test]
    fn test_review_without_body_links_to_comment() {
        let payload = EventPayload {
            pull_request: Some(PullRequest {
                id: 3,
                html_url: Some("https://github.com/devhub/app/pull/3".to_string()),
                ..PullRequest::default()
            }),
            comment: Some(Comment {
                html_url: Some("https://github.com/devhub/app/pull/3#review-1".to_string()),
                ..Comment::default()
            }),
            ..EventPayload::with_action(EventAction::Submitted)
        };

        let card = event_card(
            &event(EventType::PullRequestReview, payload),
            CardOptions::default(),
            None,
        );

        assert_eq!(row_kinds(&card), vec!["repositories", "pull_request"]);
        match &card.rows[1] {
            CardRow::PullRequest(row) => assert_eq!(
                row.url.as_deref(),
                Some("https://github.com/devhub/app/pull/3#review-1")
            ),
            other => panic!("unexpected row {other:?}"),
        }
        assert_eq!(card.header.icon, Icon::CommentDiscussion);
    }

    #[test]
    fn test_private_and_bot_flags() {
        let payload = EventPayload {
            release: Some(Release {
                tag_name: "v1.0.0".to_string(),
                target_commitish: "master".to_string(),
                ..Release::default()
            }),
            ..EventPayload::default()
        };
        let mut private = event(EventType::Release, payload);
        private.repo = Some(Repo::new(10, "devhub/app").with_private(true));
        private.actor = User::new(2, "renovate[bot]");

        let card = event_card(&private, CardOptions::default(), None);

        assert!(card.header.is_private);
        assert!(card.header.is_bot);
        assert_eq!(row_kinds(&card), vec!["repositories", "release"]);
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let long = "word ".repeat(200);
        let cut = excerpt(&long).unwrap();

        assert!(cut.chars().count() <= COMMENT_EXCERPT_LEN);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt(" \n "), None);
    }
}
