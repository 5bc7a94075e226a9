//! Issue and pull request state sub-classifiers.
//!
//! Shared by the event classifier and by the card rows that show an issue or
//! pull request directly.

use serde::{Deserialize, Serialize};

use crate::event::{Issue, IssueState, PullRequest};
use crate::icon::{Icon, IconDescriptor};
use crate::palette::Palette;

/// Pull request state with "merged" split out of "closed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    Open,
    Closed,
    Merged,
    Unknown,
}

impl PullRequestState {
    /// Derive the state from the reported state and the merge timestamp.
    ///
    /// A merge timestamp takes precedence over whatever state is reported.
    #[must_use]
    pub const fn derive(state: IssueState, merged: bool) -> Self {
        if merged {
            return Self::Merged;
        }

        match state {
            IssueState::Open => Self::Open,
            IssueState::Closed => Self::Closed,
            IssueState::Unknown => Self::Unknown,
        }
    }
}

impl PullRequest {
    /// State of the pull request, accounting for merges.
    #[must_use]
    pub const fn derived_state(&self) -> PullRequestState {
        PullRequestState::derive(self.state, self.merged_at.is_some())
    }
}

impl Issue {
    /// State of the pull request behind this issue.
    ///
    /// Only meaningful when [`Issue::is_pull_request`] holds.
    #[must_use]
    pub fn pull_request_state(&self) -> PullRequestState {
        let merged = self
            .pull_request
            .as_ref()
            .is_some_and(|link| link.merged_at.is_some());
        PullRequestState::derive(self.state, merged)
    }
}

/// Icon and color for an issue state.
#[must_use]
pub fn issue_state_icon(state: IssueState, palette: Option<&Palette>) -> IconDescriptor {
    let palette = Palette::or_default(palette);

    match state {
        IssueState::Open => IconDescriptor::new(Icon::IssueOpened).with_color(&palette.green),
        IssueState::Closed => IconDescriptor::new(Icon::IssueClosed).with_color(&palette.red),
        IssueState::Unknown => IconDescriptor::new(Icon::IssueOpened),
    }
}

/// Icon and color for an issue.
#[must_use]
pub fn issue_icon_and_color(issue: &Issue, palette: Option<&Palette>) -> IconDescriptor {
    issue_state_icon(issue.state, palette)
}

/// Icon and color for a pull request state.
#[must_use]
pub fn pull_request_state_icon(
    state: PullRequestState,
    palette: Option<&Palette>,
) -> IconDescriptor {
    let palette = Palette::or_default(palette);

    match state {
        PullRequestState::Open => {
            IconDescriptor::new(Icon::GitPullRequest).with_color(&palette.green)
        }
        PullRequestState::Closed => {
            IconDescriptor::new(Icon::GitPullRequest).with_color(&palette.red)
        }
        PullRequestState::Merged => IconDescriptor::new(Icon::GitMerge).with_color(&palette.purple),
        PullRequestState::Unknown => IconDescriptor::new(Icon::GitPullRequest),
    }
}

/// Icon and color for a pull request.
#[must_use]
pub fn pull_request_icon_and_color(
    pull_request: &PullRequest,
    palette: Option<&Palette>,
) -> IconDescriptor {
    pull_request_state_icon(pull_request.derived_state(), palette)
}
