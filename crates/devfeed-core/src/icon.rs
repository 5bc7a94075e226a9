//! Icon tokens and the presentation descriptor produced by the classifiers.

use serde::{Deserialize, Serialize};

/// Octicon token names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Book,
    Code,
    CommentDiscussion,
    GitBranch,
    GitCommit,
    GitMerge,
    GitPullRequest,
    Globe,
    Home,
    IssueClosed,
    IssueOpened,
    IssueReopened,
    MarkGithub,
    Organization,
    Person,
    Plus,
    Repo,
    RepoForked,
    Star,
    Tag,
    Trashcan,
}

impl Icon {
    /// Octicon name, e.g. `git-pull-request`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Code => "code",
            Self::CommentDiscussion => "comment-discussion",
            Self::GitBranch => "git-branch",
            Self::GitCommit => "git-commit",
            Self::GitMerge => "git-merge",
            Self::GitPullRequest => "git-pull-request",
            Self::Globe => "globe",
            Self::Home => "home",
            Self::IssueClosed => "issue-closed",
            Self::IssueOpened => "issue-opened",
            Self::IssueReopened => "issue-reopened",
            Self::MarkGithub => "mark-github",
            Self::Organization => "organization",
            Self::Person => "person",
            Self::Plus => "plus",
            Self::Repo => "repo",
            Self::RepoForked => "repo-forked",
            Self::Star => "star",
            Self::Tag => "tag",
            Self::Trashcan => "trashcan",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon, optional overlay icon and optional color for one event.
///
/// A missing color means "use the default foreground color".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub icon: Icon,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_icon: Option<Icon>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl IconDescriptor {
    #[must_use]
    pub const fn new(icon: Icon) -> Self {
        Self {
            icon,
            sub_icon: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    #[must_use]
    pub fn with_sub_icon(mut self, sub_icon: Icon) -> Self {
        self.sub_icon = Some(sub_icon);
        self
    }

    /// Icon a card header shows: the overlay when present, else the primary icon.
    #[must_use]
    pub fn card_icon(&self) -> Icon {
        self.sub_icon.unwrap_or(self.icon)
    }
}
