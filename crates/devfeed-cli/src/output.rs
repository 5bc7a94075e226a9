//! Output formatting for the CLI.

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use devfeed_core::{CardRow, EventCard, GitHubEvent};
use devfeed_fs::FeedSummary;
use serde::Serialize;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Print a list in the specified format.
pub fn print_list<T: Serialize + HumanDisplay>(values: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for value in values {
                println!("{}", value.human_display());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(values)?),
    }
    Ok(())
}

/// Print stored feeds with dynamic column widths.
pub fn print_feed_list(feeds: &[FeedSummary], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if feeds.is_empty() {
                println!("No feeds found.");
                return Ok(());
            }

            let name_width = feeds.iter().map(|f| f.name.len()).max().unwrap_or(4).max(4);

            println!("{:<name_w$}  EVENTS", "FEED", name_w = name_width);
            println!("{}", "-".repeat(name_width + 8));

            for feed in feeds {
                println!("{}", human_display_padded(feed, name_width));
            }
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => print_list(feeds, format),
    }
}

/// Print a success message.
pub fn print_success(message: &str, format: OutputFormat) -> Result<()> {
    #[derive(Serialize)]
    struct Status<'a> {
        status: &'static str,
        message: &'a str,
    }

    let status = Status {
        status: "ok",
        message,
    };

    match format {
        OutputFormat::Human => println!("{}", style(message).green()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&status)?),
    }
    Ok(())
}

/// Trait for human-readable display.
pub trait HumanDisplay {
    fn human_display(&self) -> String;
}

impl HumanDisplay for EventCard {
    fn human_display(&self) -> String {
        let header = &self.header;

        let mut flags = Vec::new();
        if header.is_bot {
            flags.push("bot");
        }
        if header.is_private {
            flags.push("private");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };

        let mut lines = vec![format!(
            "[{time}] {icon} {user} {text}{flags}",
            time = format_time(&header.created_at),
            icon = style(format!("[{}]", header.icon)).dim(),
            user = style(&header.username).bold(),
            text = header.action_text,
        )];

        lines.extend(self.rows.iter().flat_map(row_lines).map(|line| format!("    {line}")));

        lines.join("\n")
    }
}

impl HumanDisplay for FeedSummary {
    fn human_display(&self) -> String {
        human_display_padded(self, self.name.len())
    }
}

fn human_display_padded(feed: &FeedSummary, width: usize) -> String {
    format!("{:<width$}  {}", feed.name, feed.events)
}

impl HumanDisplay for GitHubEvent {
    fn human_display(&self) -> String {
        let repos = self
            .repositories()
            .iter()
            .map(|r| r.full_name())
            .collect::<Vec<_>>()
            .join(", ");

        let mut line = format!(
            "[{time}] {id:<12} {actor} {event_type} {repos}",
            time = format_time(&self.created_at),
            id = self.id,
            actor = self.actor.username(),
            event_type = self.event_type,
        );

        if self.is_aggregate() {
            line.push_str(&format!(" (merged: {})", self.merged.join(", ")));
        }

        line
    }
}

/// Indented detail lines for one card row.
fn row_lines(row: &CardRow) -> Vec<String> {
    match row {
        CardRow::Repositories {
            repos,
            is_push,
            is_force_push,
        } => {
            let marker = match (is_push, is_force_push) {
                (_, true) => "force push to ",
                (true, false) => "push to ",
                _ => "",
            };
            repos
                .iter()
                .map(|r| format!("{marker}{}", r.full_name()))
                .collect()
        }
        CardRow::Branch {
            branch,
            owner,
            repository,
            ..
        } => vec![format!("branch {branch} on {owner}/{repository}")],
        CardRow::Fork { owner, repository } => vec![format!("fork {owner}/{repository}")],
        CardRow::Users { users } => users.iter().map(|u| format!("@{}", u.username())).collect(),
        CardRow::WikiPages { pages } => pages
            .iter()
            .map(|p| format!("wiki: {}", if p.title.is_empty() { &p.page_name } else { &p.title }))
            .collect(),
        CardRow::PullRequest(pr) | CardRow::Issue(pr) => {
            vec![format!("[{}] #{} {}", pr.icon, pr.number, pr.title)]
        }
        CardRow::Commits { commits } => commits
            .iter()
            .map(|c| {
                let sha: String = c.sha.chars().take(7).collect();
                let summary = c.message.lines().next().unwrap_or_default();
                format!("{} {summary}", style(sha).yellow())
            })
            .collect(),
        CardRow::Comment(comment) => vec![format!("\"{}\"", comment.body)],
        CardRow::Release(release) => {
            let name = release.name.as_deref().unwrap_or(&release.tag_name);
            vec![format!("release {name} ({}) on {}", release.tag_name, release.branch)]
        }
    }
}

fn format_time(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use devfeed_core::{CardOptions, EventType, Repo, User, event_card, merge_similar_events};

    fn star(id: &str, repo: u64) -> GitHubEvent {
        GitHubEvent::new(
            id,
            EventType::Watch,
            User::new(1, "alice"),
            Utc.with_ymd_and_hms(2018, 6, 1, 12, 0, 0).unwrap(),
        )
        .with_repo(Repo::new(repo, format!("devhub/repo{repo}")))
    }

    #[test]
    fn test_card_human_display_lists_repositories() {
        console::set_colors_enabled(false);
        let events = vec![star("1", 10), star("2", 11)];
        let merged = merge_similar_events(&events);

        let card = event_card(&merged[0], CardOptions::default(), None);
        let text = card.human_display();

        assert!(text.starts_with("[2018-06-01 12:00:00 UTC] [star] alice starred 2 repositories"));
        assert!(text.contains("    devhub/repo10"));
        assert!(text.contains("    devhub/repo11"));
    }

    #[test]
    fn test_event_human_display_shows_merged_ids() {
        let events = vec![star("1", 10), star("2", 11)];
        let merged = merge_similar_events(&events);

        let text = merged[0].human_display();

        assert!(text.contains("WatchEvent:OneUserMultipleRepos"));
        assert!(text.ends_with("(merged: 1, 2)"));
    }
}
