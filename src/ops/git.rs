#![allow(async_fn_in_trait)]

use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::debug;

use crate::error::Error;

// -----------------------------------------------------------------------------
// GitOps trait

/// Operations for interacting with Git
#[cfg_attr(test, automock)]
pub trait GitOps {
    /// Whether the working directory is inside a git working tree.
    async fn is_repository(&self) -> Result<bool>;
    /// Name of the checked out branch. Fails on a detached HEAD.
    async fn current_branch(&self) -> Result<String>;
    async fn status(&self) -> Result<RepoStatus>;
    /// Stage every change in the working tree, including untracked files.
    async fn add_all(&self) -> Result<()>;
    async fn commit(&self, message: &str) -> Result<CommitId>;
    /// Pull the current branch from its upstream.
    async fn pull(&self) -> Result<PullSummary>;
    async fn push(&self, remote: &str, branch: &str) -> Result<()>;
    async fn local_branches(&self) -> Result<Vec<String>>;
    async fn checkout(&self, branch: &str) -> Result<()>;
    /// Merge `branch` into the current branch, returning git's summary.
    async fn merge(&self, branch: &str) -> Result<String>;
    async fn remotes(&self) -> Result<Vec<Remote>>;
    async fn add_remote(&self, name: &str, url: &str) -> Result<()>;
    async fn set_remote_url(&self, name: &str, url: &str) -> Result<()>;
    async fn remove_remote(&self, name: &str) -> Result<()>;
}

// -----------------------------------------------------------------------------
// Types

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitId(pub String);

impl Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Working tree status as reported by `git status --porcelain=v2 --branch -z`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStatus {
    /// `None` on a detached HEAD.
    pub branch: Option<String>,
    pub tracking: Option<String>,
    pub ahead: u32,
    pub behind: u32,
    /// Paths with changes in the index.
    pub staged: Vec<String>,
    /// Tracked paths with unstaged changes in the working tree.
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    /// Unmerged paths.
    pub conflicted: Vec<String>,
}

impl RepoStatus {
    /// Whether there is anything for a commit to pick up.
    pub fn has_changes(&self) -> bool {
        !self.staged.is_empty()
            || !self.modified.is_empty()
            || !self.untracked.is_empty()
            || !self.conflicted.is_empty()
    }
}

/// Changes brought in by a pull.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullSummary {
    pub files: Vec<String>,
    pub insertions: u64,
    pub deletions: u64,
}

impl PullSummary {
    pub fn is_up_to_date(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub fetch_url: String,
    pub push_url: String,
}

// -----------------------------------------------------------------------------
// RealGit

/// Real implementation that calls the git CLI
pub struct RealGit {
    path: PathBuf,
}

impl RealGit {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Run git with `args`, returning stdout on success.
    async fn git(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!(%command, "Running git");

        let output = Command::new("git")
            .current_dir(&self.path)
            .args(args)
            .output()
            .await
            .context("Failed to execute git command")?;

        debug!(%command, status = %output.status, "git finished");

        if !output.status.success() {
            return Err(Error::GitCommand {
                command,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8(output.stdout)?)
    }

    async fn head(&self) -> Result<CommitId> {
        Ok(CommitId(
            self.git(&["rev-parse", "HEAD"]).await?.trim().to_string(),
        ))
    }

    /// Id of the empty tree in this repository's object format.
    async fn empty_tree(&self) -> Result<CommitId> {
        Ok(CommitId(
            self.git(&["hash-object", "-t", "tree", "--stdin"])
                .await?
                .trim()
                .to_string(),
        ))
    }
}

impl GitOps for RealGit {
    async fn is_repository(&self) -> Result<bool> {
        let output = Command::new("git")
            .current_dir(&self.path)
            .args(["rev-parse", "--is-inside-work-tree"])
            .output()
            .await
            .context("Failed to execute git command")?;

        // Non-zero exit means we are outside any repository
        Ok(output.status.success()
            && String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    async fn current_branch(&self) -> Result<String> {
        Ok(self
            .git(&["symbolic-ref", "--short", "HEAD"])
            .await?
            .trim()
            .to_string())
    }

    async fn status(&self) -> Result<RepoStatus> {
        let output = self
            .git(&["status", "--porcelain=v2", "--branch", "-z"])
            .await?;
        Ok(parse_status(&output))
    }

    async fn add_all(&self) -> Result<()> {
        self.git(&["add", "--all"]).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<CommitId> {
        self.git(&["commit", "-m", message]).await?;
        Ok(CommitId(
            self.git(&["rev-parse", "--short", "HEAD"])
                .await?
                .trim()
                .to_string(),
        ))
    }

    async fn pull(&self) -> Result<PullSummary> {
        // An unborn branch has no HEAD yet; everything pulled is new
        let before = match self.head().await {
            Ok(head) => head,
            Err(err) => {
                debug!("No commit before pull: {err:#}");
                self.empty_tree().await?
            }
        };
        self.git(&["pull"]).await?;
        let after = self.head().await?;

        if before == after {
            return Ok(PullSummary::default());
        }

        let numstat = self
            .git(&["diff", "--numstat", "--no-renames", "-z", &before.0, &after.0])
            .await?;
        Ok(parse_numstat(&numstat))
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(&["push", "--set-upstream", "--", remote, branch])
            .await?;
        Ok(())
    }

    async fn local_branches(&self) -> Result<Vec<String>> {
        let output = self
            .git(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])
            .await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        self.git(&["checkout", branch]).await?;
        Ok(())
    }

    async fn merge(&self, branch: &str) -> Result<String> {
        Ok(self
            .git(&["merge", "--no-edit", branch])
            .await?
            .trim()
            .to_string())
    }

    async fn remotes(&self) -> Result<Vec<Remote>> {
        let output = self.git(&["remote", "-v"]).await?;
        Ok(parse_remotes(&output))
    }

    async fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "add", name, url]).await?;
        Ok(())
    }

    async fn set_remote_url(&self, name: &str, url: &str) -> Result<()> {
        self.git(&["remote", "set-url", name, url]).await?;
        Ok(())
    }

    async fn remove_remote(&self, name: &str) -> Result<()> {
        self.git(&["remote", "remove", name]).await?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Output parsing

/// Parse `git status --porcelain=v2 --branch -z` output.
///
/// Records are NUL separated and paths are never quoted.
pub fn parse_status(output: &str) -> RepoStatus {
    let mut status = RepoStatus::default();

    let mut records = output.split('\0');
    while let Some(record) = records.next() {
        if let Some(header) = record.strip_prefix("# ") {
            let Some((key, value)) = header.split_once(' ') else {
                continue;
            };
            match key {
                "branch.head" if value != "(detached)" => {
                    status.branch = Some(value.to_string());
                }
                "branch.upstream" => status.tracking = Some(value.to_string()),
                "branch.ab" => {
                    for count in value.split_whitespace() {
                        if let Some(n) = count.strip_prefix('+') {
                            status.ahead = n.parse().unwrap_or(0);
                        } else if let Some(n) = count.strip_prefix('-') {
                            status.behind = n.parse().unwrap_or(0);
                        }
                    }
                }
                _ => {}
            }
        } else if let Some(path) = record.strip_prefix("? ") {
            status.untracked.push(path.to_string());
        } else if let Some(entry) = record.strip_prefix("1 ") {
            // <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
            let fields: Vec<&str> = entry.splitn(8, ' ').collect();
            if let [xy, .., path] = fields.as_slice() {
                record_change(&mut status, xy, path);
            }
        } else if let Some(entry) = record.strip_prefix("2 ") {
            // <XY> <sub> <mH> <mI> <mW> <hH> <hI> <Xscore> <path>, then <origPath>
            let fields: Vec<&str> = entry.splitn(9, ' ').collect();
            if let [xy, .., path] = fields.as_slice() {
                record_change(&mut status, xy, path);
            }
            records.next();
        } else if let Some(entry) = record.strip_prefix("u ") {
            // <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
            if let Some(path) = entry.splitn(10, ' ').nth(9) {
                status.conflicted.push(path.to_string());
            }
        }
    }

    status
}

/// Sort a tracked path into the index and worktree lists by its XY code.
fn record_change(status: &mut RepoStatus, xy: &str, path: &str) {
    let mut codes = xy.chars();
    if codes.next().is_some_and(|x| x != '.') {
        status.staged.push(path.to_string());
    }
    if codes.next().is_some_and(|y| y != '.') {
        status.modified.push(path.to_string());
    }
}

/// Parse `git diff --numstat --no-renames -z` output. Binary files count as
/// zero lines.
pub fn parse_numstat(output: &str) -> PullSummary {
    let mut summary = PullSummary::default();

    for record in output.split('\0') {
        let mut fields = record.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        summary.insertions += added.parse::<u64>().unwrap_or(0);
        summary.deletions += deleted.parse::<u64>().unwrap_or(0);
        summary.files.push(path.to_string());
    }

    summary
}

/// Parse `git remote -v` output, keeping the order remotes first appear in.
pub fn parse_remotes(output: &str) -> Vec<Remote> {
    let mut remotes: Vec<Remote> = Vec::new();

    for line in output.lines() {
        let Some((name, rest)) = line.split_once('\t') else {
            continue;
        };
        let Some((url, kind)) = rest.rsplit_once(' ') else {
            continue;
        };

        let index = match remotes.iter().position(|remote| remote.name == name) {
            Some(index) => index,
            None => {
                remotes.push(Remote {
                    name: name.to_string(),
                    fetch_url: String::new(),
                    push_url: String::new(),
                });
                remotes.len() - 1
            }
        };

        match kind {
            "(fetch)" => remotes[index].fetch_url = url.to_string(),
            "(push)" => remotes[index].push_url = url.to_string(),
            _ => {}
        }
    }

    remotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_branch_headers() {
        let output = "# branch.oid 4b825dc642cb6eb9a060e54bf8d69288fbee4904\0\
# branch.head main\0\
# branch.upstream origin/main\0\
# branch.ab +2 -1\0";
        let status = parse_status(output);
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert_eq!(status.tracking.as_deref(), Some("origin/main"));
        assert_eq!(status.ahead, 2);
        assert_eq!(status.behind, 1);
        assert!(!status.has_changes());
    }

    #[test]
    fn test_parse_status_entries() {
        let output = "# branch.oid (initial)\0\
# branch.head (detached)\0\
1 .M N... 100644 100644 100644 aaaa bbbb src/lib.rs\0\
1 A. N... 000000 100644 100644 0000 cccc new file.txt\0\
1 MM N... 100644 100644 100644 aaaa bbbb both.rs\0\
2 R. N... 100644 100644 100644 dddd eeee R100 renamed.rs\0old.rs\0\
u UU N... 100644 100644 100644 100644 ffff 1111 2222 conflict.rs\0\
? scratch.txt\0\
! target/\0";
        let status = parse_status(output);
        assert_eq!(status.branch, None);
        assert_eq!(status.tracking, None);
        assert_eq!(status.staged, vec!["new file.txt", "both.rs", "renamed.rs"]);
        assert_eq!(status.modified, vec!["src/lib.rs", "both.rs"]);
        assert_eq!(status.conflicted, vec!["conflict.rs"]);
        assert_eq!(status.untracked, vec!["scratch.txt"]);
        assert!(status.has_changes());
    }

    #[test]
    fn test_untracked_only_counts_as_changes() {
        let status = parse_status("# branch.head main\0? notes.md\0");
        assert!(status.modified.is_empty());
        assert!(status.has_changes());
    }

    #[test]
    fn test_staged_only_counts_as_changes() {
        let status = parse_status("1 M. N... 100644 100644 100644 aaaa bbbb README.md\0");
        assert_eq!(status.staged, vec!["README.md"]);
        assert!(status.modified.is_empty());
        assert!(status.has_changes());
    }

    #[test]
    fn test_parse_status_keeps_raw_paths() {
        let status = parse_status("? h\u{e9}llo world.txt\0");
        assert_eq!(status.untracked, vec!["h\u{e9}llo world.txt"]);
    }

    #[test]
    fn test_parse_numstat() {
        let output = ["3\t1\tsrc/main.rs", "-\t-\tlogo.png", "10\t0\tREADME.md", ""].join("\0");
        let summary = parse_numstat(&output);
        assert_eq!(summary.files, vec!["src/main.rs", "logo.png", "README.md"]);
        assert_eq!(summary.insertions, 13);
        assert_eq!(summary.deletions, 1);
        assert!(!summary.is_up_to_date());
        assert!(parse_numstat("").is_up_to_date());
    }

    #[test]
    fn test_parse_remotes() {
        let output = "\
origin\tgit@github.com:me/repo.git (fetch)
origin\tgit@github.com:me/repo.git (push)
upstream\thttps://github.com/them/repo.git (fetch)
upstream\tno_push (push)
";
        let remotes = parse_remotes(output);
        assert_eq!(
            remotes,
            vec![
                Remote {
                    name: "origin".to_string(),
                    fetch_url: "git@github.com:me/repo.git".to_string(),
                    push_url: "git@github.com:me/repo.git".to_string(),
                },
                Remote {
                    name: "upstream".to_string(),
                    fetch_url: "https://github.com/them/repo.git".to_string(),
                    push_url: "no_push".to_string(),
                },
            ]
        );
        assert!(parse_remotes("").is_empty());
    }
}
