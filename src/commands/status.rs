use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::App;
use crate::ops::git::GitOps;
use crate::ops::git::RepoStatus;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    pub async fn cmd_status(&self, stdout: &mut impl Write) -> Result<()> {
        let status = self.git.status().await?;
        write_status(stdout, &status)
    }
}

fn write_status(stdout: &mut impl Write, status: &RepoStatus) -> Result<()> {
    let branch = status.branch.as_deref().unwrap_or("(detached HEAD)");
    writeln!(stdout, "{} {}", "Branch:".bold(), branch.cyan())?;
    match &status.tracking {
        Some(tracking) => {
            writeln!(stdout, "{} {}", "Tracking:".bold(), tracking)?;
            writeln!(
                stdout,
                "{} {}, {} {}",
                "Ahead:".bold(),
                status.ahead,
                "behind:".bold(),
                status.behind
            )?;
        }
        None => writeln!(stdout, "{} {}", "Tracking:".bold(), "none".dimmed())?,
    }

    if !status.has_changes() {
        writeln!(stdout, "{}", "Working tree clean".green())?;
        return Ok(());
    }

    write_paths(stdout, "Staged", &status.staged, |p| p.green().to_string())?;
    write_paths(stdout, "Modified", &status.modified, |p| p.yellow().to_string())?;
    write_paths(stdout, "Untracked", &status.untracked, |p| p.red().to_string())?;
    write_paths(stdout, "Conflicted", &status.conflicted, |p| {
        p.red().bold().to_string()
    })?;
    Ok(())
}

fn write_paths(
    stdout: &mut impl Write,
    heading: &str,
    paths: &[String],
    paint: impl Fn(&str) -> String,
) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    writeln!(stdout, "{} ({}):", heading.bold(), paths.len())?;
    for path in paths {
        writeln!(stdout, "  {}", paint(path.as_str()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use crate::App;
    use crate::Config;
    use crate::ops::git::MockGitOps;
    use crate::ops::git::RepoStatus;
    use crate::ops::prompt::MockPromptOps;

    #[tokio::test]
    async fn test_cmd_status_lists_changes() {
        let mut mock_git = MockGitOps::new();
        mock_git.expect_status().returning(|| {
            Ok(RepoStatus {
                branch: Some("main".to_string()),
                tracking: Some("origin/main".to_string()),
                ahead: 2,
                behind: 1,
                staged: vec!["src/lib.rs".to_string()],
                modified: vec!["README.md".to_string()],
                untracked: vec!["notes.txt".to_string()],
                conflicted: vec!["src/merge.rs".to_string()],
            })
        });
        let app = App::new(Config::default_for_tests(), mock_git, MockPromptOps::new());

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await.unwrap();
        assert_snapshot!(String::from_utf8(stdout).unwrap(), @r"
        Branch: main
        Tracking: origin/main
        Ahead: 2, behind: 1
        Staged (1):
          src/lib.rs
        Modified (1):
          README.md
        Untracked (1):
          notes.txt
        Conflicted (1):
          src/merge.rs
        ");
    }

    #[tokio::test]
    async fn test_cmd_status_restaged_path_shows_in_both_lists() {
        let mut mock_git = MockGitOps::new();
        mock_git.expect_status().returning(|| {
            Ok(RepoStatus {
                branch: Some("main".to_string()),
                staged: vec!["alpha.txt".to_string()],
                modified: vec!["alpha.txt".to_string()],
                ..Default::default()
            })
        });
        let app = App::new(Config::default_for_tests(), mock_git, MockPromptOps::new());

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await.unwrap();
        assert_snapshot!(String::from_utf8(stdout).unwrap(), @r"
        Branch: main
        Tracking: none
        Staged (1):
          alpha.txt
        Modified (1):
          alpha.txt
        ");
    }

    #[tokio::test]
    async fn test_cmd_status_clean_detached() {
        let mut mock_git = MockGitOps::new();
        mock_git
            .expect_status()
            .returning(|| Ok(RepoStatus::default()));
        let app = App::new(Config::default_for_tests(), mock_git, MockPromptOps::new());

        let mut stdout = Vec::new();
        app.cmd_status(&mut stdout).await.unwrap();
        assert_snapshot!(String::from_utf8(stdout).unwrap(), @r"
        Branch: (detached HEAD)
        Tracking: none
        Working tree clean
        ");
    }
}
