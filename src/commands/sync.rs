use std::io::Write;

use anyhow::Result;

use crate::App;
use crate::app::notice;
use crate::app::recover;
use crate::app::success;
use crate::commands::pull::write_pull_summary;
use crate::ops::git::CommitId;
use crate::ops::git::GitOps;
use crate::ops::prompt::InputRule;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    /// Commit everything, then pull, then push to the default remote.
    ///
    /// Each stage only runs if the previous one succeeded. In particular a
    /// failed pull never leads to a push.
    pub async fn cmd_commit_and_sync(&self, stdout: &mut impl Write) -> Result<()> {
        let status = self.git.status().await?;
        if !status.has_changes() {
            notice(stdout, "Nothing to commit: no modified or untracked files")?;
            return Ok(());
        }

        let message = self
            .prompt
            .input("Commit message", None, InputRule::NonBlank)?;

        let commit = match self.stage_and_commit(&message).await {
            Ok(commit) => commit,
            Err(err) => return recover(stdout, "Commit", err),
        };
        success(stdout, &format!("Committed {}", commit))?;

        match self.git.pull().await {
            Ok(summary) => write_pull_summary(stdout, &summary)?,
            Err(err) => {
                recover(stdout, "Pull", err)?;
                notice(stdout, "Skipping push until the pull succeeds")?;
                return Ok(());
            }
        }

        if let Err(err) = self.push_to_default_remote(stdout).await {
            recover(stdout, "Push", err)?;
        }
        Ok(())
    }

    async fn stage_and_commit(&self, message: &str) -> Result<CommitId> {
        self.git.add_all().await?;
        self.git.commit(message).await
    }

    async fn push_to_default_remote(&self, stdout: &mut impl Write) -> Result<()> {
        let remotes = self.git.remotes().await?;
        let Some(remote) = self.default_remote(&remotes) else {
            notice(stdout, "No remotes configured, skipping push")?;
            return Ok(());
        };
        let branch = self.git.current_branch().await?;

        self.git.push(&remote.name, &branch).await?;
        success(stdout, &format!("Pushed {} to {}", branch, remote.name))
    }
}
