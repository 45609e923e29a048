use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;

use crate::App;
use crate::app::notice;
use crate::app::success;
use crate::ops::git::GitOps;
use crate::ops::prompt::InputRule;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    /// Push a branch to a remote the user picks.
    pub async fn cmd_push(&self, stdout: &mut impl Write) -> Result<()> {
        let remotes = self.git.remotes().await?;
        if remotes.is_empty() {
            notice(stdout, "No remotes configured. Add one under Manage remotes.")?;
            return Ok(());
        }

        let names: Vec<String> = remotes.iter().map(|remote| remote.name.clone()).collect();
        let default = self
            .default_remote(&remotes)
            .and_then(|remote| names.iter().position(|name| *name == remote.name))
            .unwrap_or(0);
        let index = self.prompt.select("Push to remote", &names, default)?;
        let remote = names.get(index).context("No such remote")?;

        // Without a current branch the user has to type one
        let current = self.git.current_branch().await.ok();
        let branch = self
            .prompt
            .input("Branch to push", current, InputRule::NonBlank)?;
        if branch.starts_with('-') {
            bail!("'{branch}' is not a branch name");
        }

        self.git.push(remote, &branch).await?;
        success(stdout, &format!("Pushed {} to {}", branch, remote))
    }
}
