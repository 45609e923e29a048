use std::io::Write;

use anyhow::Context;
use anyhow::Result;

use crate::App;
use crate::app::notice;
use crate::app::success;
use crate::ops::git::GitOps;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    /// List local branches and check out the one the user picks.
    pub async fn cmd_switch_branch(&self, stdout: &mut impl Write) -> Result<()> {
        let branches = self.git.local_branches().await?;
        if branches.is_empty() {
            notice(stdout, "No local branches yet. Make a first commit.")?;
            return Ok(());
        }

        let current = self.git.current_branch().await.ok();
        let items = branch_items(&branches, current.as_deref());
        let default = current
            .as_ref()
            .and_then(|current| branches.iter().position(|branch| branch == current))
            .unwrap_or(0);

        let index = self.prompt.select("Switch to branch", &items, default)?;
        let target = branches.get(index).context("No such branch")?;

        if current.as_ref() == Some(target) {
            notice(stdout, &format!("'{}' is already the current branch", target))?;
            return Ok(());
        }

        self.git.checkout(target).await?;
        success(stdout, &format!("Switched to branch '{}'", target))
    }
}

/// Menu entries for `branches`, with the current branch marked.
pub(crate) fn branch_items(branches: &[String], current: Option<&str>) -> Vec<String> {
    branches
        .iter()
        .map(|branch| {
            if Some(branch.as_str()) == current {
                format!("{} (current)", branch)
            } else {
                branch.clone()
            }
        })
        .collect()
}
