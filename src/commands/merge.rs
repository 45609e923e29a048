use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use colored::Colorize;

use crate::App;
use crate::app::notice;
use crate::app::success;
use crate::ops::git::GitOps;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    /// Merge another local branch into the current one, after confirmation.
    pub async fn cmd_merge(&self, stdout: &mut impl Write) -> Result<()> {
        let current = self.git.current_branch().await?;
        let candidates: Vec<String> = self
            .git
            .local_branches()
            .await?
            .into_iter()
            .filter(|branch| *branch != current)
            .collect();

        if candidates.is_empty() {
            notice(stdout, "No other branches to merge")?;
            return Ok(());
        }

        let index = self.prompt.select(
            &format!("Merge which branch into '{}'?", current),
            &candidates,
            0,
        )?;
        let source = candidates.get(index).context("No such branch")?;

        let confirmed = self.prompt.confirm(
            &format!(
                "Merge '{}' into '{}'? This updates your working tree",
                source, current
            ),
            false,
        )?;
        if !confirmed {
            notice(stdout, "Merge cancelled")?;
            return Ok(());
        }

        let summary = self.git.merge(source).await?;
        success(stdout, &format!("Merged '{}' into '{}'", source, current))?;
        for line in summary.lines() {
            writeln!(stdout, "  {}", line.dimmed())?;
        }
        Ok(())
    }
}
