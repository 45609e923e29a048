use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use colored::Colorize;

use crate::App;
use crate::action::RemoteAction;
use crate::app::notice;
use crate::app::success;
use crate::config::DEFAULT_REMOTE;
use crate::ops::git::GitOps;
use crate::ops::git::Remote;
use crate::ops::prompt::InputRule;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    /// Show configured remotes, then add, re-point or delete one.
    pub async fn cmd_remotes(&self, stdout: &mut impl Write) -> Result<()> {
        let remotes = self.git.remotes().await?;
        write_remotes(stdout, &remotes)?;

        let index = self
            .prompt
            .select("Remote action", &RemoteAction::labels(), 0)?;
        match RemoteAction::from_index(index) {
            Some(RemoteAction::Add) => self.add_remote(stdout).await,
            Some(RemoteAction::UpdateUrl) => self.update_remote_url(&remotes, stdout).await,
            Some(RemoteAction::Delete) => self.delete_remote(&remotes, stdout).await,
            Some(RemoteAction::Back) | None => Ok(()),
        }
    }

    async fn add_remote(&self, stdout: &mut impl Write) -> Result<()> {
        let name = self.prompt.input(
            "Remote name",
            Some(DEFAULT_REMOTE.to_string()),
            InputRule::NonBlank,
        )?;
        let url = self
            .prompt
            .input("Remote URL", None, InputRule::NonBlank)?;

        self.git.add_remote(&name, &url).await?;
        success(stdout, &format!("Added remote '{}' -> {}", name, url))
    }

    async fn update_remote_url(&self, remotes: &[Remote], stdout: &mut impl Write) -> Result<()> {
        let Some(remote) = self.pick_remote(remotes, "Remote to update", stdout)? else {
            return Ok(());
        };
        let url = self
            .prompt
            .input("New URL", None, InputRule::NonBlank)?;

        self.git.set_remote_url(&remote.name, &url).await?;
        success(
            stdout,
            &format!("Remote '{}' now points to {}", remote.name, url),
        )
    }

    async fn delete_remote(&self, remotes: &[Remote], stdout: &mut impl Write) -> Result<()> {
        let Some(remote) = self.pick_remote(remotes, "Remote to delete", stdout)? else {
            return Ok(());
        };
        let confirmed = self
            .prompt
            .confirm(&format!("Delete remote '{}'?", remote.name), false)?;
        if !confirmed {
            notice(stdout, "Remote kept")?;
            return Ok(());
        }

        self.git.remove_remote(&remote.name).await?;
        success(stdout, &format!("Deleted remote '{}'", remote.name))
    }

    /// Let the user pick one of `remotes`. Prints a notice and returns `None`
    /// when there is nothing to pick.
    fn pick_remote<'a>(
        &self,
        remotes: &'a [Remote],
        prompt: &str,
        stdout: &mut impl Write,
    ) -> Result<Option<&'a Remote>> {
        if remotes.is_empty() {
            notice(stdout, "No remotes configured")?;
            return Ok(None);
        }

        let names: Vec<String> = remotes.iter().map(|remote| remote.name.clone()).collect();
        let index = self.prompt.select(prompt, &names, 0)?;
        remotes.get(index).context("No such remote").map(Some)
    }
}

fn write_remotes(stdout: &mut impl Write, remotes: &[Remote]) -> Result<()> {
    if remotes.is_empty() {
        writeln!(stdout, "{}", "No remotes configured".dimmed())?;
        return Ok(());
    }

    writeln!(stdout, "{}", "Remotes:".bold())?;
    for remote in remotes {
        writeln!(stdout, "  {} {}", remote.name.cyan(), remote.fetch_url)?;
        if remote.push_url != remote.fetch_url {
            writeln!(stdout, "    {} {}", "push:".dimmed(), remote.push_url)?;
        }
    }
    Ok(())
}
