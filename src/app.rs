use std::io::Write;

use anyhow::Result;
use anyhow::bail;
use colored::Colorize;
use tracing::debug;
use tracing::info;

use crate::action::Action;
use crate::config::Config;
use crate::error;
use crate::error::Error;
use crate::ops::git::GitOps;
use crate::ops::git::Remote;
use crate::ops::prompt::PromptOps;

const PAUSE_PROMPT: &str = "Press any key to continue...";

/// One interactive session: the config plus both collaborators.
pub struct App<G: GitOps, P: PromptOps> {
    pub config: Config,
    pub git: G,
    pub prompt: P,
}

impl<G: GitOps, P: PromptOps> App<G, P> {
    pub fn new(config: Config, git: G, prompt: P) -> Self {
        Self {
            config,
            git,
            prompt,
        }
    }

    /// Run the menu loop until the user picks Exit.
    ///
    /// Only fatal errors are returned; everything else is reported and the
    /// loop carries on.
    pub async fn run(&self, stdout: &mut impl Write) -> Result<()> {
        if !self.git.is_repository().await? {
            return Err(Error::NotARepository(self.config.workdir.clone()).into());
        }
        info!(workdir = %self.config.workdir.display(), "Session started");

        let labels = Action::labels();
        loop {
            writeln!(stdout)?;
            match self.git.current_branch().await {
                Ok(branch) => writeln!(stdout, "On branch {}", branch.cyan().bold())?,
                Err(err) => debug!("Could not read current branch: {err:#}"),
            }

            let index = self.prompt.select("What would you like to do?", &labels, 0)?;
            let Some(action) = Action::from_index(index) else {
                bail!("Unknown menu entry {index}");
            };

            if action == Action::Exit {
                writeln!(stdout, "{}", "Goodbye!".green())?;
                info!("Session ended");
                return Ok(());
            }

            self.perform(action, stdout).await?;
            if let Err(err) = self.prompt.pause(PAUSE_PROMPT) {
                recover(stdout, "Pause", err)?;
            }
        }
    }

    /// Run one action's handler, reporting any recoverable failure.
    pub async fn perform(&self, action: Action, stdout: &mut impl Write) -> Result<()> {
        debug!(%action, "Running action");
        let result = match action {
            Action::Status => self.cmd_status(stdout).await,
            Action::CommitAndSync => self.cmd_commit_and_sync(stdout).await,
            Action::Pull => self.cmd_pull(stdout).await,
            Action::Push => self.cmd_push(stdout).await,
            Action::Branches => self.cmd_switch_branch(stdout).await,
            Action::Merge => self.cmd_merge(stdout).await,
            Action::Remotes => self.cmd_remotes(stdout).await,
            Action::Exit => Ok(()),
        };
        match result {
            Ok(()) => Ok(()),
            Err(err) => recover(stdout, &action.to_string(), err),
        }
    }

    /// The remote commit & sync pushes to, see [`default_remote`].
    pub(crate) fn default_remote<'a>(&self, remotes: &'a [Remote]) -> Option<&'a Remote> {
        default_remote(remotes, &self.config.default_remote)
    }
}

/// Pick the preferred remote if it is configured, else the first one.
pub fn default_remote<'a>(remotes: &'a [Remote], preferred: &str) -> Option<&'a Remote> {
    remotes
        .iter()
        .find(|remote| remote.name == preferred)
        .or_else(|| remotes.first())
}

/// Report a failed operation and swallow the error, unless it is fatal.
pub(crate) fn recover(
    stdout: &mut impl Write,
    operation: &str,
    err: anyhow::Error,
) -> Result<()> {
    if error::is_fatal(&err) {
        return Err(err);
    }

    info!("{operation} failed: {err:#}");
    let headline = format!("✗ {operation} failed: {err:#}");
    writeln!(stdout, "{}", headline.red())?;
    let details = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .filter_map(Error::detail);
    for detail in details {
        for line in detail.lines() {
            writeln!(stdout, "  {}", line.dimmed())?;
        }
    }
    Ok(())
}

pub(crate) fn success(stdout: &mut impl Write, message: &str) -> Result<()> {
    writeln!(stdout, "{} {}", "✓".green(), message)?;
    Ok(())
}

pub(crate) fn notice(stdout: &mut impl Write, message: &str) -> Result<()> {
    writeln!(stdout, "{}", message.yellow())?;
    Ok(())
}
