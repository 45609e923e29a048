use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::App;
use crate::app::success;
use crate::ops::git::GitOps;
use crate::ops::git::PullSummary;
use crate::ops::prompt::PromptOps;

impl<G: GitOps, P: PromptOps> App<G, P> {
    pub async fn cmd_pull(&self, stdout: &mut impl Write) -> Result<()> {
        let summary = self.git.pull().await?;
        write_pull_summary(stdout, &summary)
    }
}

pub(crate) fn write_pull_summary(stdout: &mut impl Write, summary: &PullSummary) -> Result<()> {
    if summary.is_up_to_date() {
        writeln!(stdout, "{}", "Already up to date.".green())?;
        return Ok(());
    }

    let files = summary.files.len();
    success(
        stdout,
        &format!(
            "Pulled {} file{} changed, {} insertion{}(+), {} deletion{}(-)",
            files,
            plural(files as u64),
            summary.insertions,
            plural(summary.insertions),
            summary.deletions,
            plural(summary.deletions),
        ),
    )?;
    for file in &summary.files {
        writeln!(stdout, "  {}", file.dimmed())?;
    }
    Ok(())
}

fn plural(count: u64) -> &'static str {
    if count == 1 { "" } else { "s" }
}
