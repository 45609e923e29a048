use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Runs git in `dir`, failing the test setup if git does.
pub async fn git(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await?;
    anyhow::ensure!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(String::from_utf8(output.stdout)?)
}

/// Creates a git repository in the given directory.
///
/// This initializes the repo on `main` and sets basic git config needed for
/// commits. The directory should already exist.
pub async fn create_git_repo(dir: &Path) -> anyhow::Result<()> {
    git(dir, &["init", "--initial-branch=main"]).await?;
    configure_identity(dir).await
}

/// Creates a bare repository to act as a remote.
pub async fn create_bare_repo(dir: &Path) -> anyhow::Result<()> {
    git(dir, &["init", "--bare", "--initial-branch=main"]).await?;
    Ok(())
}

/// Clones `remote` into `dir` and sets the commit identity.
pub async fn clone_repo(remote: &Path, dir: &Path) -> anyhow::Result<()> {
    let remote = remote.to_string_lossy();
    let target = dir.to_string_lossy();
    git(Path::new("."), &["clone", "--quiet", &remote, &target]).await?;
    configure_identity(dir).await
}

async fn configure_identity(dir: &Path) -> anyhow::Result<()> {
    git(dir, &["config", "user.name", "Test User"]).await?;
    git(dir, &["config", "user.email", "test@example.com"]).await?;
    git(dir, &["config", "commit.gpgsign", "false"]).await?;
    Ok(())
}

/// Writes a file and commits it.
pub async fn commit_file(
    dir: &Path,
    message: &str,
    filename: &str,
    contents: &str,
) -> anyhow::Result<()> {
    tokio::fs::write(dir.join(filename), contents).await?;
    git(dir, &["add", filename]).await?;
    git(dir, &["commit", "--quiet", "-m", message]).await?;
    Ok(())
}

pub enum TestDir {
    Temp(tempfile::TempDir),
    Kept(std::path::PathBuf),
}

impl TestDir {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;

        if std::env::var("DEBUG_TESTS").is_ok() {
            let path = temp_dir.keep();
            eprintln!("Test directory kept at: {}", path.display());
            Ok(TestDir::Kept(path))
        } else {
            Ok(TestDir::Temp(temp_dir))
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            TestDir::Temp(t) => t.path(),
            TestDir::Kept(p) => p.as_path(),
        }
    }
}
