use std::path::{Path, PathBuf};
use std::process::Command;

/// A temporary git repository for testing.
///
/// The initial branch is `trunk` so that neither `main` nor `dev` exists
/// until the code under test creates them.
pub struct TestRepo {
    dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a git Command with isolated config (ignores global/system settings).
    fn git_command(dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
        cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
        cmd
    }

    fn git(&self, args: &[&str]) -> String {
        let output = Self::git_command(&self.path())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create a new test repository on `trunk` with an initial commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "--initial-branch=trunk"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["commit", "--allow-empty", "-m", "Initial commit"]);

        repo
    }

    /// Get the canonicalized path to the repository.
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize path")
    }

    pub fn checkout_new(&self, branch: &str) {
        self.git(&["checkout", "-b", branch]);
    }

    pub fn commit(&self, message: &str) {
        self.git(&["commit", "--allow-empty", "-m", message]);
    }

    /// Write an untracked file so the working tree is dirty.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write file");
    }

    pub fn has_branch(&self, branch: &str) -> bool {
        Self::git_command(&self.path())
            .args(["rev-parse", "--verify", "--quiet", &format!("refs/heads/{branch}")])
            .status()
            .expect("Failed to run git rev-parse")
            .success()
    }

    /// Read a key from the repository's local config.
    pub fn config(&self, key: &str) -> Option<String> {
        let output = Self::git_command(&self.path())
            .args(["config", "--local", "--get", key])
            .output()
            .expect("Failed to run git config");
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
