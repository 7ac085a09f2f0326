use crate::messages::Locale;
use clap::Parser;

/// Command-line arguments for git-sparse-check
///
/// Every input left out here is taken from the configuration file or asked for
/// interactively.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "git-sparse-check")]
#[command(about = "A CLI tool for sparse-checking out selected directories of a Git repository")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Parent directory the project folder is created in
    #[arg(short, long, value_name = "DIR", env = "GIT_SPARSE_CHECK_TARGET_DIR")]
    pub target_dir: Option<String>,

    /// Git remote URL; its last path segment names the project folder
    #[arg(short, long, value_name = "URL", env = "GIT_SPARSE_CHECK_REPOSITORY")]
    pub repository: Option<String>,

    /// Branch to pull
    #[arg(short, long, value_name = "BRANCH", env = "GIT_SPARSE_CHECK_BRANCH")]
    pub branch: Option<String>,

    /// Comma-separated repository directories to check out
    #[arg(short, long, value_name = "PATHS", env = "GIT_SPARSE_CHECK_PATHS")]
    pub paths: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "PATH", env = "GIT_SPARSE_CHECK_CONFIG")]
    pub config: Option<String>,

    /// Git executable to run
    #[arg(long = "git", value_name = "PATH", env = "GIT_SPARSE_CHECK_GIT")]
    pub git_binary: Option<String>,

    /// Language of messages and prompts
    #[arg(long, value_enum, value_name = "LOCALE", env = "GIT_SPARSE_CHECK_LOCALE")]
    pub locale: Option<Locale>,

    /// Never prompt; stop quietly if an input is missing
    #[arg(long)]
    pub no_prompt: bool,

    /// Show what would be done without touching the filesystem or running git
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}
