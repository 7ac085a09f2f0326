//! Checkout pipeline tests against mock git, filesystem and notifier
#![expect(clippy::unwrap_used, reason = "This is a test module")]

use git_sparse_check::error::CheckoutError;
use git_sparse_check::git::{ControlFile, GitStep, MockGit, RepoState};
use git_sparse_check::messages::Locale;
use git_sparse_check::notify::RecordingNotifier;
use git_sparse_check::operations::{
    CheckoutOperation, CheckoutOutcome, CheckoutRequest, RequestField,
};
use git_sparse_check::system::{MockSystem, System as _};
use std::path::{Path, PathBuf};

const CONTROL_FILE: &str = "/tmp/x/foo/.git/info/sparse-checkout";

fn request() -> CheckoutRequest {
    CheckoutRequest {
        target_parent_dir: Some(PathBuf::from("/tmp/x")),
        repository: Some("https://example.com/foo.git".to_owned()),
        branch: Some("main".to_owned()),
        raw_paths: Some("web,lib".to_owned()),
    }
}

fn execute(
    system: &MockSystem,
    git: &MockGit,
    notifier: &RecordingNotifier,
    request: &CheckoutRequest,
) -> anyhow::Result<CheckoutOutcome> {
    CheckoutOperation::new(system, git, notifier, Locale::En).execute(request)
}

fn checkout_error(err: &anyhow::Error) -> &CheckoutError {
    err.downcast_ref::<CheckoutError>()
        .expect("error should be a CheckoutError")
}

#[test]
fn test_end_to_end_scenario() {
    let system = MockSystem::new();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();

    let outcome = execute(&system, &git, &notifier, &request()).unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::Completed {
            project_dir: PathBuf::from("/tmp/x/foo"),
            skipped: Vec::new(),
            control_file: ControlFile::Written,
        }
    );
    assert!(system.is_dir(Path::new("/tmp/x/foo")).unwrap());

    let invocations = git.invocations();
    let args: Vec<Vec<String>> = invocations.iter().map(|inv| inv.args.clone()).collect();
    assert_eq!(
        args,
        vec![
            vec!["init".to_owned()],
            ["remote", "add", "-f", "origin", "https://example.com/foo.git"]
                .map(str::to_owned)
                .to_vec(),
            ["config", "core.sparseCheckout", "true"]
                .map(str::to_owned)
                .to_vec(),
            ["pull", "origin", "main"].map(str::to_owned).to_vec(),
        ]
    );
    assert!(
        invocations
            .iter()
            .all(|inv| inv.cwd == Path::new("/tmp/x/foo"))
    );

    assert_eq!(
        system.read_to_string(Path::new(CONTROL_FILE)).unwrap(),
        "/web\n/lib\n"
    );

    assert!(notifier.errors().is_empty());
    assert_eq!(
        notifier.infos(),
        [
            "Created folder /tmp/x/foo",
            "Created sparse-checkout file",
            "Pull succeeded"
        ]
    );
}

#[test]
fn test_paths_are_trimmed_in_order_with_duplicates() {
    let system = MockSystem::new();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();
    let request = CheckoutRequest {
        raw_paths: Some("a, b ,c,a".to_owned()),
        ..request()
    };

    execute(&system, &git, &notifier, &request).unwrap();

    assert_eq!(
        system.read_to_string(Path::new(CONTROL_FILE)).unwrap(),
        "/a\n/b\n/c\n/a\n"
    );
}

#[test]
fn test_missing_input_does_nothing() {
    let cases = [
        (
            CheckoutRequest {
                target_parent_dir: None,
                ..request()
            },
            RequestField::TargetDir,
        ),
        (
            CheckoutRequest {
                repository: None,
                ..request()
            },
            RequestField::Repository,
        ),
        (
            CheckoutRequest {
                branch: None,
                ..request()
            },
            RequestField::Branch,
        ),
        (
            CheckoutRequest {
                raw_paths: None,
                ..request()
            },
            RequestField::Paths,
        ),
    ];

    for (request, missing) in cases {
        let system = MockSystem::new();
        let git = MockGit::new();
        let notifier = RecordingNotifier::new();

        let outcome = execute(&system, &git, &notifier, &request).unwrap();

        assert_eq!(outcome, CheckoutOutcome::Aborted { missing });
        assert!(git.invocations().is_empty());
        assert!(!system.exists(Path::new("/tmp/x/foo")).unwrap());
        assert!(notifier.notices().is_empty());
    }
}

#[test]
fn test_init_failure_stops_everything_after_it() {
    let system = MockSystem::new();
    let git = MockGit::new().with_exit_code(GitStep::Init, 128);
    let notifier = RecordingNotifier::new();

    let err = execute(&system, &git, &notifier, &request()).unwrap_err();

    assert!(matches!(
        checkout_error(&err),
        CheckoutError::Git {
            step: GitStep::Init,
            code: Some(128)
        }
    ));
    assert_eq!(git.steps(), [GitStep::Init]);
    assert!(!system.exists(Path::new(CONTROL_FILE)).unwrap());
    assert_eq!(
        notifier.errors(),
        ["Failed to initialize .git: exit code 128"]
    );
}

#[test]
fn test_init_spawn_error() {
    let system = MockSystem::new();
    let git = MockGit::new().with_spawn_failure(GitStep::Init);
    let notifier = RecordingNotifier::new();

    let err = execute(&system, &git, &notifier, &request()).unwrap_err();

    let checkout = checkout_error(&err);
    assert!(matches!(
        checkout,
        CheckoutError::Spawn {
            step: GitStep::Init,
            ..
        }
    ));
    assert_eq!(checkout.exit_code(), 4);
    assert_eq!(git.steps(), [GitStep::Init]);
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Failed to initialize .git: "));
}

#[test]
fn test_remote_failure() {
    let system = MockSystem::new();
    let git = MockGit::new().with_exit_code(GitStep::RemoteAdd, 1);
    let notifier = RecordingNotifier::new();

    execute(&system, &git, &notifier, &request()).unwrap_err();

    assert_eq!(git.steps(), [GitStep::Init, GitStep::RemoteAdd]);
    assert_eq!(
        notifier.errors(),
        ["Failed to connect to the remote repository: exit code 1"]
    );
}

#[test]
fn test_sparse_config_failure() {
    let system = MockSystem::new();
    let git = MockGit::new().with_exit_code(GitStep::EnableSparseCheckout, 3);
    let notifier = RecordingNotifier::new();

    execute(&system, &git, &notifier, &request()).unwrap_err();

    assert_eq!(
        git.steps(),
        [GitStep::Init, GitStep::RemoteAdd, GitStep::EnableSparseCheckout]
    );
    assert!(!system.exists(Path::new(CONTROL_FILE)).unwrap());
    assert_eq!(
        notifier.errors(),
        ["Failed to enable sparse checkout: exit code 3"]
    );
}

#[test]
fn test_pull_failure_after_control_file() {
    let system = MockSystem::new();
    let git = MockGit::new().with_signal(GitStep::Pull);
    let notifier = RecordingNotifier::new();

    let err = execute(&system, &git, &notifier, &request()).unwrap_err();

    assert!(matches!(
        checkout_error(&err),
        CheckoutError::Git {
            step: GitStep::Pull,
            code: None
        }
    ));
    assert!(system.exists(Path::new(CONTROL_FILE)).unwrap());
    assert_eq!(notifier.errors(), ["Pull failed: terminated by signal"]);
    assert!(!notifier.infos().contains(&"Pull succeeded".to_owned()));
}

#[test]
fn test_existing_control_file_is_kept() {
    let system = MockSystem::new()
        .with_file(CONTROL_FILE, b"/docs\n")
        .unwrap();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();

    let outcome = execute(&system, &git, &notifier, &request()).unwrap();

    assert!(matches!(
        outcome,
        CheckoutOutcome::Completed {
            control_file: ControlFile::Kept,
            ..
        }
    ));
    assert_eq!(
        system.read_to_string(Path::new(CONTROL_FILE)).unwrap(),
        "/docs\n"
    );
    assert!(
        !notifier
            .infos()
            .contains(&"Created sparse-checkout file".to_owned())
    );
}

#[test]
fn test_folder_failure_is_fatal() {
    let system = MockSystem::new()
        .with_dir("/tmp/x")
        .unwrap()
        .with_read_only("/tmp/x")
        .unwrap();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();

    let err = execute(&system, &git, &notifier, &request()).unwrap_err();

    assert_eq!(checkout_error(&err).exit_code(), 3);
    assert!(git.invocations().is_empty());
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.errors()[0].starts_with("Failed to create folder foo: "));
}

#[test]
fn test_control_file_failure_is_fatal() {
    let system = MockSystem::new()
        .with_dir("/tmp/x/foo/.git")
        .unwrap()
        .with_read_only("/tmp/x/foo/.git")
        .unwrap();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();

    let err = execute(&system, &git, &notifier, &request()).unwrap_err();

    assert!(matches!(
        checkout_error(&err),
        CheckoutError::Filesystem { .. }
    ));
    assert_eq!(
        git.steps(),
        [GitStep::Init, GitStep::RemoteAdd, GitStep::EnableSparseCheckout]
    );
    assert!(
        notifier.errors()[0].starts_with("Failed to create .git/info/sparse-checkout: ")
    );
}

#[test]
fn test_rerun_only_pulls() {
    let system = MockSystem::new();
    let git = MockGit::new();

    execute(&system, &git, &RecordingNotifier::new(), &request()).unwrap();

    let notifier = RecordingNotifier::new();
    let outcome = execute(&system, &git, &notifier, &request()).unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::Completed {
            project_dir: PathBuf::from("/tmp/x/foo"),
            skipped: vec![
                GitStep::Init,
                GitStep::RemoteAdd,
                GitStep::EnableSparseCheckout
            ],
            control_file: ControlFile::Kept,
        }
    );
    assert_eq!(
        git.steps(),
        [
            GitStep::Init,
            GitStep::RemoteAdd,
            GitStep::EnableSparseCheckout,
            GitStep::Pull,
            GitStep::Pull
        ]
    );
    assert_eq!(notifier.infos(), ["Pull succeeded"]);
}

#[test]
fn test_rerun_after_remote_failure_resumes() {
    let system = MockSystem::new();
    let failing = MockGit::new().with_exit_code(GitStep::RemoteAdd, 1);
    execute(&system, &failing, &RecordingNotifier::new(), &request()).unwrap_err();

    // Same folder, git now works; the repository from the first run is reused
    let git = MockGit::new().with_repository(
        "/tmp/x/foo",
        RepoState {
            is_repository: true,
            ..RepoState::default()
        },
    );
    execute(&system, &git, &RecordingNotifier::new(), &request()).unwrap();

    assert_eq!(
        git.steps(),
        [GitStep::RemoteAdd, GitStep::EnableSparseCheckout, GitStep::Pull]
    );
}

#[test]
fn test_remote_mismatch() {
    let system = MockSystem::new();
    let git = MockGit::new().with_repository(
        "/tmp/x/foo",
        RepoState {
            is_repository: true,
            origin_url: Some("https://example.com/other.git".to_owned()),
            sparse_checkout: false,
        },
    );
    let notifier = RecordingNotifier::new();

    let err = execute(&system, &git, &notifier, &request()).unwrap_err();

    assert!(matches!(
        checkout_error(&err),
        CheckoutError::RemoteMismatch { .. }
    ));
    assert!(git.invocations().is_empty());
    assert_eq!(
        notifier.errors(),
        ["Failed to connect to the remote repository: origin already points to https://example.com/other.git"]
    );
}

#[test]
fn test_broken_repository_runs_every_step() {
    let system = MockSystem::new();
    let git = MockGit::new().with_broken_repository("/tmp/x/foo");
    let notifier = RecordingNotifier::new();

    execute(&system, &git, &notifier, &request()).unwrap();

    assert_eq!(
        git.steps(),
        [
            GitStep::Init,
            GitStep::RemoteAdd,
            GitStep::EnableSparseCheckout,
            GitStep::Pull
        ]
    );
}

#[test]
fn test_unusable_repository_url() {
    let system = MockSystem::new();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();
    let request = CheckoutRequest {
        repository: Some("https://example.com/.git".to_owned()),
        ..request()
    };

    let err = execute(&system, &git, &notifier, &request).unwrap_err();

    assert_eq!(checkout_error(&err).exit_code(), 1);
    assert!(git.invocations().is_empty());
    assert!(!system.exists(Path::new("/tmp/x")).unwrap());
}

#[test]
fn test_dry_run_touches_nothing() {
    let system = MockSystem::new();
    let git = MockGit::new();
    let notifier = RecordingNotifier::new();

    let outcome = CheckoutOperation::new(&system, &git, &notifier, Locale::En)
        .dry_run(true)
        .execute(&request())
        .unwrap();

    let CheckoutOutcome::Planned {
        project_dir,
        plan,
        skipped,
    } = outcome
    else {
        panic!("expected a planned outcome");
    };
    assert_eq!(project_dir, PathBuf::from("/tmp/x/foo"));
    assert_eq!(plan.len(), 4);
    assert!(skipped.is_empty());
    assert!(git.invocations().is_empty());
    assert!(!system.exists(Path::new("/tmp/x/foo")).unwrap());
    assert_eq!(
        notifier.infos(),
        [
            "[dry run] Would check out into /tmp/x/foo",
            "[dry run] Would run: git init",
            "[dry run] Would run: git remote add -f origin https://example.com/foo.git",
            "[dry run] Would run: git config core.sparseCheckout true",
            "[dry run] Would write /tmp/x/foo/.git/info/sparse-checkout with: /web /lib",
            "[dry run] Would run: git pull origin main",
        ]
    );
}

#[test]
fn test_dry_run_on_completed_folder_plans_only_pull() {
    let system = MockSystem::new()
        .with_file(CONTROL_FILE, b"/docs\n")
        .unwrap();
    let git = MockGit::new().with_repository(
        "/tmp/x/foo",
        RepoState {
            is_repository: true,
            origin_url: Some("https://example.com/foo.git".to_owned()),
            sparse_checkout: true,
        },
    );
    let notifier = RecordingNotifier::new();

    let outcome = CheckoutOperation::new(&system, &git, &notifier, Locale::En)
        .dry_run(true)
        .execute(&request())
        .unwrap();

    let CheckoutOutcome::Planned { plan, skipped, .. } = outcome else {
        panic!("expected a planned outcome");
    };
    assert_eq!(
        plan.iter().map(|inv| inv.step()).collect::<Vec<_>>(),
        [GitStep::Pull]
    );
    assert_eq!(
        skipped,
        [
            GitStep::Init,
            GitStep::RemoteAdd,
            GitStep::EnableSparseCheckout
        ]
    );
    assert_eq!(
        notifier.infos(),
        [
            "[dry run] Would check out into /tmp/x/foo",
            "[dry run] Already done: git init",
            "[dry run] Already done: git remote add",
            "[dry run] Already done: git config core.sparseCheckout",
            "[dry run] Would keep existing /tmp/x/foo/.git/info/sparse-checkout",
            "[dry run] Would run: git pull origin main",
        ]
    );

    // The real run does exactly what was planned
    execute(&system, &git, &RecordingNotifier::new(), &request()).unwrap();
    assert_eq!(git.steps(), [GitStep::Pull]);
    assert_eq!(
        system.read_to_string(Path::new(CONTROL_FILE)).unwrap(),
        "/docs\n"
    );
}

#[test]
fn test_dry_run_reports_remote_mismatch() {
    let system = MockSystem::new().with_dir("/tmp/x/foo").unwrap();
    let git = MockGit::new().with_repository(
        "/tmp/x/foo",
        RepoState {
            is_repository: true,
            origin_url: Some("https://example.com/other.git".to_owned()),
            sparse_checkout: false,
        },
    );
    let notifier = RecordingNotifier::new();

    let err = CheckoutOperation::new(&system, &git, &notifier, Locale::En)
        .dry_run(true)
        .execute(&request())
        .unwrap_err();

    assert!(matches!(
        checkout_error(&err),
        CheckoutError::RemoteMismatch { .. }
    ));
    assert_eq!(notifier.errors().len(), 1);
    assert!(
        !notifier
            .infos()
            .iter()
            .any(|info| info.contains("remote add"))
    );
    assert!(git.invocations().is_empty());
}

#[test]
fn test_chinese_messages() {
    let system = MockSystem::new();
    let git = MockGit::new().with_exit_code(GitStep::Pull, 1);
    let notifier = RecordingNotifier::new();

    CheckoutOperation::new(&system, &git, &notifier, Locale::ZhCn)
        .execute(&request())
        .unwrap_err();

    assert_eq!(
        notifier.infos(),
        ["创建文件夹/tmp/x/foo成功", "创建sparse-checkout成功"]
    );
    assert_eq!(notifier.errors(), ["克隆失败了: exit code 1"]);
}
