//! Localized user-facing text
//!
//! Every message the checkout shows to the user, and the text of every
//! prompt, is rendered here for the selected [`Locale`].

use crate::git::GitStep;
use crate::operations::RequestField;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language of user-facing text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Simplified Chinese
    ZhCn,
}

/// A user-facing notification
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Message<'a> {
    Started,
    FolderCreated {
        path: &'a Path,
    },
    FolderFailed {
        name: &'a str,
        error: &'a str,
    },
    /// A git step exited nonzero or could not be spawned
    StepFailed {
        step: GitStep,
        detail: Option<&'a str>,
    },
    RemoteMismatch {
        existing: &'a str,
    },
    ControlFileCreated,
    ControlFileFailed {
        error: &'a str,
    },
    PullSucceeded,
    DryRunFolder {
        path: &'a Path,
    },
    DryRunCommand {
        command: &'a str,
    },
    DryRunControlFile {
        path: &'a Path,
        entries: &'a str,
    },
    DryRunControlFileKept {
        path: &'a Path,
    },
    /// A step an earlier run already completed
    DryRunSkipped {
        step: GitStep,
    },
}

impl Message<'_> {
    /// Render the message in the given locale
    #[must_use]
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.render_en(),
            Locale::ZhCn => self.render_zh_cn(),
        }
    }

    fn render_en(&self) -> String {
        match *self {
            Self::Started => "Starting sparse checkout".to_owned(),
            Self::FolderCreated { path } => format!("Created folder {}", path.display()),
            Self::FolderFailed { name, error } => {
                format!("Failed to create folder {name}: {error}")
            }
            Self::StepFailed { step, detail } => {
                let base = match step {
                    GitStep::Init => "Failed to initialize .git",
                    GitStep::RemoteAdd => "Failed to connect to the remote repository",
                    GitStep::EnableSparseCheckout => "Failed to enable sparse checkout",
                    GitStep::Pull => "Pull failed",
                };
                with_detail(base, detail)
            }
            Self::RemoteMismatch { existing } => {
                format!("Failed to connect to the remote repository: origin already points to {existing}")
            }
            Self::ControlFileCreated => "Created sparse-checkout file".to_owned(),
            Self::ControlFileFailed { error } => {
                format!("Failed to create .git/info/sparse-checkout: {error}")
            }
            Self::PullSucceeded => "Pull succeeded".to_owned(),
            Self::DryRunFolder { path } => {
                format!("[dry run] Would check out into {}", path.display())
            }
            Self::DryRunCommand { command } => format!("[dry run] Would run: {command}"),
            Self::DryRunControlFile { path, entries } => {
                format!("[dry run] Would write {} with: {entries}", path.display())
            }
            Self::DryRunControlFileKept { path } => {
                format!("[dry run] Would keep existing {}", path.display())
            }
            Self::DryRunSkipped { step } => format!("[dry run] Already done: git {step}"),
        }
    }

    fn render_zh_cn(&self) -> String {
        match *self {
            Self::Started => "开始稀疏检出".to_owned(),
            Self::FolderCreated { path } => format!("创建文件夹{}成功", path.display()),
            Self::FolderFailed { name, error } => format!("创建文件夹{name}失败：{error}"),
            Self::StepFailed { step, detail } => {
                let base = match step {
                    GitStep::Init => "初始化.git失败",
                    GitStep::RemoteAdd => "远程连接失败",
                    GitStep::EnableSparseCheckout => "稀疏检出失败",
                    GitStep::Pull => "克隆失败了",
                };
                with_detail(base, detail)
            }
            Self::RemoteMismatch { existing } => {
                format!("远程连接失败：origin 已指向 {existing}")
            }
            Self::ControlFileCreated => "创建sparse-checkout成功".to_owned(),
            Self::ControlFileFailed { error } => {
                format!("创建文件.git/info/sparse-checkout失败：{error}")
            }
            Self::PullSucceeded => "克隆成功".to_owned(),
            Self::DryRunFolder { path } => format!("[预览] 将检出到 {}", path.display()),
            Self::DryRunCommand { command } => format!("[预览] 将执行：{command}"),
            Self::DryRunControlFile { path, entries } => {
                format!("[预览] 将写入 {}：{entries}", path.display())
            }
            Self::DryRunControlFileKept { path } => {
                format!("[预览] 将保留已有的 {}", path.display())
            }
            Self::DryRunSkipped { step } => format!("[预览] 已完成：git {step}"),
        }
    }
}

fn with_detail(base: &str, detail: Option<&str>) -> String {
    detail.map_or_else(|| base.to_owned(), |detail| format!("{base}: {detail}"))
}

/// Text shown when asking the user for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub field: RequestField,
    pub prompt: String,
    pub placeholder: Option<String>,
}

impl PromptSpec {
    /// Localized prompt for the given input
    #[must_use]
    pub fn new(field: RequestField, locale: Locale) -> Self {
        let (prompt, placeholder) = match (locale, field) {
            (Locale::En, RequestField::TargetDir) => {
                ("Select the folder to download into", None)
            }
            (Locale::En, RequestField::Repository) => {
                ("Enter the git repository URL", Some("https://"))
            }
            (Locale::En, RequestField::Branch) => ("Enter the branch name", Some("e.g. main")),
            (Locale::En, RequestField::Paths) => (
                "Enter the folders to check out, separated by commas",
                Some("e.g. web-search,hb-fed"),
            ),
            (Locale::ZhCn, RequestField::TargetDir) => ("选择下载后保存的目标文件夹", None),
            (Locale::ZhCn, RequestField::Repository) => ("请输入git地址", Some("https")),
            (Locale::ZhCn, RequestField::Branch) => ("请输入分支名称", Some("e.g: main")),
            (Locale::ZhCn, RequestField::Paths) => {
                ("请输入拉取文件夹路径", Some("e.g: web-search,hb-fed"))
            }
        };

        Self {
            field,
            prompt: prompt.to_owned(),
            placeholder: placeholder.map(str::to_owned),
        }
    }
}
