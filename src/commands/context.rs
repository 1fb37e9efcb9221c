use clap::Args;
use serde::Serialize;

use wpmoo::context::{self, ProjectKind};
use wpmoo::identity::{self, ProjectIdentity};
use wpmoo::paths;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ContextArgs {
    /// Directory to inspect (defaults to the current directory)
    #[arg(long)]
    path: Option<String>,
}

#[derive(Serialize)]
pub struct ContextOutput {
    pub command: String,
    pub cwd: String,
    pub kind: ProjectKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

pub fn run(args: ContextArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ContextOutput> {
    let dir = paths::resolve_dir(args.path.as_deref())?;
    let kind = context::detect(&dir);

    let project = match kind {
        ProjectKind::Plugin => Some(identity::load(&dir)),
        _ => None,
    };

    let suggestion = match kind {
        ProjectKind::Unknown => Some(
            "This directory is not a WPMoo project. Plugin detection needs a plugin header and a WPMoo reference in a top-level PHP file."
                .to_string(),
        ),
        ProjectKind::Framework => {
            Some("Framework repository detected. Plugin commands operate on downstream plugins.".to_string())
        }
        ProjectKind::Plugin => None,
    };

    Ok((
        ContextOutput {
            command: "context.show".to_string(),
            cwd: dir.to_string_lossy().to_string(),
            kind,
            project,
            suggestion,
        },
        0,
    ))
}
