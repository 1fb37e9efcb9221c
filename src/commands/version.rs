use clap::Args;
use serde::Serialize;

use wpmoo::paths;
use wpmoo::version::{self, BumpSpec, TargetReport};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct VersionArgs {
    /// Bump level (patch, minor, major) or an explicit semver version
    bump: String,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    path: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "command")]
pub enum VersionOutput {
    #[serde(rename = "version.bump")]
    Bump {
        old_version: String,
        new_version: String,
        targets: Vec<TargetReport>,
    },
}

pub fn run(args: VersionArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<VersionOutput> {
    let dir = paths::resolve_dir(args.path.as_deref())?;
    let spec = BumpSpec::parse(&args.bump)?;

    let result = version::bump(&dir, &spec)?;

    Ok((
        VersionOutput::Bump {
            old_version: result.old_version,
            new_version: result.new_version,
            targets: result.targets,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_command_updates_fixture() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("demo.php"),
            "<?php\n/**\n * Plugin Name: Demo\n * Version: 0.9.0\n */\n",
        )
        .unwrap();

        let args = VersionArgs {
            bump: "minor".to_string(),
            path: Some(dir.path().to_string_lossy().to_string()),
        };
        let (output, code) = run(args, &crate::commands::GlobalArgs {}).unwrap();

        assert_eq!(code, 0);
        let VersionOutput::Bump { new_version, .. } = output;
        assert_eq!(new_version, "0.10.0");
    }

    #[test]
    fn invalid_bump_spec_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = VersionArgs {
            bump: "huge".to_string(),
            path: Some(dir.path().to_string_lossy().to_string()),
        };
        let err = run(args, &crate::commands::GlobalArgs {}).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}
