use clap::Args;
use serde::Serialize;

use wpmoo::collect;
use wpmoo::context::{self, ProjectKind};
use wpmoo::identity::{self, ProjectIdentity};
use wpmoo::prompt::{PromptPort, TerminalPrompt};
use wpmoo::rename::{self, RenameOperation};
use wpmoo::{paths, Error};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct RenameArgs {
    /// Project directory (defaults to the current directory)
    #[arg(long)]
    path: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "command")]
pub enum RenameOutput {
    #[serde(rename = "rename.apply")]
    Applied {
        old: ProjectIdentity,
        new: ProjectIdentity,
        changed_files: Vec<String>,
    },
    #[serde(rename = "rename.cancel")]
    Cancelled { old: ProjectIdentity },
}

pub fn run(args: RenameArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<RenameOutput> {
    let port = TerminalPrompt::new();
    run_with_port(args, &port)
}

pub(crate) fn run_with_port(args: RenameArgs, port: &dyn PromptPort) -> CmdResult<RenameOutput> {
    let dir = paths::resolve_dir(args.path.as_deref())?;

    if context::detect(&dir) != ProjectKind::Plugin {
        return Err(Error::context_not_plugin(dir.to_string_lossy().to_string()));
    }

    let old = identity::load(&dir);
    let missing = old.missing_fields();
    if !missing.is_empty() {
        return Err(Error::rename_identity_missing(missing));
    }
    if old.main_file.is_none() {
        return Err(Error::rename_main_file_missing(
            dir.to_string_lossy().to_string(),
        ));
    }

    let Some(new) = collect::collect_new_identity(port, &old)? else {
        // Declining the summary is a clean exit, not an error.
        return Ok((RenameOutput::Cancelled { old }, 0));
    };

    let op = rename::execute(&dir, RenameOperation::new(old, new))?;

    Ok((
        RenameOutput::Applied {
            old: op.old,
            new: op.new,
            changed_files: op.changed_files,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpmoo::prompt::ScriptedPrompt;

    fn plugin_fixture(dir: &std::path::Path) {
        std::fs::write(
            dir.join("old-plugin.php"),
            concat!(
                "<?php\n",
                "/**\n",
                " * Plugin Name: Old Plugin\n",
                " * Text Domain: old-plugin\n",
                " */\n",
                "// Built on WPMoo.\n",
                "namespace OldNs;\n",
            ),
        )
        .unwrap();
        std::fs::write(
            dir.join("wpmoo-config.yml"),
            "project:\n  name: Old Plugin\n  namespace: OldNs\n  text_domain: old-plugin\n",
        )
        .unwrap();
    }

    fn args_for(dir: &std::path::Path) -> RenameArgs {
        RenameArgs {
            path: Some(dir.to_string_lossy().to_string()),
        }
    }

    #[test]
    fn refuses_outside_a_plugin_directory() {
        let dir = tempfile::tempdir().unwrap();
        let port = ScriptedPrompt::new(&[], &[]);

        let err = run_with_port(args_for(dir.path()), &port).unwrap_err();
        assert_eq!(err.code.as_str(), "context.not_plugin");
    }

    #[test]
    fn declining_confirmation_is_a_clean_cancel() {
        let dir = tempfile::tempdir().unwrap();
        plugin_fixture(dir.path());
        let port = ScriptedPrompt::new(&["New Plugin", "", ""], &[false]);

        let (output, exit_code) = run_with_port(args_for(dir.path()), &port).unwrap();
        assert_eq!(exit_code, 0);
        assert!(matches!(output, RenameOutput::Cancelled { .. }));
        // No side effects.
        assert!(dir.path().join("old-plugin.php").exists());
    }

    #[test]
    fn full_interactive_rename_applies() {
        let dir = tempfile::tempdir().unwrap();
        plugin_fixture(dir.path());
        let port = ScriptedPrompt::new(&["New Plugin", "", ""], &[true]);

        let (output, exit_code) = run_with_port(args_for(dir.path()), &port).unwrap();
        assert_eq!(exit_code, 0);
        let RenameOutput::Applied { new, changed_files, .. } = output else {
            panic!("expected an applied rename");
        };
        assert_eq!(new.text_domain, "new-plugin");
        assert!(!changed_files.is_empty());
        assert!(dir.path().join("new-plugin.php").exists());
    }
}
