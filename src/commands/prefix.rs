use clap::Args;
use serde::Serialize;

use wpmoo::collect;
use wpmoo::identity;
use wpmoo::paths;
use wpmoo::scss;
use wpmoo::Error;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct PrefixArgs {
    /// New class prefix (a lowercase hyphen-separated slug)
    new_prefix: String,

    /// Old prefix (defaults to the detected text domain)
    #[arg(long)]
    from: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    path: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "command")]
pub enum PrefixOutput {
    #[serde(rename = "prefix.rewrite")]
    Rewrite {
        old_prefix: String,
        new_prefix: String,
        changed_files: Vec<String>,
    },
}

pub fn run(args: PrefixArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<PrefixOutput> {
    let dir = paths::resolve_dir(args.path.as_deref())?;

    if let Err(problem) = collect::validate_text_domain(&args.new_prefix) {
        return Err(Error::validation_invalid_argument(
            "new_prefix",
            problem,
            Some(args.new_prefix.clone()),
            None,
        ));
    }

    let old_prefix = match args.from {
        Some(from) => from,
        None => {
            let identity = identity::load(&dir);
            if identity.text_domain.is_empty() {
                return Err(Error::rename_identity_missing(vec![
                    "text_domain".to_string()
                ]));
            }
            identity.text_domain
        }
    };

    let result = scss::run(&dir, &old_prefix, &args.new_prefix)?;

    Ok((
        PrefixOutput::Rewrite {
            old_prefix: result.old_prefix,
            new_prefix: result.new_prefix,
            changed_files: result.changed_files,
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_stylesheets_using_detected_domain() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("demo.php"),
            "<?php\n/**\n * Plugin Name: Demo\n * Text Domain: demo\n */\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("style.scss"), ".demo-button { }\n").unwrap();

        let args = PrefixArgs {
            new_prefix: "fresh".to_string(),
            from: None,
            path: Some(dir.path().to_string_lossy().to_string()),
        };
        let (output, code) = run(args, &crate::commands::GlobalArgs {}).unwrap();

        assert_eq!(code, 0);
        let PrefixOutput::Rewrite { changed_files, .. } = output;
        assert_eq!(changed_files, vec!["style.scss"]);
        assert!(std::fs::read_to_string(dir.path().join("style.scss"))
            .unwrap()
            .contains(".fresh-button"));
    }

    #[test]
    fn rejects_malformed_new_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let args = PrefixArgs {
            new_prefix: "Not A Slug".to_string(),
            from: Some("demo".to_string()),
            path: Some(dir.path().to_string_lossy().to_string()),
        };
        let err = run(args, &crate::commands::GlobalArgs {}).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}
