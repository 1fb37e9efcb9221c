use clap::Args;
use serde::Serialize;

use wpmoo::identity;
use wpmoo::paths;
use wpmoo::pot;
use wpmoo::Error;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct PotArgs {
    /// Project directory (defaults to the current directory)
    #[arg(long)]
    path: Option<String>,

    /// Override the text domain (defaults to the detected one)
    #[arg(long)]
    text_domain: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "command")]
pub enum PotOutput {
    #[serde(rename = "pot.generate")]
    Generate {
        text_domain: String,
        path: String,
        entries: usize,
    },
}

pub fn run(args: PotArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<PotOutput> {
    let dir = paths::resolve_dir(args.path.as_deref())?;

    let text_domain = match args.text_domain {
        Some(domain) => domain,
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

    let output = pot::generate(&dir, &text_domain)?;

    Ok((
        PotOutput::Generate {
            text_domain,
            path: output.path,
            entries: output.entries,
        },
        0,
    ))
}
