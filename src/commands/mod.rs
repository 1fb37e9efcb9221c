pub type CmdResult<T> = wpmoo::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod context;
pub mod pot;
pub mod prefix;
pub mod rename;
pub mod version;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (wpmoo::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Rename(args) => dispatch!(args, global, rename),
        crate::Commands::Context(args) => dispatch!(args, global, context),
        crate::Commands::Version(args) => dispatch!(args, global, version),
        crate::Commands::Pot(args) => dispatch!(args, global, pot),
        crate::Commands::Prefix(args) => dispatch!(args, global, prefix),
    }
}
