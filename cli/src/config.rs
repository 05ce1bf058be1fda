use aojv_core::Config;

use crate::{cmd::GlobalArgs, util};

/// Nearest `aoj-verify.toml` (or the defaults), overridden by command line args.
pub fn load(args: &GlobalArgs) -> anyhow::Result<Config> {
    let cfg = Config::from_file_finding_in_ancestors_or_default(util::current_dir())?;
    Ok(self::with_args(cfg, args))
}

pub fn with_args(mut cfg: Config, args: &GlobalArgs) -> Config {
    let GlobalArgs {
        subcmd: _,
        work_dir,
        verbose: _,
    } = args;

    if let Some(dir) = work_dir {
        cfg.work_dir = dir.clone();
    }
    cfg
}
