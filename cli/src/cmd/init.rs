use std::path::PathBuf;

use aojv_core::{print_success, Config};
use anyhow::{ensure, Context as _};

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let filepath = args.dir.join(Config::FILENAME);
    ensure!(
        !filepath.exists(),
        "{} already exists",
        filepath.to_string_lossy()
    );

    let toml = Config::example_toml()?;
    fsutil::write_with_mkdir(&filepath, toml).context("Failed to create config file")?;

    print_success!(
        "Successfully created {}",
        filepath.to_string_lossy()
    );
    Ok(())
}
