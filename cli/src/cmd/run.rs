use std::path::PathBuf;

use aojv_core::action;
use aojv_webclient::AojClient;

use crate::config;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Program file that has a `// verification-helper: PROBLEM <url>` line
    #[arg()] // positional argument
    pub program_file: PathBuf,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let client = AojClient::with_request_interval(cfg.fetch.request_interval())?;

    let _ = action::fetch_and_verify(&client, &args.program_file, &cfg).await?;
    Ok(())
}
