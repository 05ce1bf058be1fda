use std::path::PathBuf;

use aojv_core::action;
use aojv_webclient::AojClient;

use crate::config;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()]
    pub program_file: PathBuf,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let (annotation, testcase_dir) = action::locate_testcase_dir(&args.program_file, &cfg)?;

    let client = AojClient::with_request_interval(cfg.fetch.request_interval())?;
    let report = action::fetch_testcases(&client, &annotation.problem_url, &testcase_dir).await?;

    println!("{}", report.testcase_dir.to_string_lossy());
    Ok(())
}
