use std::io::Write as _;

use aojv_core::style::ColorTheme as _;
use colored::Colorize as _;

/// Log to stderr. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let level = record.level();
            writeln!(
                buf,
                "{} {}",
                format!("[{:<5}]", level).color(level.color()).bold(),
                record.args()
            )
        })
        .init();
}
