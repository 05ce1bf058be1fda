use colored::{Color, ColoredString, Colorize};
use strum::IntoEnumIterator as _;

use crate::testing::{Summary, Verdict};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        if !self::is_truecolor_supported() {
            return match self {
                Unknown => Color::White,
                Accepted => Color::Green,
                WrongAnswer => Color::Yellow,
                TimeLimitExceeded => Color::Red,
                RuntimeError => Color::Magenta,
            };
        }

        match self {
            Unknown => Color::TrueColor {
                r: 128,
                g: 128,
                b: 128,
            },
            Accepted => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            WrongAnswer => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            TimeLimitExceeded => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            RuntimeError => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
        }
    }
}

pub fn verdict_icon(verdict: Verdict) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", verdict)
        .on_color(verdict.color())
        .bold()
        .color(fg)
}

/// One line such as `----- 2/5 tests failed 💣 ( WA x1,  RE x1) [slowest: in3 12ms] -----`.
pub fn format_summary(summary: &Summary) -> String {
    let bar = "-".repeat(5);
    let total = summary.total();

    let body = if summary.is_all_accepted() {
        format!("All {} tests passed ✨", total).green().to_string()
    } else {
        let num_failed = total - summary.accepted;
        let summary_msg = if summary.accepted > 0 {
            format!("{}/{} tests failed 💣", num_failed, total)
        } else {
            format!("All {} tests failed 💀", total)
        };

        let detail_msg = Verdict::iter()
            .filter(|&v| v != Verdict::Accepted && summary.count(v) > 0)
            .map(|v| {
                format!(
                    "{}{}{}",
                    self::verdict_icon(v),
                    "x".dimmed(),
                    summary.count(v).to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        format!("{} ({})", summary_msg.bright_red(), detail_msg)
    };

    let slowest = match &summary.slowest {
        Some(s) => format!(
            " [slowest: {} {}ms]",
            s.testcase_name,
            s.execution_time.as_millis()
        )
        .dimmed()
        .to_string(),
        None => String::new(),
    };

    format!("{} {}{} {}", bar, body, slowest, bar)
}

pub fn print_summary(summary: &Summary) {
    println!("{}", self::format_summary(summary));
}
