//! Rendering of log lines for the console and the log file
//!
//! Console lines get a colored `HH:MM:SS [TAG] [LEVEL]` prefix and long
//! messages wrap under it. File lines carry the full date and no colors.

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::{DateTime, Local};
use colored::*;
use std::io::{ErrorKind, Write};

const TAG_WIDTH: usize = 9;
const LEVEL_WIDTH: usize = 7;

/// Visible width of `HH:MM:SS [TAG______] [LEVEL__] `
const PREFIX_WIDTH: usize = 9 + (TAG_WIDTH + 3) + (LEVEL_WIDTH + 3);

/// Console width messages are wrapped to (prefix included)
const LINE_WIDTH: usize = 140;

/// Narrowest message column, used if the prefix ever outgrows the line
const MIN_MESSAGE_WIDTH: usize = 40;

struct LogLine<'a> {
    tag: &'a LogTag,
    level: LogLevel,
    message: &'a str,
    time: DateTime<Local>,
}

impl<'a> LogLine<'a> {
    fn console_prefix(&self) -> String {
        format!(
            "{} [{}] [{}] ",
            self.time.format("%H:%M:%S").to_string().dimmed(),
            colored_tag(self.tag),
            colored_level(self.level)
        )
    }

    fn file_line(&self, text: &str) -> String {
        format!(
            "{} [{}] [{}] {}",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.tag.to_plain_string(),
            self.level.as_str(),
            text
        )
    }
}

/// Print a log line and mirror it to the log file
pub fn format_and_log(tag: &LogTag, level: LogLevel, message: &str) {
    let line = LogLine {
        tag,
        level,
        message,
        time: Local::now(),
    };

    let width = LINE_WIDTH
        .saturating_sub(PREFIX_WIDTH)
        .max(MIN_MESSAGE_WIDTH);
    let indent = " ".repeat(PREFIX_WIDTH);

    for (i, chunk) in wrap_text(line.message, width).iter().enumerate() {
        let console = if i == 0 {
            format!("{}{}", line.console_prefix(), chunk)
        } else {
            format!("{}{}", indent, chunk)
        };
        print_console(&console);
        write_to_file(&line.file_line(chunk));
    }
}

fn colored_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Database => label.bright_blue().bold(),
        LogTag::Rates => label.bright_green().bold(),
        LogTag::Converter => label.bright_cyan().bold(),
        LogTag::Offers => label.bright_magenta().bold(),
        LogTag::Webserver => label.cyan().bold(),
    }
}

fn colored_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
    }
}

/// Write one console line; a closed pipe (`| head`) ends the process quietly
fn print_console(text: &str) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let result = writeln!(handle, "{}", text).and_then(|_| handle.flush());

    if let Err(e) = result {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Logger stdout error: {}", e);
    }
}

/// Split `text` into lines of at most `width` characters
///
/// Existing newlines are kept, words are not split unless a single word is
/// wider than `width`.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };

            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = needed;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            let chars: Vec<char> = word.chars().collect();
            let mut pieces = chars.chunks(width).peekable();
            while let Some(piece) = pieces.next() {
                if pieces.peek().is_some() {
                    lines.push(piece.iter().collect());
                } else {
                    current = piece.iter().collect();
                    current_len = piece.len();
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_single_line() {
        assert_eq!(wrap_text("Loaded 9 tiers", 40), vec!["Loaded 9 tiers"]);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "loaded tiers 100 150 200 250 300 400 550 600 1000 from offers";
        let lines = wrap_text(text, 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        let lines = wrap_text(&"x".repeat(25), 10);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_newlines_start_new_lines() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_file_line_is_uncolored() {
        let tag = LogTag::Rates;
        let line = LogLine {
            tag: &tag,
            level: LogLevel::Warning,
            message: "stale",
            time: Local::now(),
        };
        let text = line.file_line("stale");
        assert!(text.ends_with("[RATES] [WARNING] stale"));
        assert!(!text.contains('\x1b'));
    }
}
