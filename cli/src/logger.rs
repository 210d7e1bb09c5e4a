use ansi_term::{ANSIString, Color, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct Logger {
    colors_enabled: bool,
}

impl Logger {
    fn prefix(&self, level: Level) -> ANSIString<'static> {
        let style = if self.colors_enabled {
            let color = match level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Cyan,
                Level::Debug => Color::Purple,
                Level::Trace => Color::Green,
            };
            color.bold()
        } else {
            Style::new()
        };
        style.paint(format!("[{}]", level))
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{} {}", self.prefix(record.level()), record.args());
    }

    fn flush(&self) {}
}

/// Installs the logger. If another logger was already installed, only the maximum level changes.
pub fn init(max_level: LevelFilter, colors_enabled: bool) {
    if log::set_boxed_logger(Box::new(Logger { colors_enabled })).is_err() {
        eprintln!("a logger was already installed");
    }
    log::set_max_level(max_level);
}
