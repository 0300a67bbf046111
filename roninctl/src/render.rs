use owo_colors::OwoColorize;
use std::env;
use tabled::{settings::style::Style, Table, Tabled};

pub fn should_use_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Terminal styling for operator output; a no-op when color is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn detect() -> Self {
        Self {
            color: should_use_color(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn info(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn item(&self, text: &str) -> String {
        if self.color {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn help(&self, text: &str) -> String {
        if self.color {
            text.bright_black().italic().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.color {
            format!(" {} ", text).white().on_green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.color {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            format!(" {} ", text).white().on_red().to_string()
        } else {
            text.to_string()
        }
    }
}

#[derive(Tabled)]
struct OutputBlock {
    #[tabled(rename = "Output")]
    text: String,
}

/// Frame captured command output in a rounded box.
pub fn output_box(text: &str) -> String {
    let mut table = Table::new([OutputBlock {
        text: text.to_string(),
    }]);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_leaves_text_untouched() {
        let palette = Palette::plain();
        assert_eq!(palette.error("boom"), "boom");
        assert_eq!(palette.success("ok"), "ok");
        assert_eq!(palette.title("menu"), "menu");
    }

    #[test]
    fn output_box_keeps_every_line() {
        let framed = output_box("line one\nline two");
        assert!(framed.contains("Output"));
        assert!(framed.contains("line one"));
        assert!(framed.contains("line two"));
        assert!(framed.starts_with('╭'));
    }
}
