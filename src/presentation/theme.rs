use colored::Colorize;

pub struct Theme {
    pub source: fn(&str) -> String,
    pub translated: fn(&str) -> String,
    pub lang: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub hint: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" | "" => Self::plain(),
            "vivid" => Self::vivid(),
            "mono" => Self::mono(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::plain() // Fallback to default
            }
        }
    }

    fn plain() -> Self {
        Self {
            source: |s| s.white().to_string(),
            translated: |s| s.bright_green().bold().to_string(),
            lang: |s| s.cyan().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            hint: |s| s.bright_black().italic().to_string(),
        }
    }

    fn vivid() -> Self {
        Self {
            source: |s| s.bright_magenta().italic().to_string(),
            translated: |s| s.bright_yellow().bold().underline().to_string(),
            lang: |s| s.bright_cyan().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.cyan().to_string(),
            hint: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            source: |s| s.normal().to_string(),
            translated: |s| s.bold().to_string(),
            lang: |s| s.dimmed().to_string(),
            line: |s| s.dimmed().to_string(),
            idx: |s| s.normal().to_string(),
            hint: |s| s.dimmed().to_string(),
        }
    }
}
