//! Text rendering of the widget panel.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use wxglance_core::{labels, LabelSet, Language, Settings, Theme};
use wxglance_weather::WeatherSnapshot;

use crate::action::USAGE;

/// Foreground/background pair for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::DarkBlue,
            },
            Theme::Dark => Self {
                fg: Color::Grey,
                bg: Color::Black,
                accent: Color::Cyan,
            },
        }
    }
}

/// Everything one frame of the panel shows.
#[derive(Debug, Clone, Copy)]
pub struct PanelView<'a> {
    pub settings: Settings,
    pub city: &'a str,
    pub snapshot: Option<&'a WeatherSnapshot>,
    pub fetching: bool,
}

impl PanelView<'_> {
    fn labels(&self) -> &'static LabelSet {
        labels(self.settings.language)
    }

    /// Plain-text lines of the panel, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let l = self.labels();
        let Settings { language, theme } = self.settings;
        let mut lines = vec![
            l.app_title.to_string(),
            String::new(),
            selector(Language::ALL.map(|option| (l.language_option(option), option == language))),
            selector(Theme::ALL.map(|option| (l.theme_option(option), option == theme))),
            String::new(),
            format!(
                "{}: > {}{}",
                l.city_label,
                self.city,
                if self.fetching { " …" } else { "" }
            ),
        ];

        if let Some(snapshot) = self.snapshot {
            lines.push(String::new());
            lines.extend(weather_lines(l, snapshot));
        }

        lines
    }

    /// Clear the terminal and draw the panel in the theme's colors.
    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let palette = Palette::for_theme(self.settings.theme);

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        for (i, line) in self.lines().into_iter().enumerate() {
            let styled = if i == 0 {
                line.with(palette.accent).on(palette.bg).bold()
            } else {
                line.with(palette.fg).on(palette.bg)
            };
            write!(out, "{}\r\n", styled)?;
        }
        write!(out, "\r\n{}\r\n", USAGE.dim())?;
        out.flush()
    }
}

/// The results panel for a snapshot.
pub fn weather_lines(l: &LabelSet, snapshot: &WeatherSnapshot) -> [String; 4] {
    [
        format!("{}: {}", l.city_label, snapshot.city_display_name),
        l.weather_title.to_string(),
        format!("{}: {}°C", l.temperature_label, snapshot.celsius()),
        format!("{}: {}", l.description_label, snapshot.emoji()),
    ]
}

fn selector<const N: usize>(options: [(&str, bool); N]) -> String {
    options
        .iter()
        .map(|(name, selected)| {
            if *selected {
                format!("[x] {name}")
            } else {
                format!("[ ] {name}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
