//! Static label tables for the three supported interface languages.

use crate::settings::{Language, Theme};

/// Every string the interface shows, for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    pub app_title: &'static str,
    pub city_label: &'static str,
    pub weather_title: &'static str,
    pub temperature_label: &'static str,
    pub description_label: &'static str,
    pub language_option_en: &'static str,
    pub language_option_ru: &'static str,
    pub language_option_et: &'static str,
    pub theme_option_light: &'static str,
    pub theme_option_dark: &'static str,
}

impl LabelSet {
    /// Localized name of a language option.
    pub fn language_option(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.language_option_en,
            Language::Ru => self.language_option_ru,
            Language::Et => self.language_option_et,
        }
    }

    /// Localized name of a theme option.
    pub fn theme_option(&self, theme: Theme) -> &'static str {
        match theme {
            Theme::Light => self.theme_option_light,
            Theme::Dark => self.theme_option_dark,
        }
    }

    fn fields(&self) -> [&'static str; 10] {
        [
            self.app_title,
            self.city_label,
            self.weather_title,
            self.temperature_label,
            self.description_label,
            self.language_option_en,
            self.language_option_ru,
            self.language_option_et,
            self.theme_option_light,
            self.theme_option_dark,
        ]
    }

    /// True when no label is blank.
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|label| !label.trim().is_empty())
    }
}

static EN: LabelSet = LabelSet {
    app_title: "Weather Forecast",
    city_label: "City",
    weather_title: "Current weather",
    temperature_label: "Temperature",
    description_label: "Description",
    language_option_en: "English",
    language_option_ru: "Russian",
    language_option_et: "Estonian",
    theme_option_light: "Light",
    theme_option_dark: "Dark",
};

static RU: LabelSet = LabelSet {
    app_title: "Прогноз погоды",
    city_label: "Город",
    weather_title: "Текущая погода",
    temperature_label: "Температура",
    description_label: "Описание",
    language_option_en: "Английский",
    language_option_ru: "Русский",
    language_option_et: "Эстонский",
    theme_option_light: "Светлая",
    theme_option_dark: "Тёмная",
};

static ET: LabelSet = LabelSet {
    app_title: "Ilmaprognoos",
    city_label: "Linn",
    weather_title: "Praegune ilm",
    temperature_label: "Temperatuur",
    description_label: "Kirjeldus",
    language_option_en: "Inglise",
    language_option_ru: "Vene",
    language_option_et: "Eesti",
    theme_option_light: "Hele",
    theme_option_dark: "Tume",
};

/// Labels for a supported language.
pub fn labels(language: Language) -> &'static LabelSet {
    match language {
        Language::En => &EN,
        Language::Ru => &RU,
        Language::Et => &ET,
    }
}

/// Labels for a raw language code; `None` for codes we don't ship.
pub fn labels_for_code(code: &str) -> Option<&'static LabelSet> {
    code.parse::<Language>().ok().map(labels)
}
