use crate::dto::ThemeView;

pub const THEME_KEY: &str = "ripscore-theme";
const DARK: &str = "dark";
const LIGHT: &str = "light";

/// Where the preference is kept between visits.
pub trait PreferenceStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            DARK => Some(Theme::Dark),
            LIGHT => Some(Theme::Light),
            _ => None,
        }
    }

    fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Light/dark preference read from storage once and written back on every change.
#[derive(Debug)]
pub struct ThemeStore<S: PreferenceStorage> {
    storage: S,
    theme: Theme,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Falls back to the system preference when nothing valid is stored.
    pub fn init(storage: S, system_prefers_dark: bool) -> Self {
        let theme = storage
            .load(THEME_KEY)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or(Theme::from_dark(system_prefers_dark));
        Self { storage, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark_mode(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn set(&mut self, is_dark: bool) {
        self.theme = Theme::from_dark(is_dark);
        self.storage.store(THEME_KEY, self.theme.as_str());
    }

    pub fn toggle(&mut self) {
        self.set(!self.is_dark_mode());
    }

    pub fn view(&self) -> ThemeView {
        ThemeView {
            theme: self.theme.as_str(),
            is_dark_mode: self.is_dark_mode(),
        }
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
