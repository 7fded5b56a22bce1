use crate::utils::*;
use serde::{Deserialize, Serialize};

/// Explicit color scheme; `None` follows the browser preference.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    /// Auto, then light, then dark.
    pub(crate) const fn cycle(theme: Option<Self>) -> Option<Self> {
        use Theme::*;
        match theme {
            None => Some(Light),
            Some(Light) => Some(Dark),
            Some(Dark) => None,
        }
    }

    pub(crate) const fn label(theme: Option<Self>) -> &'static str {
        match theme {
            None => "auto",
            Some(theme) => theme.scheme(),
        }
    }

    fn update_html(theme: Option<Self>) {
        let Some(html) = gloo::utils::document().document_element() else {
            log::error!("no html element to theme");
            return;
        };
        let result = match theme {
            Some(theme) => {
                log::debug!("theme-scheme: {}", theme.scheme());
                html.set_attribute(Self::ATTR_NAME, theme.scheme())
            }
            None => {
                log::debug!("no theme preference");
                html.remove_attribute(Self::ATTR_NAME)
            }
        };
        if let Err(err) = result {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    /// Applies the stored preference and returns it.
    pub(crate) fn init() -> Option<Self> {
        let theme = LocalOrDefault::local_or_default();
        Self::update_html(theme);
        theme
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "codegate:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_returns_to_auto() {
        let mut theme = None;
        let mut seen = Vec::new();
        for _ in 0..3 {
            theme = Theme::cycle(theme);
            seen.push(Theme::label(theme));
        }
        assert_eq!(seen, ["light", "dark", "auto"]);
    }

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Theme as StorageKey>::KEY, "codegate:theme");
    }
}
