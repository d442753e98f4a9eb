use serde::{Deserialize, Serialize};

/// How far an applied display font reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontScope {
    CurrentWindow,
    #[default]
    AllWindows,
}

/// Host capability for changing the font used to draw content.
pub trait DisplayFontSetter {
    fn set_display_font(&mut self, family: &str, scope: FontScope);

    /// The family applied most recently, if any.
    fn current_font(&self) -> Option<&str>;
}

/// Keeps the applied font for the running process only; nothing is written
/// to disk.
#[derive(Debug, Default)]
pub struct SessionDisplayFont {
    family: Option<String>,
    scope: FontScope,
}

impl SessionDisplayFont {
    pub fn scope(&self) -> FontScope {
        self.scope
    }
}

impl DisplayFontSetter for SessionDisplayFont {
    fn set_display_font(&mut self, family: &str, scope: FontScope) {
        log::info!("Display font set to '{}' ({:?})", family, scope);
        self.family = Some(family.to_string());
        self.scope = scope;
    }

    fn current_font(&self) -> Option<&str> {
        self.family.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_font_starts_unset() {
        let setter = SessionDisplayFont::default();
        assert_eq!(setter.current_font(), None);
        assert_eq!(setter.scope(), FontScope::AllWindows);
    }

    #[test]
    fn test_set_display_font() {
        let mut setter = SessionDisplayFont::default();
        setter.set_display_font("Fira Code", FontScope::CurrentWindow);
        assert_eq!(setter.current_font(), Some("Fira Code"));
        assert_eq!(setter.scope(), FontScope::CurrentWindow);
    }

    #[test]
    fn test_scope_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&FontScope::AllWindows).unwrap(), "\"all-windows\"");
        let scope: FontScope = serde_json::from_str("\"current-window\"").unwrap();
        assert_eq!(scope, FontScope::CurrentWindow);
    }
}
