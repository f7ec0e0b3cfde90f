#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub background: String,
    pub foreground: String,
    pub accent: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: "#FFFFFF".to_string(),
            foreground: "#1A1A2E".to_string(),
            accent: "#2383E2".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: "#1E1E1E".to_string(),
            foreground: "#C8C8C8".to_string(),
            accent: "#5294E2".to_string(),
        }
    }

    pub fn sepia() -> Self {
        Self {
            name: "sepia".to_string(),
            background: "#F4ECD8".to_string(),
            foreground: "#433422".to_string(),
            accent: "#A0612D".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "sepia" => Self::sepia(),
            _ => Self::light(),
        }
    }

    pub fn is_known(name: &str) -> bool {
        matches!(name, "light" | "dark" | "sepia")
    }

    /// Next theme in the cycle: light, dark, sepia, back to light.
    pub fn cycled(&self) -> Self {
        match self.name.as_str() {
            "light" => Self::dark(),
            "dark" => Self::sepia(),
            _ => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_all_themes() {
        let a = Theme::light();
        let b = a.cycled();
        let c = b.cycled();
        let d = c.cycled();
        assert_eq!(b.name, "dark");
        assert_eq!(c.name, "sepia");
        assert_eq!(d, a);
    }

    #[test]
    fn test_from_name_defaults_to_light() {
        assert_eq!(Theme::from_name("nope").name, "light");
        assert_eq!(Theme::from_name("dark").name, "dark");
    }
}
