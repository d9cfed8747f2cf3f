//! Show/hide toggle for password inputs

/// Whether a password input currently shows its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordVisibility {
    #[default]
    Hidden,
    Shown,
}

impl PasswordVisibility {
    /// Read from the input's current `type` attribute
    pub fn from_input_type(ty: &str) -> Self {
        if ty.eq_ignore_ascii_case("password") {
            Self::Hidden
        } else {
            Self::Shown
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Shown,
            Self::Shown => Self::Hidden,
        }
    }

    /// `type` attribute the input should carry
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Hidden => "password",
            Self::Shown => "text",
        }
    }

    /// Text of the toggle button: the action it will perform next
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Hidden => "Afficher",
            Self::Shown => "Masquer",
        }
    }

    pub fn aria_label(self) -> &'static str {
        match self {
            Self::Hidden => "Afficher le mot de passe",
            Self::Shown => "Masquer le mot de passe",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_from_password() {
        let next = PasswordVisibility::from_input_type("password").toggled();
        assert_eq!(next, PasswordVisibility::Shown);
        assert_eq!(next.input_type(), "text");
        assert_eq!(next.button_label(), "Masquer");
        assert_eq!(next.aria_label(), "Masquer le mot de passe");
    }

    #[test]
    fn test_toggle_back() {
        let next = PasswordVisibility::from_input_type("text").toggled();
        assert_eq!(next, PasswordVisibility::Hidden);
        assert_eq!(next.input_type(), "password");
        assert_eq!(next.button_label(), "Afficher");
        assert_eq!(next.aria_label(), "Afficher le mot de passe");
    }
}
