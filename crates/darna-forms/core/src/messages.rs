// File: src/messages.rs
// Purpose: User-facing message catalogue (French by default)

use serde::{Deserialize, Serialize};

/// Every text shown to the visitor
///
/// Length messages accept a `{min}` / `{max}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub required: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    pub invalid_url: String,
    pub unchecked: String,
    pub no_selection: String,
    pub too_short: String,
    pub too_long: String,
    pub pattern_mismatch: String,

    pub contact_success: String,
    pub contact_error: String,
    pub newsletter_success: String,
}

impl Messages {
    pub fn too_short(&self, min: usize) -> String {
        self.too_short.replace("{min}", &min.to_string())
    }

    pub fn too_long(&self, max: usize) -> String {
        self.too_long.replace("{max}", &max.to_string())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "Ce champ est obligatoire.".to_string(),
            invalid_email: "Veuillez entrer une adresse email valide.".to_string(),
            invalid_phone: "Veuillez entrer un numéro de téléphone valide.".to_string(),
            invalid_url: "Veuillez entrer une URL valide.".to_string(),
            unchecked: "Vous devez accepter cette condition.".to_string(),
            no_selection: "Veuillez sélectionner une option.".to_string(),
            too_short: "Ce champ doit contenir au moins {min} caractères.".to_string(),
            too_long: "Ce champ ne peut pas dépasser {max} caractères.".to_string(),
            pattern_mismatch: "Le format saisi est incorrect.".to_string(),
            contact_success: "Merci pour votre message ! Nous vous contacterons bientôt."
                .to_string(),
            contact_error: "Veuillez corriger les erreurs dans le formulaire.".to_string(),
            newsletter_success: "Merci pour votre inscription à notre newsletter !".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_placeholders() {
        let messages = Messages::default();
        assert_eq!(
            messages.too_short(3),
            "Ce champ doit contenir au moins 3 caractères."
        );
        assert_eq!(
            messages.too_long(500),
            "Ce champ ne peut pas dépasser 500 caractères."
        );
    }
}
