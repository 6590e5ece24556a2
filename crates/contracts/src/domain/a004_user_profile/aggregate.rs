use serde::{Deserialize, Serialize};

/// Public profile of a user, keyed by the user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Display name, or `fallback` when unset or blank
    pub fn display_name_or(&self, fallback: &str) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    pub display_name: String,
}

impl UpdateProfileDto {
    pub fn validate(&self) -> Result<(), String> {
        let name = self.display_name.trim();
        if name.is_empty() {
            return Err("Display name must not be empty".into());
        }
        if name.chars().count() > 40 {
            return Err("Display name must be at most 40 characters".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_or() {
        let named = UserProfile {
            id: "u1".into(),
            display_name: Some(" たろう ".into()),
        };
        assert_eq!(named.display_name_or("匿名ユーザー"), "たろう");

        let blank = UserProfile {
            id: "u2".into(),
            display_name: Some("".into()),
        };
        assert_eq!(blank.display_name_or("匿名ユーザー"), "匿名ユーザー");
    }

    #[test]
    fn test_update_profile_validation() {
        assert!(UpdateProfileDto { display_name: "はなこ".into() }.validate().is_ok());
        assert!(UpdateProfileDto { display_name: "   ".into() }.validate().is_err());
        assert!(UpdateProfileDto { display_name: "あ".repeat(41) }.validate().is_err());
    }
}
