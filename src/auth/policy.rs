use thiserror::Error;

/// Characters that count as "special" for password strength purposes.
const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("password must be at least {0} characters long")]
    TooShort(usize),

    #[error("password must contain at least one uppercase letter")]
    NoUppercase,

    #[error("password must contain at least one lowercase letter")]
    NoLowercase,

    #[error("password must contain at least one digit")]
    NoDigit,

    #[error("password must contain at least one special character")]
    NoSpecial,
}

/// Password strength rules, checked in order with the first failure
/// reported. Pure function of the candidate password; no side effects.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn validate(&self, password: &str) -> Result<(), PolicyViolation> {
        if password.chars().count() < self.min_length {
            return Err(PolicyViolation::TooShort(self.min_length));
        }
        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(PolicyViolation::NoUppercase);
        }
        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(PolicyViolation::NoLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PolicyViolation::NoDigit);
        }
        if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            return Err(PolicyViolation::NoSpecial);
        }
        Ok(())
    }
}
