/// bcrypt work factor used when hashing new passwords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { cost: 12 }
    }
}

impl PasswordConfig {
    /// Reads `BCRYPT_COST`, clamped to the range bcrypt accepts (4-31).
    pub fn from_env() -> Self {
        let cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .map(|c| c.clamp(4, 31))
            .unwrap_or(Self::default().cost);
        Self { cost }
    }
}
