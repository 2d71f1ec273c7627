/// Every seeded account uses this email domain; `clear-seed` keys on it.
pub const SEED_EMAIL_DOMAIN: &str = "seed.learnhub.dev";

/// Shared password for seeded accounts.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub educators: usize,
    pub users: usize,
    pub courses_per_educator: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            educators: 3,
            users: 10,
            courses_per_educator: 2,
        }
    }
}

impl SeedConfig {
    pub fn total_courses(&self) -> usize {
        self.educators * self.courses_per_educator
    }
}
