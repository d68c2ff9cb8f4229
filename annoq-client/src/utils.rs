use std::env;

use super::consts::{ANNOQ_API_ENV, DEFAULT_ANNOQ_API};

/// Get default AnnoQ api from environment variable
///
/// # Returns
/// - AnnoQ api url
pub fn get_default_annoq_api() -> String {
    env::var(ANNOQ_API_ENV).unwrap_or_else(|_| DEFAULT_ANNOQ_API.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_overrides_the_default_api() {
        // no other test reads this variable, so the unsafe env mutation
        // cannot race
        unsafe { env::set_var(ANNOQ_API_ENV, "http://localhost:8010") };
        assert_eq!(get_default_annoq_api(), "http://localhost:8010");
        unsafe { env::remove_var(ANNOQ_API_ENV) };
        assert_eq!(get_default_annoq_api(), DEFAULT_ANNOQ_API);
    }
}
