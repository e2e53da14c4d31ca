use anyhow::Context;
use std::env;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_DEMO_USER: &str = "Olivia";
pub const DEFAULT_REPLY_TEXT: &str = "That's cool! Tell me more.";
pub const DEFAULT_DETECTED_TOWN: &str = "Miami, FL";

/// Runtime configuration for a client process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name fragment used to pick the profile every login signs in as.
    pub demo_user: String,
    pub reply_delay: Duration,
    pub reply_text: String,
    pub location_delay: Duration,
    pub detected_town: String,
    pub build_id: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let demo_user = env::var("SWINGSFAB_DEMO_USER").unwrap_or(defaults.demo_user);
        let reply_delay = millis_var("SWINGSFAB_REPLY_DELAY_MS")?.unwrap_or(defaults.reply_delay);
        let reply_text = env::var("SWINGSFAB_REPLY_TEXT").unwrap_or(defaults.reply_text);
        let location_delay =
            millis_var("SWINGSFAB_LOCATION_DELAY_MS")?.unwrap_or(defaults.location_delay);
        let detected_town = env::var("SWINGSFAB_DETECTED_TOWN").unwrap_or(defaults.detected_town);
        let build_id = env::var("SWINGSFAB_BUILD_ID").unwrap_or(defaults.build_id);

        if reply_text.trim().is_empty() {
            anyhow::bail!("SWINGSFAB_REPLY_TEXT must not be blank");
        }

        Ok(Self {
            demo_user,
            reply_delay,
            reply_text,
            location_delay,
            detected_town,
            build_id,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo_user: DEFAULT_DEMO_USER.to_string(),
            reply_delay: Duration::from_millis(1500),
            reply_text: DEFAULT_REPLY_TEXT.to_string(),
            location_delay: Duration::from_millis(1500),
            detected_town: DEFAULT_DETECTED_TOWN.to_string(),
            build_id: Uuid::new_v4().to_string(),
        }
    }
}

fn millis_var(name: &str) -> anyhow::Result<Option<Duration>> {
    match env::var(name) {
        Ok(raw) => {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a whole number of milliseconds, got {raw:?}"))?;
            Ok(Some(Duration::from_millis(millis)))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prototype() {
        let config = AppConfig::default();
        assert_eq!(config.demo_user, "Olivia");
        assert_eq!(config.reply_delay, Duration::from_millis(1500));
        assert_eq!(config.location_delay, Duration::from_millis(1500));
        assert_eq!(config.reply_text, "That's cool! Tell me more.");
        assert_eq!(config.detected_town, "Miami, FL");
        assert!(Uuid::parse_str(&config.build_id).is_ok());
    }

    #[test]
    fn millis_var_rejects_garbage() {
        // Unique name so parallel tests never observe it.
        let name = "SWINGSFAB_TEST_MILLIS_GARBAGE";
        env::set_var(name, "soon");
        assert!(millis_var(name).is_err());
        env::set_var(name, " 250 ");
        assert_eq!(millis_var(name).unwrap(), Some(Duration::from_millis(250)));
        env::remove_var(name);
        assert_eq!(millis_var(name).unwrap(), None);
    }
}
