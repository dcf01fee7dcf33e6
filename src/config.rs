//! Startup configuration
//!
//! Read once from the environment, nothing is reloaded while running

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;

use crate::audiences::AudienceRegistry;
use crate::audiences::StudentGroup;
use crate::utils::env_var;
use crate::utils::parse_flag;

/// Portal settings
#[derive(Clone, Debug)]
pub struct Settings {
    /// The student groups reminders can be addressed to
    pub audiences: AudienceRegistry,

    /// Start with the seed reminders instead of an empty store
    pub seed_reminders: bool,
}

impl Settings {
    /// Default groups, with the seed reminders
    pub fn defaults() -> Result<Self> {
        Ok(Self {
            audiences: AudienceRegistry::with_default_groups()?,
            seed_reminders: true,
        })
    }

    /// Detect the settings from the environment, starting from the defaults
    ///
    /// - `AUDIENCE_GROUPS`: JSON list of `{"id": .., "name": ..}`, replaces the default groups
    /// - `SEED_REMINDERS`: boolean flag, defaults to `true`
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::defaults()?;

        if let Some(json) = env_var("AUDIENCE_GROUPS") {
            settings.audiences = parse_audience_groups(&json)?;
        }

        if let Some(value) = env_var("SEED_REMINDERS") {
            settings.seed_reminders = parse_flag(&value)
                .with_context(|| format!("`SEED_REMINDERS` is not a boolean: {value}"))?;
        }

        Ok(settings)
    }
}

/// Parse the student groups from JSON
pub fn parse_audience_groups(json: &str) -> Result<AudienceRegistry> {
    let groups = serde_json::from_str::<Vec<StudentGroup>>(json)
        .context("`AUDIENCE_GROUPS` is not a valid list of student groups")?;

    if groups.iter().any(|group| group.name.trim().is_empty()) {
        bail!("`AUDIENCE_GROUPS` contains a group without a name");
    }

    Ok(AudienceRegistry::new(groups)?)
}
