//! Audiences, the student groups a reminder can be addressed to
//!
//! The registry is configuration, it is read-only once the portal is running

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Result;

/// Name shown for an audience that is not in the registry
pub const UNKNOWN_GROUP: &str = "Unknown Group";

/// The groups the portal starts with, ID and name
const DEFAULT_GROUPS: [(&str, &str); 5] = [
    ("all", "All Students"),
    ("cse-students", "Computer Science Students"),
    ("ece-students", "Electronics Students"),
    ("mech-students", "Mechanical Students"),
    ("eligible-google", "Google Eligible Students"),
];

/// A named group of students
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StudentGroup {
    /// External identifier, used by reminders
    pub id: String,

    /// Display name
    pub name: String,
}

impl StudentGroup {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// All known student groups
#[derive(Clone, Debug)]
pub struct AudienceRegistry {
    /// Groups in configuration order
    groups: Vec<StudentGroup>,

    /// Position of each group in `groups`, by ID
    positions: HashMap<String, usize>,
}

impl AudienceRegistry {
    /// Create a registry from a list of groups
    ///
    /// The list may not be empty and IDs have to be unique
    pub fn new(groups: Vec<StudentGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(Error::validation("At least one student group is required"));
        }

        let mut positions = HashMap::with_capacity(groups.len());
        for (position, group) in groups.iter().enumerate() {
            if group.id.trim().is_empty() {
                return Err(Error::validation("Student group ID can not be empty"));
            }

            if positions.insert(group.id.clone(), position).is_some() {
                return Err(Error::validation(format!(
                    r#"Duplicate student group "{}""#,
                    group.id
                )));
            }
        }

        Ok(Self { groups, positions })
    }

    /// Registry with the groups the portal starts with
    pub fn with_default_groups() -> Result<Self> {
        Self::new(
            DEFAULT_GROUPS
                .iter()
                .map(|(id, name)| StudentGroup::new(id, name))
                .collect(),
        )
    }

    /// Name of the audience, or [`UNKNOWN_GROUP`](UNKNOWN_GROUP)
    pub fn resolve_name(&self, audience_id: &str) -> &str {
        self.find(audience_id)
            .map_or(UNKNOWN_GROUP, |group| group.name.as_str())
    }

    /// Is the audience known?
    pub fn contains(&self, audience_id: &str) -> bool {
        self.positions.contains_key(audience_id)
    }

    /// All groups, in configuration order
    pub fn groups(&self) -> &[StudentGroup] {
        &self.groups
    }

    fn find(&self, audience_id: &str) -> Option<&StudentGroup> {
        self.positions
            .get(audience_id)
            .and_then(|position| self.groups.get(*position))
    }
}
