/// Priority levels shared by stories and tasks

use serde::{Deserialize, Serialize};

/// Priority of a story or task
///
/// Serialized exactly as displayed: "Low", "Medium", "High", "Critical".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "priority")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Converts priority to string for display and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Numeric level for ordering (Low=1 .. Critical=4)
    pub fn level(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_as_str() {
        assert_eq!(Priority::Low.as_str(), "Low");
        assert_eq!(Priority::Medium.as_str(), "Medium");
        assert_eq!(Priority::High.as_str(), "High");
        assert_eq!(Priority::Critical.as_str(), "Critical");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Critical.level() > Priority::High.level());
        assert!(Priority::High.level() > Priority::Medium.level());
        assert!(Priority::Medium.level() > Priority::Low.level());
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Priority::Critical).unwrap();
        assert_eq!(json, "\"Critical\"");
        let parsed: Priority = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
        assert!(serde_json::from_str::<Priority>("\"Urgent\"").is_err());
    }
}
