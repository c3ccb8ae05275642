use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Blue,
    Green,
    Red,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: String,
    pub color: BadgeColor,
}

/// Maps a reservation status to its display badge. Never fails.
pub fn classify(status: &str) -> StatusBadge {
    let color = match status.trim().to_lowercase().as_str() {
        "pending" => BadgeColor::Blue,
        "confirmed" => BadgeColor::Green,
        "cancelled" => BadgeColor::Red,
        _ => BadgeColor::Default,
    };

    StatusBadge {
        label: capitalize(status.trim()),
        color,
    }
}

fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().to_string() + c.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(
            classify("pending"),
            StatusBadge { label: "Pending".to_string(), color: BadgeColor::Blue }
        );
        assert_eq!(classify("confirmed").color, BadgeColor::Green);
        assert_eq!(classify("cancelled").color, BadgeColor::Red);
    }

    #[test]
    fn test_case_insensitive() {
        let badge = classify("CONFIRMED");
        assert_eq!(badge.color, BadgeColor::Green);
        assert_eq!(badge.label, "CONFIRMED");

        let badge = classify("cancelled");
        assert_eq!(badge.label, "Cancelled");
    }

    #[test]
    fn test_unknown_status_falls_through() {
        let badge = classify("checked_in");
        assert_eq!(badge.color, BadgeColor::Default);
        assert_eq!(badge.label, "Checked_in");

        let badge = classify("no_Show");
        assert_eq!(badge.color, BadgeColor::Default);
        assert_eq!(badge.label, "No_Show");

        assert_eq!(classify("Checked_In").label, "Checked_In");
    }

    #[test]
    fn test_empty_status() {
        let badge = classify("");
        assert_eq!(badge.color, BadgeColor::Default);
        assert_eq!(badge.label, "");
    }
}
