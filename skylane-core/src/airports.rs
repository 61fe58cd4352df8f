use serde::{Deserialize, Serialize};

/// One airport or city suggestion returned by airport search.
///
/// `sky_id` is the provider's short code (unique within a result set),
/// `entity_id` its stable identifier. Results keep the provider's relevance
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub sky_id: String,
    pub entity_id: String,
    pub presentation: AirportPresentation,
    #[serde(default)]
    pub navigation: Option<AirportNavigation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportPresentation {
    pub title: String,
    #[serde(default)]
    pub suggestion_title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportNavigation {
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub localized_name: Option<String>,
}

impl Airport {
    /// Label for a picker row, e.g. "London Heathrow (LHR)".
    pub fn display_title(&self) -> &str {
        self.presentation
            .suggestion_title
            .as_deref()
            .unwrap_or(&self.presentation.title)
    }

    /// Secondary picker line, usually the country.
    pub fn display_subtitle(&self) -> &str {
        self.presentation.subtitle.as_deref().unwrap_or("")
    }

    pub fn localized_name(&self) -> &str {
        self.navigation
            .as_ref()
            .and_then(|n| n.localized_name.as_deref())
            .unwrap_or(&self.presentation.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_deserialization() {
        let json = r#"
            {
                "skyId": "LOND",
                "entityId": "27544008",
                "presentation": {
                    "title": "London",
                    "suggestionTitle": "London (Any)",
                    "subtitle": "United Kingdom"
                },
                "navigation": {
                    "entityType": "CITY",
                    "localizedName": "London"
                }
            }
        "#;
        let airport: Airport = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(airport.sky_id, "LOND");
        assert_eq!(airport.entity_id, "27544008");
        assert_eq!(airport.display_title(), "London (Any)");
        assert_eq!(airport.display_subtitle(), "United Kingdom");
        assert_eq!(airport.localized_name(), "London");
    }

    #[test]
    fn test_airport_without_navigation_falls_back_to_title() {
        let json = r#"
            {
                "skyId": "NYCA",
                "entityId": "27537542",
                "presentation": { "title": "New York" }
            }
        "#;
        let airport: Airport = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(airport.display_title(), "New York");
        assert_eq!(airport.display_subtitle(), "");
        assert_eq!(airport.localized_name(), "New York");
    }
}
