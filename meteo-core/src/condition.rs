//! WMO weather code classification.
//!
//! See <https://open-meteo.com/en/docs#weathervariables> for the code table.

use serde::{Deserialize, Serialize};

/// Human category a WMO code falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Clear,
    MostlyClear,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    /// Any code outside the known sets.
    Other,
}

impl Category {
    pub fn from_wmo_code(code: i64) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::MostlyClear,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::MostlyClear => "Mostly clear",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Other => "Weather",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyClear => "🌤️",
            Self::Overcast => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle => "🌦️",
            Self::Rain => "🌧️",
            Self::Snow => "🌨️",
            Self::Thunderstorm => "⛈️",
            Self::Other => "🌡️",
        }
    }
}

/// Icon and label for a weather code, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub category: Category,
    pub icon: &'static str,
    pub label: &'static str,
}

impl From<Category> for Condition {
    fn from(category: Category) -> Self {
        Self {
            category,
            icon: category.icon(),
            label: category.label(),
        }
    }
}

/// Classify a WMO code. Total: unknown codes map to the generic fallback.
pub fn classify(code: i64) -> Condition {
    Category::from_wmo_code(code).into()
}

/// Like [`classify`], treating an absent code as unknown.
pub fn classify_opt(code: Option<i64>) -> Condition {
    code.map_or_else(|| Category::Other.into(), classify)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn known_sets() {
        let table: &[(&[i64], Category)] = &[
            (&[0], Category::Clear),
            (&[1, 2], Category::MostlyClear),
            (&[3], Category::Overcast),
            (&[45, 48], Category::Fog),
            (&[51, 53, 55, 56, 57], Category::Drizzle),
            (&[61, 63, 65, 66, 67, 80, 81, 82], Category::Rain),
            (&[71, 73, 75, 77, 85, 86], Category::Snow),
            (&[95, 96, 99], Category::Thunderstorm),
        ];

        for (codes, expected) in table {
            for code in *codes {
                assert_eq!(classify(*code).category, *expected, "code {code}");
            }
        }
    }

    #[test]
    fn codes_0_to_99_partition_into_nine_categories() {
        let mut seen: HashMap<Category, usize> = HashMap::new();
        for code in 0..=99 {
            *seen.entry(classify(code).category).or_default() += 1;
        }

        assert_eq!(seen.len(), 9);
        assert_eq!(seen[&Category::Rain], 8);
        assert_eq!(seen[&Category::Other], 100 - 28);
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in [4, 50, 100, -1, i64::MAX] {
            let c = classify(code);
            assert_eq!(c.category, Category::Other);
            assert_eq!(c.label, "Weather");
            assert_eq!(c.icon, "🌡️");
        }
    }

    #[test]
    fn absent_code_is_fallback() {
        assert_eq!(classify_opt(None).category, Category::Other);
        assert_eq!(classify_opt(Some(95)).label, "Thunderstorm");
    }

    #[test]
    fn labels_and_icons() {
        let c = classify(2);
        assert_eq!(c.label, "Mostly clear");
        assert_eq!(c.icon, "🌤️");
        assert_eq!(classify(0).icon, "☀️");
    }
}
