//! Post categories.

use serde::{Deserialize, Serialize};

/// Closed set of post categories in the content calendar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    /// Gene of the week
    #[display("gene")]
    Gene,
    /// Intervention of the week
    #[display("intervention")]
    Intervention,
    /// Health topic
    #[display("topic")]
    Topic,
}

impl PostCategory {
    /// Emoji the caption should lead with.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Gene => "🧬",
            Self::Intervention => "💊",
            Self::Topic => "📊",
        }
    }

    /// Hashtag set appended to captions of this category.
    pub fn hashtags(&self) -> &'static str {
        match self {
            Self::Gene => {
                "#GeneOfTheWeek #Genetics #PrecisionMedicine #PersonalizedHealth #Bioscope"
            }
            Self::Intervention => {
                "#InterventionOfTheWeek #Longevity #AntiAging #PrecisionMedicine #Bioscope"
            }
            Self::Topic => "#HealthTopic #Prevention #PrecisionHealth #Diagnostics #Bioscope",
        }
    }
}

impl std::str::FromStr for PostCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gene" => Ok(Self::Gene),
            "intervention" => Ok(Self::Intervention),
            "topic" => Ok(Self::Topic),
            _ => Err(format!("Unknown post category: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn display_round_trips_through_from_str() {
        for category in PostCategory::iter() {
            let parsed: PostCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn every_category_has_hashtags() {
        for category in PostCategory::iter() {
            assert!(category.hashtags().starts_with('#'));
            assert!(!category.emoji().is_empty());
        }
    }
}
