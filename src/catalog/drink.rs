//! Catalog drink records.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Upper bound on ingredient slots in a catalog record.
pub const MAX_INGREDIENTS: usize = 15;

/// The three alcohol classifications a drink can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alcoholic {
    #[serde(rename = "Alcoholic")]
    Alcoholic,
    #[serde(rename = "Non alcoholic")]
    NonAlcoholic,
    #[serde(rename = "Optional alcohol")]
    OptionalAlcohol,
}

impl Alcoholic {
    pub const ALL: [Alcoholic; 3] = [
        Alcoholic::Alcoholic,
        Alcoholic::NonAlcoholic,
        Alcoholic::OptionalAlcohol,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alcoholic::Alcoholic => "Alcoholic",
            Alcoholic::NonAlcoholic => "Non alcoholic",
            Alcoholic::OptionalAlcohol => "Optional alcohol",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

impl fmt::Display for Alcoholic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIngredient {
    pub name: String,
    pub measure: Option<String>,
}

/// Image licensing details carried by some catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub image_source: Option<String>,
    pub image_attribution: Option<String>,
    pub creative_commons_confirmed: Option<String>,
    pub date_modified: Option<String>,
}

/// A read-only catalog record.
///
/// Serializes in TheCocktailDB shape: flat `strIngredientN`/`strMeasureN`
/// slots numbered from 1, with unused slots as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: String,
    pub name: String,
    pub alternate_name: Option<String>,
    pub tags: Option<String>,
    pub video: Option<String>,
    pub category: String,
    pub iba: Option<String>,
    pub alcoholic: Alcoholic,
    pub glass: String,
    pub instructions: String,
    /// Translations keyed by language code (ES, DE, FR, IT).
    pub instructions_localized: [(&'static str, Option<String>); 4],
    pub thumbnail: String,
    pub ingredients: Vec<CatalogIngredient>,
    pub attribution: Attribution,
}

impl Drink {
    /// Case-insensitive substring match on the drink name.
    pub fn name_matches(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}

impl Serialize for Drink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("idDrink", &self.id)?;
        map.serialize_entry("strDrink", &self.name)?;
        map.serialize_entry("strDrinkAlternate", &self.alternate_name)?;
        map.serialize_entry("strTags", &self.tags)?;
        map.serialize_entry("strVideo", &self.video)?;
        map.serialize_entry("strCategory", &self.category)?;
        map.serialize_entry("strIBA", &self.iba)?;
        map.serialize_entry("strAlcoholic", &self.alcoholic)?;
        map.serialize_entry("strGlass", &self.glass)?;
        map.serialize_entry("strInstructions", &self.instructions)?;
        for (lang, text) in &self.instructions_localized {
            map.serialize_entry(&format!("strInstructions{lang}"), text)?;
        }
        map.serialize_entry("strDrinkThumb", &self.thumbnail)?;

        let slot = |i: usize| self.ingredients.get(i);
        for i in 0..MAX_INGREDIENTS {
            map.serialize_entry(
                &format!("strIngredient{}", i + 1),
                &slot(i).map(|ing| ing.name.as_str()),
            )?;
        }
        for i in 0..MAX_INGREDIENTS {
            map.serialize_entry(
                &format!("strMeasure{}", i + 1),
                &slot(i).and_then(|ing| ing.measure.as_deref()),
            )?;
        }

        map.serialize_entry("strImageSource", &self.attribution.image_source)?;
        map.serialize_entry("strImageAttribution", &self.attribution.image_attribution)?;
        map.serialize_entry(
            "strCreativeCommonsConfirmed",
            &self.attribution.creative_commons_confirmed,
        )?;
        map.serialize_entry("dateModified", &self.attribution.date_modified)?;
        map.end()
    }
}
