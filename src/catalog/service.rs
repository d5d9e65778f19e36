//! Drink search over a static catalog.

use crate::catalog::drink::{Alcoholic, Attribution, CatalogIngredient, Drink};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Search term is required")]
    InvalidArgument,
}

/// Term used to pick the deterministic "random" drink.
const RANDOM_PICK: &str = "margarita";

/// Read-only drink catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    drinks: Vec<Drink>,
}

impl CatalogService {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self { drinks }
    }

    /// Catalog populated with the built-in seed drinks.
    pub fn seeded() -> Self {
        Self::new(seed_drinks())
    }

    pub fn len(&self) -> usize {
        self.drinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty()
    }

    /// Drinks whose name contains `term`, ignoring case, in catalog order.
    pub fn search(&self, term: &str) -> Result<Vec<Drink>, CatalogError> {
        if term.trim().is_empty() {
            return Err(CatalogError::InvalidArgument);
        }

        let needle = term.to_lowercase();
        Ok(self
            .drinks
            .iter()
            .filter(|drink| drink.name_matches(&needle))
            .cloned()
            .collect())
    }

    /// Not actually random: the current data source has no randomness.
    pub fn random_drink(&self) -> Option<Drink> {
        self.search(RANDOM_PICK).ok()?.into_iter().next()
    }
}

fn ingredients(pairs: &[(&str, Option<&str>)]) -> Vec<CatalogIngredient> {
    pairs
        .iter()
        .map(|(name, measure)| CatalogIngredient {
            name: name.to_string(),
            measure: measure.map(str::to_string),
        })
        .collect()
}

fn no_translations() -> [(&'static str, Option<String>); 4] {
    [("ES", None), ("DE", None), ("FR", None), ("IT", None)]
}

pub fn seed_drinks() -> Vec<Drink> {
    vec![
        Drink {
            id: "11007".into(),
            name: "Margarita".into(),
            alternate_name: None,
            tags: Some("IBA,ContemporaryClassic".into()),
            video: None,
            category: "Ordinary Drink".into(),
            iba: Some("Contemporary Classics".into()),
            alcoholic: Alcoholic::Alcoholic,
            glass: "Cocktail glass".into(),
            instructions: "Rub the rim of the glass with lime slice to make the salt stick to it. \
                Take a lime slice and dip it in salt and run the salted edge around the rim of the glass. \
                Shake the other ingredients with ice, then pour into the glass."
                .into(),
            instructions_localized: no_translations(),
            thumbnail: "https://www.thecocktaildb.com/images/media/drink/5noda61589575158.jpg".into(),
            ingredients: ingredients(&[
                ("Tequila", Some("1 1/2 oz")),
                ("Triple sec", Some("1/2 oz")),
                ("Lime juice", Some("1 oz")),
                ("Salt", None),
            ]),
            attribution: Attribution::default(),
        },
        Drink {
            id: "11001".into(),
            name: "Old Fashioned".into(),
            alternate_name: None,
            tags: Some("IBA,Classic".into()),
            video: None,
            category: "Whiskey".into(),
            iba: Some("Unforgettables".into()),
            alcoholic: Alcoholic::Alcoholic,
            glass: "Old-fashioned glass".into(),
            instructions: "Place sugar cube in old fashioned glass and saturate with bitters, \
                add a dash of plain water. Muddle until dissolved. Fill the glass with ice cubes \
                and add whiskey. Garnish with orange slice and a cocktail cherry."
                .into(),
            instructions_localized: no_translations(),
            thumbnail: "https://www.thecocktaildb.com/images/media/drink/vrwquq1478252802.jpg".into(),
            ingredients: ingredients(&[
                ("Bourbon", Some("4.5 cl")),
                ("Angostura bitters", Some("2 dashes")),
                ("Sugar", Some("1 cube")),
                ("Water", Some("dash")),
            ]),
            attribution: Attribution::default(),
        },
    ]
}
