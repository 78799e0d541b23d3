//! Deterministic fallback catalog
//!
//! Substituted whenever the third-party plant API is unreachable or rate
//! limited. Datasets are fixed; prices come from the deterministic
//! per-id synthesizer so repeated fallbacks always agree.

use once_cell::sync::Lazy;

use crate::models::plant::{CareLevel, Placement, Plant, Sunlight};

/// Suggestion list cap for fallback search
pub const SUGGESTION_CAP: usize = 5;

/// Result list cap for fallback search
const SEARCH_RESULT_CAP: usize = 20;

/// Mock detail records for these ids read as indoor plants
const INDOOR_DETAIL_IDS: &[u64] = &[1, 2, 6, 7, 8, 9];

fn plant(
    id: u64,
    common: &str,
    scientific: &str,
    family: Option<&str>,
    genus: Option<&str>,
    care: Option<CareLevel>,
    sunlight: &[Sunlight],
) -> Plant {
    Plant {
        id,
        common_name: Some(common.to_string()),
        scientific_name: Some(scientific.to_string()),
        family: family.map(str::to_string),
        genus: genus.map(str::to_string),
        care_level: care,
        sunlight: sunlight.to_vec(),
        price: None,
        image_url: Some("/api/placeholder/300/200".to_string()),
        placement: None,
    }
    .into_enriched()
}

/// The nine-plant catalog substituted for page 1 of a failed listing
pub static BROWSE_CATALOG: Lazy<Vec<Plant>> = Lazy::new(|| {
    use Sunlight::{FullSun, PartShade};
    vec![
        plant(1, "Marble Queen", "Epipremnum aureum", None, None, None, &[PartShade]),
        plant(2, "Neon Pothos", "Epipremnum aureum", None, None, None, &[PartShade]),
        plant(3, "Syngonium Rayii", "Syngonium podophyllum", None, None, None, &[FullSun, PartShade]),
        plant(4, "Pineapple", "Ananas comosus", None, None, None, &[FullSun]),
        plant(5, "African Milk Tree", "Euphorbia trigona", None, None, None, &[FullSun]),
        plant(6, "Pothos", "Epipremnum aureum", None, None, None, &[PartShade]),
        plant(7, "Chinese Evergreen", "Aglaonema", None, None, None, &[PartShade]),
        plant(8, "Peace Lily", "Spathiphyllum wallisii", None, None, None, &[PartShade]),
        plant(9, "Snake Plant", "Sansevieria trifasciata", None, None, None, &[FullSun, PartShade]),
    ]
});

/// The richer fifteen-plant set backing fallback search
pub static SEARCH_CATALOG: Lazy<Vec<Plant>> = Lazy::new(|| {
    use CareLevel::{Easy, Hard, Medium};
    use Sunlight::{FullSun, PartShade};
    vec![
        plant(1, "Marble Queen", "Epipremnum aureum", Some("Araceae"), Some("Epipremnum"), Some(Easy), &[PartShade]),
        plant(2, "Neon Pothos", "Epipremnum aureum", Some("Araceae"), Some("Epipremnum"), Some(Easy), &[PartShade]),
        plant(3, "Syngonium Rayii", "Syngonium podophyllum", Some("Araceae"), Some("Syngonium"), Some(Medium), &[FullSun, PartShade]),
        plant(4, "Pineapple", "Ananas comosus", Some("Bromeliaceae"), Some("Ananas"), Some(Hard), &[FullSun]),
        plant(5, "African Milk Tree", "Euphorbia trigona", Some("Euphorbiaceae"), Some("Euphorbia"), Some(Easy), &[FullSun]),
        plant(6, "Pothos", "Epipremnum aureum", Some("Araceae"), Some("Epipremnum"), Some(Easy), &[PartShade]),
        plant(7, "Chinese Evergreen", "Aglaonema commutatum", Some("Araceae"), Some("Aglaonema"), Some(Medium), &[PartShade]),
        plant(8, "Peace Lily", "Spathiphyllum wallisii", Some("Araceae"), Some("Spathiphyllum"), Some(Medium), &[PartShade]),
        plant(9, "Snake Plant", "Sansevieria trifasciata", Some("Asparagaceae"), Some("Sansevieria"), Some(Easy), &[FullSun, PartShade]),
        plant(10, "Fiddle Leaf Fig", "Ficus lyrata", Some("Moraceae"), Some("Ficus"), Some(Hard), &[FullSun, PartShade]),
        plant(11, "Monstera Deliciosa", "Monstera deliciosa", Some("Araceae"), Some("Monstera"), Some(Medium), &[PartShade]),
        plant(12, "Rubber Plant", "Ficus elastica", Some("Moraceae"), Some("Ficus"), Some(Easy), &[FullSun, PartShade]),
        plant(13, "Boston Fern", "Nephrolepis exaltata", Some("Nephrolepidaceae"), Some("Nephrolepis"), Some(Medium), &[PartShade]),
        plant(14, "Spider Plant", "Chlorophytum comosum", Some("Asparagaceae"), Some("Chlorophytum"), Some(Easy), &[PartShade]),
        plant(15, "ZZ Plant", "Zamioculcas zamiifolia", Some("Araceae"), Some("Zamioculcas"), Some(Easy), &[PartShade]),
    ]
});

/// Synthesize a single mock detail record for an arbitrary id
pub fn mock_detail(id: u64) -> Plant {
    let indoor = INDOOR_DETAIL_IDS.contains(&id);
    Plant {
        id,
        common_name: Some(format!("Plant {id}")),
        scientific_name: Some(format!("Plantus {id}")),
        family: None,
        genus: None,
        care_level: Some(CareLevel::Medium),
        sunlight: vec![if indoor {
            Sunlight::PartShade
        } else {
            Sunlight::FullSun
        }],
        price: None,
        image_url: Some("/api/placeholder/300/200".to_string()),
        placement: Some(if indoor {
            Placement::Indoor
        } else {
            Placement::Outdoor
        }),
    }
    .into_enriched()
}

/// Client-side fallback search over the fixed search catalog
///
/// Results match the query as a case-insensitive substring of either name;
/// suggestions are common names of plants whose common or scientific name
/// starts with the query, capped at [`SUGGESTION_CAP`].
pub fn mock_search(query: &str) -> (Vec<Plant>, Vec<String>) {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let name_matches = |plant: &Plant, f: fn(&str, &str) -> bool| {
        plant
            .common_name
            .as_deref()
            .is_some_and(|n| f(&n.to_lowercase(), &term))
            || plant
                .scientific_name
                .as_deref()
                .is_some_and(|n| f(&n.to_lowercase(), &term))
    };

    let results: Vec<Plant> = SEARCH_CATALOG
        .iter()
        .filter(|p| name_matches(p, |name, term| name.contains(term)))
        .take(SEARCH_RESULT_CAP)
        .cloned()
        .collect();

    let suggestions: Vec<String> = SEARCH_CATALOG
        .iter()
        .filter(|p| name_matches(p, |name, term| name.starts_with(term)))
        .filter_map(|p| p.common_name.clone())
        .take(SUGGESTION_CAP)
        .collect();

    (results, suggestions)
}
