//! Plant catalog data model
//!
//! Defines the Plant record plus the pure classification helpers applied at
//! ingestion: care-level ranking, sunlight parsing and inference, and the
//! keyword-table indoor/outdoor classifier.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Synthesized prices stay inside this band (base currency units)
pub const PRICE_BAND: std::ops::RangeInclusive<u32> = 15..=85;

/// Care difficulty label
///
/// The API reports free-text labels; the known ones collapse into three
/// ranks. Unrecognized labels keep their text and rank as medium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareLevel {
    Easy,
    Medium,
    Hard,
    /// Label the rank table does not know
    Other(String),
}

impl CareLevel {
    /// Parse an API care-level label
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" | "low" => CareLevel::Easy,
            "medium" | "moderate" => CareLevel::Medium,
            "hard" | "difficult" | "high" => CareLevel::Hard,
            _ => CareLevel::Other(label.trim().to_string()),
        }
    }

    /// Sort rank: easy 1, medium 2, hard 3; unknown labels rank as medium
    pub fn rank(&self) -> u8 {
        match self {
            CareLevel::Easy => 1,
            CareLevel::Medium | CareLevel::Other(_) => 2,
            CareLevel::Hard => 3,
        }
    }
}

/// Light requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sunlight {
    FullSun,
    PartShade,
}

impl Sunlight {
    /// Parse one API sunlight string; variants map by substring
    /// ("part sun/part shade" counts as part shade)
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.contains("shade") {
            Some(Sunlight::PartShade)
        } else if label.contains("full sun") || label.contains("sun") {
            Some(Sunlight::FullSun)
        } else {
            None
        }
    }
}

/// Indoor/outdoor placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Indoor,
    Outdoor,
}

/// A catalog plant record
///
/// Immutable after ingestion; filtering and sorting always operate on
/// copies. Every field past `id` and one display name is optional and every
/// consumer tolerates its absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Plant {
    /// Stable catalog id
    pub id: u64,
    /// Common display name
    pub common_name: Option<String>,
    /// Scientific (botanical) name
    pub scientific_name: Option<String>,
    /// Taxonomic family
    pub family: Option<String>,
    /// Taxonomic genus
    pub genus: Option<String>,
    /// Care difficulty
    pub care_level: Option<CareLevel>,
    /// Light requirements (never empty after ingestion)
    #[serde(default)]
    pub sunlight: Vec<Sunlight>,
    /// Price in base currency units (always present after ingestion)
    pub price: Option<u32>,
    /// Image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Indoor/outdoor placement (resolved at ingestion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl Plant {
    /// Name shown in listings: common name, else scientific name
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .or(self.scientific_name.as_deref())
            .unwrap_or("Unknown plant")
    }

    /// Lowercased name used by the classifiers
    fn classification_name(&self) -> String {
        self.display_name().to_lowercase()
    }

    /// Whether the plant tolerates both full sun and part shade
    pub fn is_flexible_sunlight(&self) -> bool {
        self.sunlight.contains(&Sunlight::FullSun) && self.sunlight.contains(&Sunlight::PartShade)
    }

    /// Ingested price; ingestion guarantees presence, pre-ingestion records
    /// fall through to the deterministic synthesized value
    pub fn effective_price(&self) -> u32 {
        self.price.unwrap_or_else(|| deterministic_price(self.id))
    }

    /// Apply the ingestion enrichment in place and return the record
    ///
    /// Guarantees a price (deterministic from the id, assigned once), a
    /// non-empty sunlight set, and a placement.
    pub fn into_enriched(mut self) -> Self {
        if self.price.is_none() {
            self.price = Some(deterministic_price(self.id));
        }
        if self.sunlight.is_empty() {
            self.sunlight = infer_sunlight(&self.classification_name());
        }
        if self.placement.is_none() {
            self.placement = Some(classify_placement(&self.classification_name()));
        }
        self
    }
}

/// Synthesize a stable price for a plant lacking one
///
/// Seeded from the plant id so the same record always prices the same; the
/// original regenerated a random price per sort comparison, which made price
/// sort non-deterministic.
pub fn deterministic_price(id: u64) -> u32 {
    let mut rng = StdRng::seed_from_u64(id);
    rng.gen_range(PRICE_BAND)
}

/// Common houseplants: names containing any of these classify as indoor
const INDOOR_KEYWORDS: &[&str] = &[
    "pothos", "philodendron", "monstera", "snake plant", "sansevieria",
    "peace lily", "spathiphyllum", "rubber plant", "ficus elastica",
    "chinese evergreen", "aglaonema", "spider plant", "chlorophytum",
    "zz plant", "zamioculcas", "dracaena", "prayer plant", "maranta",
    "fiddle leaf fig", "aloe", "jade plant", "crassula", "begonia",
    "african violet", "saintpaulia", "orchid", "anthurium", "calathea",
    "bromeliad", "christmas cactus", "schlumbergera", "boston fern",
    "nephrolepis", "bird of paradise", "strelitzia", "parlor palm",
    "chamaedorea", "areca palm", "dypsis", "majesty palm", "ravenea",
    "kentia palm", "howea", "yucca", "dieffenbachia", "croton",
    "codiaeum", "schefflera", "hoya", "peperomia", "pilea",
];

/// Trees and large garden plants: names containing these classify as outdoor
const OUTDOOR_KEYWORDS: &[&str] = &[
    "oak", "maple", "pine", "fir", "spruce", "cedar", "elm", "ash",
    "birch", "willow", "poplar", "cherry", "apple", "plum", "peach",
    "magnolia", "dogwood", "redbud", "linden", "sycamore", "hickory",
    "walnut", "chestnut", "beech", "hornbeam", "hawthorn", "crabapple",
    "serviceberry", "elderberry", "sumac", "buckeye", "tulip tree",
    "sweetgum", "liquidambar", "catalpa", "locust", "honey locust",
    "tree", "shrub", "bush", "hedge", "climbing", "vine",
];

/// Ambiguous-case hints that lean indoor
const SMALL_PLANT_KEYWORDS: &[&str] = &["dwarf", "mini", "compact", "small"];
const TROPICAL_KEYWORDS: &[&str] = &["tropical", "houseplant", "indoor"];

/// Plants that prefer partial shade when the API reports no sunlight data
const SHADE_KEYWORDS: &[&str] = &[
    "fern", "boston fern", "maidenhair fern", "bird nest fern",
    "hosta", "coral bells", "heuchera",
    "begonia", "impatiens", "coleus",
    "caladium", "astilbe", "bleeding heart",
    "pothos", "aglaonema", "spathiphyllum", "peace lily", "chinese evergreen",
    "marble queen", "neon pothos", "spider plant",
    "zz plant", "zamioculcas", "philodendron", "monstera",
    "japanese maple", "maple", "dogwood", "redbud",
    "azalea", "rhododendron", "camellia", "hydrangea",
];

/// Plants that tolerate both full sun and partial shade
const FLEXIBLE_KEYWORDS: &[&str] = &[
    "snake plant", "sansevieria", "rubber plant", "ficus", "fiddle leaf",
    "syngonium", "dracaena", "monstera",
    "rose", "lavender", "salvia", "peony",
    "daylily", "black eyed susan", "coneflower",
    "oak", "cherry", "apple", "pear",
    "boxelder", "holly", "viburnum",
];

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(k))
}

/// Classify a plant name as indoor or outdoor
///
/// Rule table, not a model: explicit keyword matches win, small/tropical
/// hints break ties, and unrecognized names default to outdoor.
pub fn classify_placement(name: &str) -> Placement {
    let name = name.to_lowercase();
    let indoor = matches_any(&name, INDOOR_KEYWORDS);
    let outdoor = matches_any(&name, OUTDOOR_KEYWORDS);

    if outdoor && !indoor {
        return Placement::Outdoor;
    }
    if indoor {
        return Placement::Indoor;
    }
    if matches_any(&name, SMALL_PLANT_KEYWORDS) || matches_any(&name, TROPICAL_KEYWORDS) {
        return Placement::Indoor;
    }
    Placement::Outdoor
}

/// Infer a sunlight set for a plant name with no API sunlight data
///
/// Shade lovers get part shade, known flexible plants get both, everything
/// else defaults to full sun. The flexible list is checked after the shade
/// list, matching the original rule order.
pub fn infer_sunlight(name: &str) -> Vec<Sunlight> {
    let name = name.to_lowercase();
    if matches_any(&name, SHADE_KEYWORDS) {
        vec![Sunlight::PartShade]
    } else if matches_any(&name, FLEXIBLE_KEYWORDS) {
        vec![Sunlight::FullSun, Sunlight::PartShade]
    } else {
        vec![Sunlight::FullSun]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn bare_plant(id: u64, common_name: &str) -> Plant {
        Plant {
            id,
            common_name: Some(common_name.to_string()),
            scientific_name: None,
            family: None,
            genus: None,
            care_level: None,
            sunlight: Vec::new(),
            price: None,
            image_url: None,
            placement: None,
        }
    }

    #[test]
    fn test_care_level_parse_and_rank() {
        assert_eq!(CareLevel::parse("Easy"), CareLevel::Easy);
        assert_eq!(CareLevel::parse("low"), CareLevel::Easy);
        assert_eq!(CareLevel::parse("Moderate"), CareLevel::Medium);
        assert_eq!(CareLevel::parse("Difficult"), CareLevel::Hard);
        assert_eq!(CareLevel::parse("High"), CareLevel::Hard);
        assert_eq!(
            CareLevel::parse("Bonsai-grade"),
            CareLevel::Other("Bonsai-grade".to_string())
        );

        assert_eq!(CareLevel::parse("easy").rank(), 1);
        assert_eq!(CareLevel::parse("medium").rank(), 2);
        assert_eq!(CareLevel::parse("hard").rank(), 3);
        assert_eq!(CareLevel::parse("Bonsai-grade").rank(), 2);
    }

    #[test]
    fn test_sunlight_parse_variants() {
        assert_eq!(Sunlight::parse("full sun"), Some(Sunlight::FullSun));
        assert_eq!(Sunlight::parse("Part shade"), Some(Sunlight::PartShade));
        assert_eq!(
            Sunlight::parse("part sun/part shade"),
            Some(Sunlight::PartShade)
        );
        assert_eq!(Sunlight::parse("sun"), Some(Sunlight::FullSun));
        assert_eq!(Sunlight::parse("moonlight"), None);
    }

    #[test]
    fn test_display_name_fallback_chain() {
        let mut plant = bare_plant(1, "Pothos");
        plant.scientific_name = Some("Epipremnum aureum".to_string());
        assert_eq!(plant.display_name(), "Pothos");

        plant.common_name = None;
        assert_eq!(plant.display_name(), "Epipremnum aureum");

        plant.scientific_name = None;
        assert_eq!(plant.display_name(), "Unknown plant");
    }

    #[test]
    fn test_deterministic_price_is_stable_and_in_band() {
        for id in [1u64, 7, 42, 9_999] {
            let first = deterministic_price(id);
            let second = deterministic_price(id);
            assert_eq!(first, second);
            assert!(PRICE_BAND.contains(&first));
        }
        // Different ids should not all collapse onto one price
        let distinct: std::collections::HashSet<u32> =
            (0..100u64).map(deterministic_price).collect();
        assert!(distinct.len() > 10);
    }

    #[test]
    fn test_enrichment_fills_missing_fields_once() {
        let plant = bare_plant(6, "Pothos").into_enriched();
        assert_eq!(plant.price, Some(deterministic_price(6)));
        assert_eq!(plant.sunlight, vec![Sunlight::PartShade]);
        assert_eq!(plant.placement, Some(Placement::Indoor));

        // Enrichment never overwrites existing data
        let mut priced = bare_plant(6, "Pothos");
        priced.price = Some(250);
        priced.sunlight = vec![Sunlight::FullSun];
        priced.placement = Some(Placement::Outdoor);
        let enriched = priced.into_enriched();
        assert_eq!(enriched.price, Some(250));
        assert_eq!(enriched.sunlight, vec![Sunlight::FullSun]);
        assert_eq!(enriched.placement, Some(Placement::Outdoor));
    }

    #[test]
    fn test_classify_placement_keyword_rules() {
        assert_eq!(classify_placement("Golden Pothos"), Placement::Indoor);
        assert_eq!(classify_placement("Red Oak"), Placement::Outdoor);
        // Indoor match wins over outdoor tie ("rubber plant" vs "tree")
        assert_eq!(
            classify_placement("Rubber Plant tree form"),
            Placement::Indoor
        );
        // Ambiguous names with tropical hints lean indoor
        assert_eq!(classify_placement("Tropical mystery"), Placement::Indoor);
        assert_eq!(classify_placement("Dwarf something"), Placement::Indoor);
        // Unrecognized defaults to outdoor
        assert_eq!(classify_placement("Quercus borealis"), Placement::Outdoor);
    }

    #[test]
    fn test_infer_sunlight_rule_order() {
        assert_eq!(infer_sunlight("Boston Fern"), vec![Sunlight::PartShade]);
        assert_eq!(
            infer_sunlight("Snake Plant"),
            vec![Sunlight::FullSun, Sunlight::PartShade]
        );
        // No list matches: full sun default
        assert_eq!(infer_sunlight("Petunia"), vec![Sunlight::FullSun]);
        // Substring matching reaches through compound names: "pineapple"
        // contains "apple", which is in the flexible list
        assert_eq!(
            infer_sunlight("Pineapple"),
            vec![Sunlight::FullSun, Sunlight::PartShade]
        );
        // Shade list is checked before the flexible list, so monstera and
        // maple infer part shade despite also appearing in other lists
        assert_eq!(
            infer_sunlight("Monstera Deliciosa"),
            vec![Sunlight::PartShade]
        );
        assert_eq!(infer_sunlight("Red Maple"), vec![Sunlight::PartShade]);
        assert_eq!(infer_sunlight("Japanese Maple"), vec![Sunlight::PartShade]);
    }

    #[test]
    fn test_flexible_sunlight() {
        let plant = bare_plant(9, "Snake Plant").into_enriched();
        assert!(plant.is_flexible_sunlight());

        let shade = bare_plant(6, "Pothos").into_enriched();
        assert!(!shade.is_flexible_sunlight());
    }
}
