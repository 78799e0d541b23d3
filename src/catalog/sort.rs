//! Catalog sort comparators
//!
//! Each sort key has its own comparator; ascending and descending variants
//! compare in their own orientation rather than negating each other, so
//! duplicate keys keep their incoming relative order under the stable sort.
//! Sorting never re-fetches and never mutates the source list.

use std::cmp::Ordering;

use crate::models::plant::Plant;

/// Sort key offered by the sort dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Server/default ordering, no local comparator
    #[default]
    Popular,
    CommonNameAsc,
    CommonNameDesc,
    ScientificNameAsc,
    ScientificNameDesc,
    FamilyAsc,
    FamilyDesc,
    GenusAsc,
    GenusDesc,
    CareLevelAsc,
    CareLevelDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// All keys in dropdown order
    pub const ALL: [SortKey; 13] = [
        SortKey::Popular,
        SortKey::CommonNameAsc,
        SortKey::CommonNameDesc,
        SortKey::ScientificNameAsc,
        SortKey::ScientificNameDesc,
        SortKey::FamilyAsc,
        SortKey::FamilyDesc,
        SortKey::GenusAsc,
        SortKey::GenusDesc,
        SortKey::CareLevelAsc,
        SortKey::CareLevelDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];

    /// Label shown in the sort dropdown
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Popular => "Popular",
            SortKey::CommonNameAsc => "Common Name (A-Z)",
            SortKey::CommonNameDesc => "Common Name (Z-A)",
            SortKey::ScientificNameAsc => "Scientific Name (A-Z)",
            SortKey::ScientificNameDesc => "Scientific Name (Z-A)",
            SortKey::FamilyAsc => "Family (A-Z)",
            SortKey::FamilyDesc => "Family (Z-A)",
            SortKey::GenusAsc => "Genus (A-Z)",
            SortKey::GenusDesc => "Genus (Z-A)",
            SortKey::CareLevelAsc => "Care Level (Easy to Hard)",
            SortKey::CareLevelDesc => "Care Level (Hard to Easy)",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
        }
    }

    /// Look a key up by its dropdown label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    fn compare(self, a: &Plant, b: &Plant) -> Ordering {
        match self {
            SortKey::Popular => Ordering::Equal,
            SortKey::CommonNameAsc => str_asc(&a.common_name, &b.common_name),
            SortKey::CommonNameDesc => str_desc(&a.common_name, &b.common_name),
            SortKey::ScientificNameAsc => str_asc(&a.scientific_name, &b.scientific_name),
            SortKey::ScientificNameDesc => str_desc(&a.scientific_name, &b.scientific_name),
            SortKey::FamilyAsc => str_asc(&a.family, &b.family),
            SortKey::FamilyDesc => str_desc(&a.family, &b.family),
            SortKey::GenusAsc => str_asc(&a.genus, &b.genus),
            SortKey::GenusDesc => str_desc(&a.genus, &b.genus),
            SortKey::CareLevelAsc => care_rank(a).cmp(&care_rank(b)),
            SortKey::CareLevelDesc => care_rank(b).cmp(&care_rank(a)),
            SortKey::PriceAsc => a.effective_price().cmp(&b.effective_price()),
            SortKey::PriceDesc => b.effective_price().cmp(&a.effective_price()),
        }
    }
}

/// Case-insensitive name comparison; missing values read as the empty
/// string, so they sort first ascending
fn str_asc(a: &Option<String>, b: &Option<String>) -> Ordering {
    fold(a).cmp(&fold(b))
}

fn str_desc(a: &Option<String>, b: &Option<String>) -> Ordering {
    fold(b).cmp(&fold(a))
}

fn fold(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").to_lowercase()
}

fn care_rank(plant: &Plant) -> u8 {
    plant.care_level.as_ref().map(|c| c.rank()).unwrap_or(2)
}

/// Return a sorted copy of `plants` under `key`
pub fn sorted_by(plants: &[Plant], key: SortKey) -> Vec<Plant> {
    let mut out = plants.to_vec();
    if key != SortKey::Popular {
        out.sort_by(|a, b| key.compare(a, b));
    }
    out
}
