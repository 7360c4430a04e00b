//! Simulated ward occupancy.
//!
//! A ward is generated once at startup (and on explicit reset): a single
//! pass over the fixed floor/room/bed grid, keeping each cell with 75%
//! probability and filling the occupant's fields independently from fixed
//! pools. The bed tab then runs filter, search and sort queries over the
//! generated set; none of those queries can fail.

use chrono::{DateTime, Local};
use rand::Rng;
use serde::Serialize;

/// Ward grid dimensions.
pub const FLOORS: u32 = 3;
pub const ROOMS_PER_FLOOR: u32 = 5;
pub const BEDS_PER_ROOM: u32 = 3;
/// Total beds in the grid.
pub const CAPACITY: usize = (FLOORS * ROOMS_PER_FLOOR * BEDS_PER_ROOM) as usize;

/// Probability that a given bed is occupied.
const OCCUPANCY: f64 = 0.75;

const FIRST_NAMES: &[&str] = &[
    "John", "Emma", "Michael", "Sarah", "David", "Lisa", "James", "Maria",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];

const DIAGNOSES: &[&str] = &[
    "Pneumonia",
    "Cardiac Arrest",
    "Diabetes Management",
    "Post-Surgery Recovery",
    "Hypertension",
    "Asthma",
    "Fractured Femur",
    "COVID-19",
];

const DOCTORS: &[&str] = &[
    "Dr. Wilson",
    "Dr. Anderson",
    "Dr. Taylor",
    "Dr. Martinez",
    "Dr. Johnson",
];

/// Clinical status of a bed's occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    Stable,
    Critical,
    Observation,
    Recovery,
}

impl BedStatus {
    pub const ALL: [BedStatus; 4] = [
        BedStatus::Stable,
        BedStatus::Critical,
        BedStatus::Observation,
        BedStatus::Recovery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BedStatus::Stable => "Stable",
            BedStatus::Critical => "Critical",
            BedStatus::Observation => "Observation",
            BedStatus::Recovery => "Recovery",
        }
    }
}

/// Spot vitals attached to a bed occupant.
#[derive(Debug, Clone, Serialize)]
pub struct SpotVitals {
    pub heart_rate: u32,
    pub blood_pressure: String,
    pub temperature: f64,
    pub oxygen_sat: u32,
}

/// One occupied bed.
#[derive(Debug, Clone, Serialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: &'static str,
    pub admitted: String,
    pub diagnosis: &'static str,
    /// Bed number in `FRRB` form: floor, zero-padded room, bed.
    pub bed_number: String,
    pub room: String,
    pub floor: u32,
    pub status: BedStatus,
    pub vitals: SpotVitals,
    pub doctor: &'static str,
    pub last_checkup: String,
}

/// Occupancy statistics for the stats tiles and header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WardStats {
    pub occupied: usize,
    pub available: usize,
    pub critical: usize,
    pub stable: usize,
}

/// Status filter applied to the bed table. `All` matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BedStatus),
}

impl StatusFilter {
    /// Cycle All -> Stable -> Critical -> Observation -> Recovery -> All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(BedStatus::Stable),
            StatusFilter::Only(BedStatus::Stable) => StatusFilter::Only(BedStatus::Critical),
            StatusFilter::Only(BedStatus::Critical) => StatusFilter::Only(BedStatus::Observation),
            StatusFilter::Only(BedStatus::Observation) => StatusFilter::Only(BedStatus::Recovery),
            StatusFilter::Only(BedStatus::Recovery) => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn matches(&self, status: BedStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Column to sort the bed table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BedSortColumn {
    /// Sort by bed number (grid order).
    #[default]
    Bed,
    Name,
    Age,
    Status,
}

impl BedSortColumn {
    pub fn next(self) -> Self {
        match self {
            BedSortColumn::Bed => BedSortColumn::Name,
            BedSortColumn::Name => BedSortColumn::Age,
            BedSortColumn::Age => BedSortColumn::Status,
            BedSortColumn::Status => BedSortColumn::Bed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BedSortColumn::Bed => "bed",
            BedSortColumn::Name => "name",
            BedSortColumn::Age => "age",
            BedSortColumn::Status => "status",
        }
    }
}

/// The generated set of occupied beds.
#[derive(Debug, Clone, Serialize)]
pub struct Ward {
    pub beds: Vec<Patient>,
}

impl Ward {
    /// Generate a fresh ward: one pass over the grid, 75% keep-probability
    /// per bed, independent field assignment.
    pub fn generate<R: Rng>(rng: &mut R, today: DateTime<Local>) -> Self {
        let mut beds = Vec::new();

        for floor in 1..=FLOORS {
            for room in 1..=ROOMS_PER_FLOOR {
                for bed in 1..=BEDS_PER_ROOM {
                    if !rng.gen_bool(OCCUPANCY) {
                        continue;
                    }

                    let bed_number = format!("{}{:02}{}", floor, room, bed);
                    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
                    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
                    let admitted = today - chrono::Duration::days(rng.gen_range(0..14));

                    beds.push(Patient {
                        id: format!("P{}", bed_number),
                        name: format!("{} {}", first, last),
                        age: rng.gen_range(20..80),
                        gender: if rng.gen_bool(0.5) { "Male" } else { "Female" },
                        admitted: admitted.format("%Y-%m-%d").to_string(),
                        diagnosis: DIAGNOSES[rng.gen_range(0..DIAGNOSES.len())],
                        room: format!("{}{:02}", floor, room),
                        floor,
                        status: BedStatus::ALL[rng.gen_range(0..BedStatus::ALL.len())],
                        vitals: SpotVitals {
                            heart_rate: rng.gen_range(60..100),
                            blood_pressure: format!(
                                "{}/{}",
                                rng.gen_range(110..140),
                                rng.gen_range(70..90)
                            ),
                            temperature: (rng.gen_range(36.5f64..38.5) * 10.0).round() / 10.0,
                            oxygen_sat: rng.gen_range(95..100),
                        },
                        doctor: DOCTORS[rng.gen_range(0..DOCTORS.len())],
                        last_checkup: format!("{}h ago", rng.gen_range(1..=3)),
                        bed_number,
                    });
                }
            }
        }

        tracing::debug!(occupied = beds.len(), capacity = CAPACITY, "ward generated");
        Self { beds }
    }

    pub fn stats(&self) -> WardStats {
        WardStats {
            occupied: self.beds.len(),
            available: CAPACITY - self.beds.len(),
            critical: self.beds.iter().filter(|b| b.status == BedStatus::Critical).count(),
            stable: self.beds.iter().filter(|b| b.status == BedStatus::Stable).count(),
        }
    }

    /// Beds matching both the status predicate and the search term.
    ///
    /// The search is a case-insensitive substring match over patient name,
    /// bed number and diagnosis; an empty search matches everything.
    pub fn filtered(&self, status: StatusFilter, search: &str) -> Vec<&Patient> {
        let needle = search.to_lowercase();
        self.beds
            .iter()
            .filter(|bed| status.matches(bed.status))
            .filter(|bed| {
                needle.is_empty()
                    || bed.name.to_lowercase().contains(&needle)
                    || bed.bed_number.contains(&needle)
                    || bed.diagnosis.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Sort a filtered bed list by the given column and direction.
///
/// Ties fall back to bed number so ordering is stable across redraws.
pub fn sort_beds_by(beds: &mut [&Patient], column: BedSortColumn, ascending: bool) {
    beds.sort_by(|a, b| {
        let primary = match column {
            BedSortColumn::Bed => a.bed_number.cmp(&b.bed_number),
            BedSortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            BedSortColumn::Age => a.age.cmp(&b.age),
            BedSortColumn::Status => (a.status as u8).cmp(&(b.status as u8)),
        };

        let primary = if ascending { primary } else { primary.reverse() };

        if primary == std::cmp::Ordering::Equal {
            a.bed_number.cmp(&b.bed_number)
        } else {
            primary
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn ward() -> Ward {
        let mut rng = StdRng::seed_from_u64(1234);
        Ward::generate(&mut rng, today())
    }

    #[test]
    fn test_generate_respects_grid_bounds() {
        let ward = ward();
        assert!(ward.beds.len() <= CAPACITY);
        assert!(!ward.beds.is_empty());

        for bed in &ward.beds {
            assert!((1..=FLOORS).contains(&bed.floor));
            assert_eq!(bed.bed_number.len(), 4);
            assert_eq!(bed.id, format!("P{}", bed.bed_number));
            assert!((20..80).contains(&bed.age));
            assert!((60..100).contains(&bed.vitals.heart_rate));
            assert!((95..100).contains(&bed.vitals.oxygen_sat));
        }
    }

    #[test]
    fn test_bed_numbers_are_unique() {
        let ward = ward();
        let mut numbers: Vec<&str> = ward.beds.iter().map(|b| b.bed_number.as_str()).collect();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), ward.beds.len());
    }

    #[test]
    fn test_stats_are_consistent() {
        let ward = ward();
        let stats = ward.stats();
        assert_eq!(stats.occupied + stats.available, CAPACITY);
        assert_eq!(stats.occupied, ward.beds.len());
        assert!(stats.critical + stats.stable <= stats.occupied);
    }

    #[test]
    fn test_filter_all_with_empty_search_returns_everything() {
        let ward = ward();
        assert_eq!(ward.filtered(StatusFilter::All, "").len(), ward.beds.len());
    }

    #[test]
    fn test_filter_is_a_subset_satisfying_both_predicates() {
        let ward = ward();
        let filtered = ward.filtered(StatusFilter::Only(BedStatus::Critical), "dr");

        assert!(filtered.len() <= ward.beds.len());
        for bed in &filtered {
            assert_eq!(bed.status, BedStatus::Critical);
            assert!(
                bed.name.to_lowercase().contains("dr")
                    || bed.bed_number.contains("dr")
                    || bed.diagnosis.to_lowercase().contains("dr")
            );
        }
    }

    #[test]
    fn test_search_matches_bed_number_and_diagnosis() {
        let ward = ward();
        let by_number = ward.filtered(StatusFilter::All, &ward.beds[0].bed_number);
        assert!(by_number.iter().any(|b| b.id == ward.beds[0].id));

        let by_diagnosis = ward.filtered(StatusFilter::All, "pneumonia");
        for bed in &by_diagnosis {
            assert_eq!(bed.diagnosis, "Pneumonia");
        }
    }

    #[test]
    fn test_status_filter_cycles_back_to_all() {
        let mut filter = StatusFilter::All;
        for _ in 0..5 {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn test_sort_by_age_descending_with_stable_ties() {
        let ward = ward();
        let mut beds = ward.filtered(StatusFilter::All, "");
        sort_beds_by(&mut beds, BedSortColumn::Age, false);

        for pair in beds.windows(2) {
            assert!(pair[0].age >= pair[1].age);
            if pair[0].age == pair[1].age {
                assert!(pair[0].bed_number < pair[1].bed_number);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let first = Ward::generate(&mut a, today());
        let second = Ward::generate(&mut b, today());

        assert_eq!(first.beds.len(), second.beds.len());
        for (x, y) in first.beds.iter().zip(second.beds.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.name, y.name);
            assert_eq!(x.status, y.status);
        }
    }
}
