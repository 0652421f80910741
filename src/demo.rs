use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::schedule::{Horizon, PreferenceRequest, StaffMember};

const DEMO_NAMES: [&str; 12] = [
    "Avery Brooks",
    "Jordan Patel",
    "Morgan Chen",
    "Riley Okafor",
    "Casey Novak",
    "Quinn Alvarez",
    "Jamie Larsen",
    "Taylor Moreau",
    "Reese Kowalski",
    "Skyler Haddad",
    "Drew Sato",
    "Parker Lindqvist",
];

/// Staff directory used when no directory file is available
pub fn demo_staff() -> Vec<StaffMember> {
    DEMO_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| StaffMember {
            id: format!("staff-{:02}", i + 1).into(),
            display_name: name.to_string(),
        })
        .collect()
}

/// Seeded preference list: every staff member asks for a random set of
/// distinct horizon dates, between a quarter and half of the horizon
pub fn generate_preferences(staff: &[StaffMember], horizon: &Horizon, seed: u64) -> Vec<PreferenceRequest> {
    let mut rng = StdRng::seed_from_u64(seed);
    let low = (horizon.len() / 4).max(1);
    let high = (horizon.len() / 2).max(low);

    let mut preferences = Vec::new();
    for member in staff {
        let wanted = rng.gen_range(low..=high);
        let mut dates: Vec<_> = horizon
            .dates()
            .choose_multiple(&mut rng, wanted)
            .copied()
            .collect();
        dates.sort();
        preferences.extend(
            dates
                .into_iter()
                .map(|date| PreferenceRequest::new(member.id.clone(), date)),
        );
    }
    preferences
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_preferences() {
        let horizon = Horizon::from_range("2024-09-17".parse().unwrap(), "2024-10-07".parse().unwrap()).unwrap();
        let staff = demo_staff();
        let first = generate_preferences(&staff, &horizon, 7);
        let second = generate_preferences(&staff, &horizon, 7);
        assert_eq!(first, second);

        for member in &staff {
            let dates: Vec<_> = first.iter().filter(|p| p.staff_id == member.id).map(|p| p.date).collect();
            let distinct: HashSet<_> = dates.iter().collect();
            assert_eq!(distinct.len(), dates.len());
            assert!((5..=10).contains(&dates.len()));
            assert!(dates.iter().all(|d| horizon.contains(d)));
        }
    }
}
