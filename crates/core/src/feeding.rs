//! Feed tier and grass ration rules.
//!
//! Both calculators are total over every `f64` weight, including negative
//! values; weights are not validated here.

use crate::animal::AnimalType;

/// Concentrate portion for a tier-1 goat (grams).
pub const GOAT_CONCENTRATE_BASE_G: i32 = 200;

/// Extra concentrate per goat tier above 1 (grams).
pub const GOAT_CONCENTRATE_STEP_G: i32 = 50;

/// Daily green grass for a goat, independent of weight (kg).
pub const GOAT_GRASS_RATION_KG: f64 = 2.5;

/// Map a weight to its concentrated-feed tier.
///
/// Goats use five tiers with upper bounds 15/18/21/23 kg. Cows and every
/// other animal use three tiers with upper bounds 150/280 kg. Each bound is
/// exclusive, so a weight sitting exactly on a bound lands in the next tier.
pub fn feed_tier(weight: f64, animal: &AnimalType) -> i32 {
    match animal {
        AnimalType::Goat => {
            if weight < 15.0 {
                1
            } else if weight < 18.0 {
                2
            } else if weight < 21.0 {
                3
            } else if weight < 23.0 {
                4
            } else {
                5
            }
        }
        _ => {
            if weight < 150.0 {
                1
            } else if weight < 280.0 {
                2
            } else {
                3
            }
        }
    }
}

/// Daily green grass ration in kilograms.
pub fn grass_ration(weight: f64, animal: &AnimalType) -> f64 {
    match animal {
        AnimalType::Goat => GOAT_GRASS_RATION_KG,
        _ => {
            if weight < 150.0 {
                5.0
            } else if weight < 250.0 {
                7.5
            } else if weight < 400.0 {
                12.5
            } else {
                17.5
            }
        }
    }
}

/// Concentrate portion for a goat at the given tier.
pub fn goat_concentrate_grams(tier: i32) -> i32 {
    GOAT_CONCENTRATE_BASE_G + GOAT_CONCENTRATE_STEP_G * (tier - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn other() -> AnimalType {
        AnimalType::Other("sheep".to_string())
    }

    #[test]
    fn goat_tier_boundaries() {
        let goat = AnimalType::Goat;
        assert_eq!(feed_tier(14.999, &goat), 1);
        assert_eq!(feed_tier(15.0, &goat), 2);
        assert_eq!(feed_tier(17.9, &goat), 2);
        assert_eq!(feed_tier(18.0, &goat), 3);
        assert_eq!(feed_tier(20.0, &goat), 3);
        assert_eq!(feed_tier(21.0, &goat), 4);
        assert_eq!(feed_tier(23.0, &goat), 5);
        assert_eq!(feed_tier(80.0, &goat), 5);
    }

    #[test]
    fn cow_tier_boundaries() {
        let cow = AnimalType::Cow;
        assert_eq!(feed_tier(140.0, &cow), 1);
        assert_eq!(feed_tier(149.99, &cow), 1);
        assert_eq!(feed_tier(150.0, &cow), 2);
        assert_eq!(feed_tier(279.9, &cow), 2);
        assert_eq!(feed_tier(280.0, &cow), 3);
    }

    #[test]
    fn unknown_animals_use_cow_tiers() {
        assert_eq!(feed_tier(100.0, &other()), 1);
        assert_eq!(feed_tier(200.0, &other()), 2);
        assert_eq!(feed_tier(300.0, &other()), 3);
    }

    #[test]
    fn negative_weight_is_accepted() {
        assert_eq!(feed_tier(-5.0, &AnimalType::Goat), 1);
        assert_eq!(feed_tier(-5.0, &AnimalType::Cow), 1);
    }

    #[test]
    fn tiers_never_decrease_with_weight() {
        for animal in [AnimalType::Goat, AnimalType::Cow, other()] {
            let mut previous = feed_tier(-10.0, &animal);
            let mut weight = -10.0;
            while weight < 500.0 {
                let tier = feed_tier(weight, &animal);
                assert!(tier >= previous, "{animal} tier dropped at {weight}");
                previous = tier;
                weight += 0.25;
            }
        }
    }

    #[test]
    fn goat_grass_is_constant() {
        assert_eq!(grass_ration(5.0, &AnimalType::Goat), 2.5);
        assert_eq!(grass_ration(20.0, &AnimalType::Goat), 2.5);
    }

    #[test]
    fn cow_grass_boundaries() {
        let cow = AnimalType::Cow;
        assert_eq!(grass_ration(149.0, &cow), 5.0);
        assert_eq!(grass_ration(150.0, &cow), 7.5);
        assert_eq!(grass_ration(250.0, &cow), 12.5);
        assert_eq!(grass_ration(399.0, &cow), 12.5);
        assert_eq!(grass_ration(400.0, &cow), 17.5);
        assert_eq!(grass_ration(650.0, &cow), 17.5);
    }

    #[test]
    fn goat_concentrate_grows_fifty_grams_per_tier() {
        assert_eq!(goat_concentrate_grams(1), 200);
        assert_eq!(goat_concentrate_grams(3), 300);
        assert_eq!(goat_concentrate_grams(5), 400);
    }
}
