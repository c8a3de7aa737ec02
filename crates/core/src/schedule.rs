//! Daily feeding and care schedule templates.
//!
//! A schedule is an ordered list of phases, each holding an ordered list of
//! tasks. Tasks carry a 0-based index that runs across the whole schedule
//! (flattened order). That index is the key used by the day's completion and
//! photo state, so the templates below must only ever be appended to, never
//! reordered, or previously saved state would point at the wrong task.

use chrono::NaiveDate;
use serde::Serialize;

use crate::animal::AnimalType;
use crate::feeding::{feed_tier, goat_concentrate_grams, grass_ration};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTask {
    /// Flattened position across all phases.
    pub index: usize,
    pub description: String,
    pub time_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub name: String,
    pub tasks: Vec<ScheduledTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub phases: Vec<Phase>,
}

impl Schedule {
    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|p| p.tasks.len()).sum()
    }

    /// Tasks in flattened order.
    pub fn tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.phases.iter().flat_map(|p| p.tasks.iter())
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.task_count()
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

struct TaskTemplate {
    /// Text with optional `{tier}`, `{ration}` and `{concentrate_g}` slots.
    text: &'static str,
    time_range: &'static str,
}

struct PhaseTemplate {
    name: &'static str,
    tasks: &'static [TaskTemplate],
}

const fn task(text: &'static str, time_range: &'static str) -> TaskTemplate {
    TaskTemplate { text, time_range }
}

const COW_SCHEDULE: &[PhaseTemplate] = &[
    PhaseTemplate {
        name: "Morning",
        tasks: &[
            task(
                "Clean the shed and the feed trough, wash the cow's legs up to the knees",
                "6:00 - 7:00",
            ),
            task("Feed green grass ({ration} kg)", "7:00 - 8:00"),
            task(
                "Concentrated feed tier {tier} with molasses water",
                "8:00 - 9:00",
            ),
            task(
                "Straw soaked in 20 L of water with 20 g of molasses",
                "9:00 - 10:00",
            ),
        ],
    },
    PhaseTemplate {
        name: "Midday",
        tasks: &[
            task("Clean the shed", "10:00 - 11:00"),
            task("Rinse the feed trough with water", "11:00 - 12:00"),
            task("Bathe the cow", "12:00 - 1:00"),
        ],
    },
    PhaseTemplate {
        name: "Afternoon",
        tasks: &[
            task("Fill the trough with molasses water", "1:00 - 3:00"),
            task("Feed green grass ({ration} kg)", "3:00 - 4:00"),
            task("Concentrated feed tier {tier} with molasses", "4:00 - 5:00"),
            task("Straw with molasses water", "5:00 - 6:00"),
        ],
    },
    PhaseTemplate {
        name: "Evening",
        tasks: &[task(
            "Clean the shed and light a mosquito coil",
            "6:00 - 7:00",
        )],
    },
];

const GOAT_SCHEDULE: &[PhaseTemplate] = &[
    PhaseTemplate {
        name: "Morning",
        tasks: &[
            task("Clean the pen and remove old bedding", "6:00"),
            task(
                "Feed green grass (daily ration {ration} kg)",
                "6:30",
            ),
            task("Refill fresh drinking water", "7:30"),
            task(
                "Concentrate tier {tier} (about {concentrate_g} g)",
                "8:30",
            ),
            task("Feed green grass", "9:30 - 12:00"),
            task("Check hooves, eyes and coat", "10:00"),
        ],
    },
    PhaseTemplate {
        name: "Midday",
        tasks: &[
            task("Clear droppings from the pen", "12:00"),
            task("Refill fresh drinking water", "12:30"),
            task("Let the goat rest in the shade", "1:00 - 2:30"),
            task("Feed green grass", "3:00"),
            task("Give the remaining half of the concentrate", "4:30"),
        ],
    },
    PhaseTemplate {
        name: "Afternoon",
        tasks: &[task(
            "Feed green grass, then bring the goat in for the night",
            "5:30 - 7:30",
        )],
    },
];

const FALLBACK_PHASE: &str = "General";
const FALLBACK_TIME_RANGE: &str = "–";

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the schedule shown for one day.
///
/// The output depends only on `weight` and `animal`; `_day` is part of the
/// signature so callers always pass the day being displayed, and the same
/// schedule comes back for every call on every day.
pub fn build_schedule(_day: NaiveDate, weight: f64, animal: &AnimalType) -> Schedule {
    match animal {
        AnimalType::Cow => render(COW_SCHEDULE, weight, animal),
        AnimalType::Goat => render(GOAT_SCHEDULE, weight, animal),
        AnimalType::Other(name) => Schedule {
            phases: vec![Phase {
                name: FALLBACK_PHASE.to_string(),
                tasks: vec![ScheduledTask {
                    index: 0,
                    description: format!("Generic schedule for {name}"),
                    time_range: FALLBACK_TIME_RANGE.to_string(),
                }],
            }],
        },
    }
}

fn render(template: &[PhaseTemplate], weight: f64, animal: &AnimalType) -> Schedule {
    let tier = feed_tier(weight, animal);
    let ration = format_kg(grass_ration(weight, animal));
    let concentrate = goat_concentrate_grams(tier).to_string();
    let tier = tier.to_string();

    let mut index = 0;
    let phases = template
        .iter()
        .map(|phase| Phase {
            name: phase.name.to_string(),
            tasks: phase
                .tasks
                .iter()
                .map(|t| {
                    let rendered = ScheduledTask {
                        index,
                        description: t
                            .text
                            .replace("{tier}", &tier)
                            .replace("{ration}", &ration)
                            .replace("{concentrate_g}", &concentrate),
                        time_range: t.time_range.to_string(),
                    };
                    index += 1;
                    rendered
                })
                .collect(),
        })
        .collect();

    Schedule { phases }
}

/// `5.0` renders as `5`, `12.5` as `12.5`.
fn format_kg(kg: f64) -> String {
    if kg.fract() == 0.0 {
        format!("{kg:.0}")
    } else {
        format!("{kg}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn phase_sizes(schedule: &Schedule) -> Vec<usize> {
        schedule.phases.iter().map(|p| p.tasks.len()).collect()
    }

    #[test]
    fn cow_has_four_phases() {
        let schedule = build_schedule(day(1), 140.0, &AnimalType::Cow);
        let names: Vec<_> = schedule.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Morning", "Midday", "Afternoon", "Evening"]);
        assert_eq!(phase_sizes(&schedule), [4, 3, 4, 1]);
        assert_eq!(schedule.task_count(), 12);
    }

    #[test]
    fn goat_has_three_phases() {
        let schedule = build_schedule(day(1), 20.0, &AnimalType::Goat);
        let names: Vec<_> = schedule.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Morning", "Midday", "Afternoon"]);
        assert_eq!(phase_sizes(&schedule), [6, 5, 1]);
        assert_eq!(schedule.task_count(), 12);
    }

    #[test]
    fn unknown_animal_gets_single_generic_task() {
        let schedule = build_schedule(day(1), 50.0, &AnimalType::parse("sheep"));
        assert_eq!(phase_sizes(&schedule), [1]);
        let only = schedule.tasks().next().unwrap();
        assert_eq!(only.index, 0);
        assert_eq!(only.description, "Generic schedule for sheep");
        assert_eq!(only.time_range, "–");
    }

    #[test]
    fn indices_are_flattened_and_contiguous() {
        for animal in [AnimalType::Cow, AnimalType::Goat] {
            let schedule = build_schedule(day(1), 100.0, &animal);
            let indices: Vec<_> = schedule.tasks().map(|t| t.index).collect();
            let expected: Vec<_> = (0..schedule.task_count()).collect();
            assert_eq!(indices, expected);
        }
    }

    #[test]
    fn cow_embeds_tier_and_ration() {
        let schedule = build_schedule(day(1), 160.0, &AnimalType::Cow);
        let tasks: Vec<_> = schedule.tasks().collect();
        assert_eq!(tasks[1].description, "Feed green grass (7.5 kg)");
        assert_eq!(
            tasks[2].description,
            "Concentrated feed tier 2 with molasses water"
        );
        assert_eq!(tasks[9].description, "Concentrated feed tier 2 with molasses");
    }

    #[test]
    fn goat_embeds_tier_ration_and_concentrate() {
        let schedule = build_schedule(day(1), 20.0, &AnimalType::Goat);
        let tasks: Vec<_> = schedule.tasks().collect();
        assert_eq!(tasks[1].description, "Feed green grass (daily ration 2.5 kg)");
        assert_eq!(tasks[3].description, "Concentrate tier 3 (about 300 g)");
    }

    #[test]
    fn whole_kilograms_render_without_decimals() {
        let schedule = build_schedule(day(1), 100.0, &AnimalType::Cow);
        let grass = schedule.tasks().nth(1).unwrap();
        assert_eq!(grass.description, "Feed green grass (5 kg)");
    }

    #[test]
    fn same_inputs_on_different_days_give_same_schedule() {
        for animal in [AnimalType::Cow, AnimalType::Goat, AnimalType::parse("yak")] {
            let a = build_schedule(day(1), 210.0, &animal);
            let b = build_schedule(day(28), 210.0, &animal);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn contains_index_respects_task_count() {
        let schedule = build_schedule(day(1), 20.0, &AnimalType::Goat);
        assert!(schedule.contains_index(11));
        assert!(!schedule.contains_index(12));
    }
}
