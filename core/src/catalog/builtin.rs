//! Built-in event catalog for the Deadlock Midtown map

use matchtimer_types::EventPriority::{Critical, High, Low, Medium};

use super::{EventDefinition, EventKind, RespawnSchedule};

const MIN: f64 = 60.0;

pub(super) fn definitions() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new(
            "easy-camps",
            "Easy Camps",
            "🟢",
            "4 small Denizen camps spawn in the jungle",
            2.0 * MIN,
            Low,
            EventKind::OneTimeSpawn,
        ),
        EventDefinition::new(
            "crates-statues",
            "Crates & Golden Statues",
            "📦",
            "Breakable crates (souls) and Tier 1 Golden Statues (stat buffs)",
            2.0 * MIN,
            Low,
            EventKind::OneTimeSpawn,
        ),
        EventDefinition::new(
            "powerups",
            "Powerups",
            "⚡",
            "2 powerup locations spawn simultaneously",
            5.0 * MIN,
            High,
            EventKind::AutoRecurring { interval: 5.0 * MIN },
        ),
        EventDefinition::new(
            "medium-camps",
            "Medium Camps",
            "🟡",
            "22 medium Denizen camps spawn",
            6.0 * MIN,
            Medium,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Fixed(4.0 * MIN + 50.0),
            },
        ),
        EventDefinition::new(
            "hard-camps",
            "Hard Camps",
            "🔴",
            "12 hard Denizen camps spawn",
            8.0 * MIN,
            Medium,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Fixed(5.0 * MIN + 35.0),
            },
        ),
        EventDefinition::new(
            "vault-camps",
            "Vault Camps",
            "🔒",
            "Sinner's Sacrifice machines, 10 locations",
            8.0 * MIN,
            Medium,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Fixed(5.0 * MIN),
            },
        ),
        EventDefinition::new(
            "soul-urn",
            "Soul Urn",
            "🏺",
            "Descends from the sky, grants souls to the team",
            10.0 * MIN,
            High,
            EventKind::AutoRecurring { interval: 5.0 * MIN },
        ),
        EventDefinition::new(
            "mid-boss",
            "Mid-Boss",
            "💀",
            "Drops Rejuvenator crystal, 4min team buff",
            10.0 * MIN,
            Critical,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Decreasing(vec![7.0 * MIN, 6.0 * MIN, 5.0 * MIN]),
            },
        ),
        EventDefinition::new(
            "golden-statues-t2",
            "Golden Statues Tier 2",
            "🗿",
            "Statues upgrade, better stat buffs",
            10.0 * MIN,
            Medium,
            EventKind::Milestone,
        ),
        EventDefinition::new(
            "golden-statues-t3",
            "Golden Statues Tier 3",
            "🗿",
            "Statues upgrade, best stat buffs",
            30.0 * MIN,
            Medium,
            EventKind::Milestone,
        ),
    ]
}
