use serde::Serialize;

use super::scoring::{AxisScores, DimensionScores, ScoringInput, map_to_axes, score_dimensions};

/// Below this many tabs there is not enough signal to score.
pub const UNBURDENED_BELOW: usize = 10;
/// At this many tabs scoring stops mattering.
pub const MORTAB_FROM: usize = 1000;

const AXIS_THRESHOLD: f64 = 0.5;
const SOCIAL_ZOMBIE_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchetypeId {
    Necromancer,
    Warlock,
    Wraith,
    BoneCleric,
    Zombie,
    Lich,
    Unburdened,
    Mortab,
}

struct ArchetypeDef {
    base_title: &'static str,
    description: &'static str,
    image: &'static str,
}

impl ArchetypeId {
    fn def(self) -> ArchetypeDef {
        match self {
            ArchetypeId::Necromancer => ArchetypeDef {
                base_title: "Necromancer",
                description: "You exhume knowledge on purpose. Your tabs are grimoires — long reads, old essays, and sources that still matter. You finish what you open. Nothing here is accidental.",
                image: "/necromancer.png",
            },
            ArchetypeId::Warlock => ArchetypeDef {
                base_title: "Warlock",
                description: "Your tabs are instruments of work. Tools, references, and opportunities bound by intent. You open with purpose, act decisively, and close the pact when the task is done.",
                image: "/warlock.png",
            },
            ArchetypeId::Wraith => ArchetypeDef {
                base_title: "Wraith",
                description: "You followed one idea too far. Rabbit holes, half-read books, endless related tabs — all circling something you haven't named yet. The knowledge lingers. You do too.",
                image: "/wraith.png",
            },
            ArchetypeId::BoneCleric => ArchetypeDef {
                base_title: "Bone Cleric",
                description: "You survey the dead and decide what rises. News, tools, markets, and signals pass through you. You evaluate, choose, and move on. Wide vision. Clean cuts.",
                image: "/bone-cleric.png",
            },
            ArchetypeId::Zombie => ArchetypeDef {
                base_title: "Zombie",
                description: "You didn't mean to open these tabs. They spread anyway. Social links, homepages, forgotten searches — all open, none finished. You wander. The tabs multiply.",
                image: "/zombie.png",
            },
            ArchetypeId::Lich => ArchetypeDef {
                base_title: "Lich",
                description: "You accumulate power but never release it. Carts filled, tools bookmarked, decisions deferred. Everything is collected. Nothing is committed.",
                image: "/lich.png",
            },
            ArchetypeId::Unburdened => ArchetypeDef {
                base_title: "The Unburdened",
                description: "Fewer than ten tabs. You travel light through the digital world — or you just got here. Either way, the graves are shallow.",
                image: "/theunburdened.png",
            },
            ArchetypeId::Mortab => ArchetypeDef {
                base_title: "Mor'tab the Unending",
                description: "You have crossed the threshold. A thousand tabs or more, all coexisting in impossible equilibrium. Not chaos — something older. You no longer manage tabs. They orbit you.",
                image: "/mortabtheunending.png",
            },
        }
    }

    pub fn base_title(self) -> &'static str {
        self.def().base_title
    }

    /// Overrides decided by tab count alone, never by the axis cube.
    pub fn is_override(self) -> bool {
        matches!(self, ArchetypeId::Unburdened | ArchetypeId::Mortab)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityProfile {
    pub archetype: ArchetypeId,
    pub title: String,
    pub description: String,
    pub image: String,
}

impl PersonalityProfile {
    fn new(archetype: ArchetypeId, title: String) -> Self {
        let def = archetype.def();
        PersonalityProfile {
            archetype,
            title,
            description: def.description.to_string(),
            image: def.image.to_string(),
        }
    }
}

/// The numbers behind a profile, for explaining how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersonalityBreakdown {
    pub dimensions: DimensionScores,
    pub axes: AxisScores,
    pub archetype: ArchetypeId,
}

pub fn volume_suffix(total_tabs: usize) -> &'static str {
    match total_tabs {
        500.. => "of the Endless Horde",
        250.. => "of the Horde",
        100.. => "of the Dark Legion",
        50.. => "of the Cult",
        _ => "of the Shadows",
    }
}

fn override_for(total_tabs: usize) -> Option<ArchetypeId> {
    if total_tabs < UNBURDENED_BELOW {
        Some(ArchetypeId::Unburdened)
    } else if total_tabs >= MORTAB_FROM {
        Some(ArchetypeId::Mortab)
    } else {
        None
    }
}

/// Map the three axes onto the archetype cube.
///
/// Deep+action+unresolved and broad+consumption+resolved are not expected
/// from real data, but values sitting on the 0.5 boundary can land there.
pub fn select_archetype(axes: &AxisScores, dims: &DimensionScores) -> ArchetypeId {
    let is_deep = axes.depth_breadth >= AXIS_THRESHOLD;
    let is_action = axes.consumption_action >= AXIS_THRESHOLD;
    let is_unresolved = axes.resolved_unresolved >= AXIS_THRESHOLD;

    match (is_deep, is_action, is_unresolved) {
        (true, false, false) => ArchetypeId::Necromancer,
        (true, true, false) => ArchetypeId::Warlock,
        (true, false, true) => ArchetypeId::Wraith,
        (false, true, false) => ArchetypeId::BoneCleric,
        (false, false, true) => ArchetypeId::Zombie,
        (false, true, true) => ArchetypeId::Lich,
        (true, true, true) => {
            if dims.reading_mass > dims.action_mass {
                ArchetypeId::Wraith
            } else {
                ArchetypeId::Lich
            }
        }
        (false, false, false) => {
            if dims.social_pull > SOCIAL_ZOMBIE_THRESHOLD {
                ArchetypeId::Zombie
            } else {
                ArchetypeId::Necromancer
            }
        }
    }
}

pub fn score_personality(input: &ScoringInput<'_>) -> PersonalityProfile {
    if let Some(archetype) = override_for(input.total_tabs) {
        return PersonalityProfile::new(archetype, archetype.base_title().to_string());
    }

    let dims = score_dimensions(input);
    let axes = map_to_axes(&dims);
    let archetype = select_archetype(&axes, &dims);
    let title = format!(
        "{} {}",
        archetype.base_title(),
        volume_suffix(input.total_tabs)
    );
    PersonalityProfile::new(archetype, title)
}

/// Dimensions and axes are computed even when a tab-count override decides
/// the archetype.
pub fn explain_personality(input: &ScoringInput<'_>) -> PersonalityBreakdown {
    let dimensions = score_dimensions(input);
    let axes = map_to_axes(&dimensions);
    let archetype =
        override_for(input.total_tabs).unwrap_or_else(|| select_archetype(&axes, &dimensions));
    PersonalityBreakdown {
        dimensions,
        axes,
        archetype,
    }
}
