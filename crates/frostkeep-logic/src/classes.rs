//! Playable classes and their attribute blocks.
//!
//! The class-selection screen lists [`classes()`]; picking one hands the
//! [`ClassData`] to the controller, which copies the attribute block into
//! the game state.
//!
//! ```
//! use frostkeep_logic::classes::{class_by_id, ClassType};
//!
//! let engineer = class_by_id("engineer").unwrap();
//! assert_eq!(engineer.id, ClassType::Engineer);
//! assert_eq!(engineer.attributes.engineering, 5);
//! assert!(class_by_id("pilot").is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::start::BASE_ATTRIBUTE;

/// The six character stats, each nominally in `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u8,
    pub intelligence: u8,
    pub charisma: u8,
    pub perception: u8,
    pub engineering: u8,
    pub luck: u8,
}

impl Attributes {
    pub const fn uniform(value: u8) -> Self {
        Self {
            strength: value,
            intelligence: value,
            charisma: value,
            perception: value,
            engineering: value,
            luck: value,
        }
    }

    /// Stats in display order, labelled.
    pub fn labelled(&self) -> [(&'static str, u8); 6] {
        [
            ("Strength", self.strength),
            ("Intelligence", self.intelligence),
            ("Charisma", self.charisma),
            ("Perception", self.perception),
            ("Engineering", self.engineering),
            ("Luck", self.luck),
        ]
    }

    pub fn total(&self) -> u32 {
        self.labelled().iter().map(|(_, v)| *v as u32).sum()
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(BASE_ATTRIBUTE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    Engineer,
    Diplomat,
    Sentinel,
    Botanist,
}

impl ClassType {
    pub const ALL: [ClassType; 4] = [
        ClassType::Engineer,
        ClassType::Diplomat,
        ClassType::Sentinel,
        ClassType::Botanist,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ClassType::Engineer => "engineer",
            ClassType::Diplomat => "diplomat",
            ClassType::Sentinel => "sentinel",
            ClassType::Botanist => "botanist",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn data(self) -> &'static ClassData {
        // CLASSES is ordered like ClassType::ALL
        &CLASSES[self as usize]
    }
}

/// A selectable class: identity, flavour text and attribute block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassData {
    pub id: ClassType,
    pub name: &'static str,
    pub description: &'static str,
    pub attributes: Attributes,
    pub bonus: &'static str,
    pub penalty: &'static str,
}

static CLASSES: [ClassData; 4] = [
    ClassData {
        id: ClassType::Engineer,
        name: "Engineer",
        description: "Construction and repair specialist. Keeps the base running in the worst conditions.",
        attributes: Attributes {
            strength: 3,
            intelligence: 4,
            charisma: 2,
            perception: 3,
            engineering: 5,
            luck: 3,
        },
        bonus: "+50% build speed, -25% repair cost",
        penalty: "-20% negotiation efficiency",
    },
    ClassData {
        id: ClassType::Diplomat,
        name: "Diplomat",
        description: "Master negotiator and people manager. Keeps morale high and settles disputes.",
        attributes: Attributes {
            strength: 2,
            intelligence: 4,
            charisma: 5,
            perception: 4,
            engineering: 2,
            luck: 3,
        },
        bonus: "+30% base morale, better trades",
        penalty: "-30% in direct combat",
    },
    ClassData {
        id: ClassType::Sentinel,
        name: "Sentinel",
        description: "Seasoned defender. Protects the base from raiders and predators.",
        attributes: Attributes {
            strength: 5,
            intelligence: 2,
            charisma: 2,
            perception: 5,
            engineering: 3,
            luck: 3,
        },
        bonus: "+40% defensive damage, early raid detection",
        penalty: "-25% efficiency on scientific tasks",
    },
    ClassData {
        id: ClassType::Botanist,
        name: "Botanist",
        description: "Cultivation and survival expert. Maximises food production.",
        attributes: Attributes {
            strength: 2,
            intelligence: 5,
            charisma: 3,
            perception: 4,
            engineering: 3,
            luck: 3,
        },
        bonus: "+40% food production, medicinal plants",
        penalty: "-20% build speed",
    },
];

/// All playable classes in selection-screen order.
pub fn classes() -> &'static [ClassData] {
    &CLASSES
}

/// Look up a class by its string id (`"engineer"`, `"diplomat"`, ...).
pub fn class_by_id(id: &str) -> Option<&'static ClassData> {
    ClassType::from_id(id).map(ClassType::data)
}
