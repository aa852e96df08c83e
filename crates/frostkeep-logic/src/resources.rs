//! Base stockpile — food, materials, fuel, water.
//!
//! Values are plain integers. The 0..=100 range is a display convention
//! only; nothing here clamps them.

use serde::{Deserialize, Serialize};

use crate::constants::{gauges::RESOURCE_DISPLAY_MAX, start};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Food,
    Materials,
    Fuel,
    Water,
}

impl ResourceKind {
    /// HUD order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Food,
        ResourceKind::Materials,
        ResourceKind::Fuel,
        ResourceKind::Water,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Food => "Food",
            ResourceKind::Materials => "Materials",
            ResourceKind::Fuel => "Fuel",
            ResourceKind::Water => "Water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub food: i32,
    pub materials: i32,
    pub fuel: i32,
    pub water: i32,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            food: start::FOOD,
            materials: start::MATERIALS,
            fuel: start::FUEL,
            water: start::WATER,
        }
    }
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Materials => self.materials,
            ResourceKind::Fuel => self.fuel,
            ResourceKind::Water => self.water,
        }
    }

    /// Field-wise overwrite: fields absent from `update` keep their value.
    pub fn merge(&mut self, update: &ResourceUpdate) {
        if let Some(food) = update.food {
            self.food = food;
        }
        if let Some(materials) = update.materials {
            self.materials = materials;
        }
        if let Some(fuel) = update.fuel {
            self.fuel = fuel;
        }
        if let Some(water) = update.water {
            self.water = water;
        }
    }

    /// Iterate in HUD order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, i32)> + '_ {
        ResourceKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

/// A partial resource update. Built with the chained setters:
///
/// ```
/// use frostkeep_logic::resources::{ResourceUpdate, Resources};
///
/// let mut stock = Resources::default();
/// stock.merge(&ResourceUpdate::default().food(10).water(75));
/// assert_eq!((stock.food, stock.materials, stock.water), (10, 30, 75));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<i32>,
}

impl ResourceUpdate {
    pub fn food(mut self, value: i32) -> Self {
        self.food = Some(value);
        self
    }
    pub fn materials(mut self, value: i32) -> Self {
        self.materials = Some(value);
        self
    }
    pub fn fuel(mut self, value: i32) -> Self {
        self.fuel = Some(value);
        self
    }
    pub fn water(mut self, value: i32) -> Self {
        self.water = Some(value);
        self
    }

    pub fn set(mut self, kind: ResourceKind, value: i32) -> Self {
        match kind {
            ResourceKind::Food => self.food = Some(value),
            ResourceKind::Materials => self.materials = Some(value),
            ResourceKind::Fuel => self.fuel = Some(value),
            ResourceKind::Water => self.water = Some(value),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.food.is_none() && self.materials.is_none() && self.fuel.is_none() && self.water.is_none()
    }
}

/// Fraction of a resource bar to fill: `min(100, value) / 100`, never below 0.
pub fn bar_fill(value: i32) -> f32 {
    value.clamp(0, RESOURCE_DISPLAY_MAX) as f32 / RESOURCE_DISPLAY_MAX as f32
}
