//! Static town geometry
//!
//! Buildings are boxes sitting on the ground plane. The visual meshes are
//! built by the presentation layer; the simulation only sees an anchor,
//! a footprint, and a dirt level.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_DIRT;
use crate::tuning::ConfigError;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box standing on `anchor` (ground center) with full extents `size`
    pub fn from_anchor_size(anchor: Vec3, size: Vec3) -> Self {
        let half = Vec3::new(size.x * 0.5, 0.0, size.z * 0.5);
        Self::new(anchor - half, anchor + half + Vec3::new(0.0, size.y, 0.0))
    }

    /// Closest point of the box to `p` (p itself when inside)
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }
}

/// Building archetypes
///
/// Each archetype only differs in its default footprint here; the mesh
/// construction per archetype lives in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    House,
    Shop,
    Tower,
    Church,
    Warehouse,
    Cafe,
}

impl BuildingKind {
    /// Default full extents (width, height, depth)
    pub fn size(&self) -> Vec3 {
        match self {
            BuildingKind::House => Vec3::new(6.0, 5.0, 6.0),
            BuildingKind::Shop => Vec3::new(8.0, 4.0, 6.0),
            BuildingKind::Tower => Vec3::new(5.0, 16.0, 5.0),
            BuildingKind::Church => Vec3::new(7.0, 12.0, 12.0),
            BuildingKind::Warehouse => Vec3::new(12.0, 6.0, 9.0),
            BuildingKind::Cafe => Vec3::new(6.0, 4.0, 5.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingKind::House => "house",
            BuildingKind::Shop => "shop",
            BuildingKind::Tower => "tower",
            BuildingKind::Church => "church",
            BuildingKind::Warehouse => "warehouse",
            BuildingKind::Cafe => "cafe",
        }
    }
}

/// A building in the town
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub kind: BuildingKind,
    /// Ground-center position
    pub anchor: Vec3,
    /// Full extents (width, height, depth)
    pub size: Vec3,
    dirt: f32,
}

impl Building {
    pub fn new(id: u32, kind: BuildingKind, anchor: Vec3) -> Self {
        Self::with_size(id, kind, anchor, kind.size())
    }

    pub fn with_size(id: u32, kind: BuildingKind, anchor: Vec3, size: Vec3) -> Self {
        Self {
            id,
            kind,
            anchor,
            size: size.abs(),
            dirt: MAX_DIRT,
        }
    }

    /// Bounding box, recomputed from anchor and size
    pub fn bounding_volume(&self) -> Aabb {
        Aabb::from_anchor_size(self.anchor, self.size)
    }

    /// Scrub some dirt off (never below zero)
    pub fn clean(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.dirt = (self.dirt - amount).clamp(0.0, MAX_DIRT);
    }

    #[inline]
    pub fn dirt_level(&self) -> f32 {
        self.dirt
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.dirt <= 0.0
    }
}

/// Layout entry used when loading a custom town from JSON
#[derive(Debug, Clone, Deserialize)]
struct LayoutEntry {
    kind: BuildingKind,
    anchor: Vec3,
    #[serde(default)]
    size: Option<Vec3>,
}

/// The static set of buildings
#[derive(Debug, Clone, Default)]
pub struct WorldModel {
    buildings: Vec<Building>,
}

impl WorldModel {
    pub fn new(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    /// Load a town from `[{ "kind": "house", "anchor": [x, y, z], "size": [w, h, d]? }]`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<LayoutEntry> = serde_json::from_str(json)?;
        let mut buildings = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let size = entry.size.unwrap_or_else(|| entry.kind.size());
            if size.cmple(Vec3::ZERO).any() {
                return Err(ConfigError::Invalid(format!(
                    "building {i} ({}) has a non-positive size",
                    entry.kind.as_str()
                )));
            }
            buildings.push(Building::with_size(i as u32 + 1, entry.kind, entry.anchor, size));
        }
        Ok(Self::new(buildings))
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn buildings_mut(&mut self) -> &mut [Building] {
        &mut self.buildings
    }

    pub fn building(&self, id: u32) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// First building (in iteration order) whose box touches the sphere
    pub fn first_intersecting(&self, center: Vec3, radius: f32) -> Option<&Building> {
        self.buildings.iter().find(|b| {
            super::collision::sphere_intersects_aabb(center, radius, &b.bounding_volume())
        })
    }

    pub fn cleaned_count(&self) -> usize {
        self.buildings.iter().filter(|b| b.is_clean()).count()
    }

    pub fn all_clean(&self) -> bool {
        !self.buildings.is_empty() && self.buildings.iter().all(Building::is_clean)
    }
}

/// The default town: two streets of mixed buildings along the Z axis
pub fn town_layout() -> WorldModel {
    use BuildingKind::*;

    const STREET_OFFSET: f32 = 14.0;
    const LOT_SPACING: f32 = 18.0;

    let west = [House, Shop, Church, Cafe];
    let east = [Tower, House, Warehouse, Shop];

    let mut buildings = Vec::with_capacity(west.len() + east.len());
    let mut id = 1;
    for (row, kinds) in [(-STREET_OFFSET, west), (STREET_OFFSET, east)] {
        for (lot, kind) in kinds.into_iter().enumerate() {
            let z = -(lot as f32) * LOT_SPACING - 10.0;
            // Push wide buildings back so the street stays clear
            let x = row + row.signum() * kind.size().x * 0.5;
            buildings.push(Building::new(id, kind, Vec3::new(x, 0.0, z)));
            id += 1;
        }
    }

    log::info!("Town built with {} buildings", buildings.len());
    WorldModel::new(buildings)
}

/// Logo placements for the default town, floating above the street
pub fn default_collectibles() -> Vec<super::collection::Collectible> {
    use super::collection::Collectible;

    let spots = [
        (Vec3::new(0.0, 4.0, -12.0), "Sponsor: Bright Windows Co."),
        (Vec3::new(-6.0, 6.0, -30.0), "Sponsor: Sudsy Soap Works"),
        (Vec3::new(5.0, 3.5, -46.0), "Sponsor: Town Hall Recycling"),
        (Vec3::new(-3.0, 8.0, -62.0), "Sponsor: Clear Skies Drones"),
        (Vec3::new(4.0, 5.0, -75.0), "Sponsor: Fresh Coat Painters"),
    ];

    spots
        .into_iter()
        .enumerate()
        .map(|(i, (pos, info))| Collectible::new(i as u32 + 1, pos, info))
        .collect()
}
