//! What the server sends back about an area.
//!
//! The cache doesn't look inside any of this; it checks which area an update is for and passes it on to the
//! render layer.
use derive_more::Display;
use serde::{Deserialize, Serialize};

use isostream_grid::{AreaId, V2};

use crate::*;

/// Server-assigned identity of one thing on the map.
#[derive(
    Copy, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContentId(pub u64);

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: ContentId,
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub level: u32,
    /// Opaque player id.  Ownership rules live elsewhere.
    #[serde(default)]
    pub owner: Option<u64>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: ContentId,
    pub x: i32,
    pub y: i32,
    pub kind: String,
    pub level: u32,
    #[serde(default)]
    pub owner: Option<u64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Food,
    Wood,
    Stone,
    Iron,
    Gold,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourcePoint {
    pub id: ContentId,
    pub x: i32,
    pub y: i32,
    pub resource: ResourceKind,
    pub remaining: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AreaContent {
    City(City),
    Building(Building),
    ResourcePoint(ResourcePoint),
}

impl AreaContent {
    pub fn id(&self) -> ContentId {
        match self {
            AreaContent::City(c) => c.id,
            AreaContent::Building(b) => b.id,
            AreaContent::ResourcePoint(r) => r.id,
        }
    }

    /// The cell this thing stands on.
    pub fn cell(&self) -> V2<i32> {
        match self {
            AreaContent::City(c) => V2::new(c.x, c.y),
            AreaContent::Building(b) => V2::new(b.x, b.y),
            AreaContent::ResourcePoint(r) => V2::new(r.x, r.y),
        }
    }
}

/// One response's worth of changes to an area.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AreaContentUpdate {
    pub area: AreaId,
    #[serde(default)]
    pub added: Vec<AreaContent>,
    #[serde(default)]
    pub removed: Vec<ContentId>,
    #[serde(default)]
    pub updated: Vec<AreaContent>,
}

impl AreaContentUpdate {
    pub fn from_json_str(input: &str) -> Result<AreaContentUpdate> {
        Ok(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_decode_tagged_content() -> Result<()> {
        let update = AreaContentUpdate::from_json_str(
            r#"{
                "area": 14,
                "added": [
                    {"kind": "city", "id": 7, "x": 17, "y": 9, "name": "Harrow", "level": 3, "owner": 42},
                    {"kind": "resource_point", "id": 8, "x": 18, "y": 12, "resource": "iron", "remaining": 5000}
                ],
                "removed": [99]
            }"#,
        )?;

        assert_eq!(update.area, AreaId(14));
        assert_eq!(update.removed, vec![ContentId(99)]);
        assert!(update.updated.is_empty());
        assert_eq!(
            update.added[0],
            AreaContent::City(City {
                id: ContentId(7),
                x: 17,
                y: 9,
                name: "Harrow".into(),
                level: 3,
                owner: Some(42),
            })
        );
        assert_eq!(update.added[1].id(), ContentId(8));
        assert_eq!(update.added[1].cell(), V2::new(18, 12));
        Ok(())
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        assert!(matches!(
            AreaContentUpdate::from_json_str(r#"{"area": 1, "added": [{"kind": "army", "id": 1}]}"#),
            Err(StreamingError::Parse(_))
        ));
    }
}
