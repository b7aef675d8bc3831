//! Validation for cross-references between content definitions.

use std::collections::HashSet;

use super::data::*;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub target_type: &'static str,
    pub missing_id: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' references missing {} '{}' in field '{}'",
            self.source_type, self.source_id, self.target_type, self.missing_id, self.field
        )
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for checking a reference exists
macro_rules! check_ref {
    ($errors:expr, $known:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$known.contains($ref_id) {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

fn coord_id(coord: (i32, i32)) -> String {
    format!("({}, {})", coord.0, coord.1)
}

/// Validate all cross-references between the floor layout and the registry.
/// Returns a list of validation errors, empty if all references are valid.
pub fn validate_floor(registry: &ContentRegistry, floor: &FloorDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let enemy_ids: HashSet<&str> = registry.enemies.keys().map(String::as_str).collect();
    let room_ids: HashSet<String> = floor.rooms.iter().map(|r| coord_id(r.coord)).collect();

    check_ref!(
        errors,
        room_ids,
        "Floor",
        "floor",
        "start_room",
        "Room",
        &coord_id(floor.start_room)
    );

    for room in &floor.rooms {
        let room_id = coord_id(room.coord);

        for template in &room.enemies {
            check_ref!(
                errors,
                enemy_ids,
                "Room",
                room_id,
                "enemies.kind",
                "Enemy",
                template.kind.as_str()
            );
        }

        // Every door must lead somewhere
        for direction in &room.doors {
            let target = room.grid_coord() + direction.offset();
            check_ref!(
                errors,
                room_ids,
                "Room",
                room_id,
                "doors",
                "Room",
                &coord_id((target.x, target.y))
            );
        }
    }

    errors
}
