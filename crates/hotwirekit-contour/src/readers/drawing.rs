//! DXF drawing reader
//!
//! Only LINE and LWPOLYLINE entities are understood. Any other entity kind
//! aborts the import.

use crate::error::{ContourError, ContourResult};
use crate::primitive::PathPrimitive;
use dxf::entities::EntityType;
use dxf::Drawing;
use hotwirekit_core::Point2D;
use std::fs::File;
use std::path::Path;

/// Convert the entities of a drawing into primitives
pub fn primitives_from_drawing(drawing: &Drawing) -> ContourResult<Vec<PathPrimitive>> {
    let mut primitives = Vec::new();
    for entity in drawing.entities() {
        match &entity.specific {
            EntityType::Line(line) => primitives.push(PathPrimitive::line(
                (line.p1.x, line.p1.y),
                (line.p2.x, line.p2.y),
            )),
            EntityType::LwPolyline(polyline) => {
                let points = polyline
                    .vertices
                    .iter()
                    .map(|v| Point2D::new(v.x, v.y))
                    .collect();
                if let Some(p) = PathPrimitive::polyline(points) {
                    primitives.push(p);
                }
            }
            other => return Err(ContourError::UnsupportedEntity(entity_kind(other))),
        }
    }

    if primitives.is_empty() {
        return Err(ContourError::EmptyInput(
            "drawing has no line or polyline entities".to_string(),
        ));
    }
    tracing::debug!(count = primitives.len(), "read drawing primitives");
    Ok(primitives)
}

/// Load a DXF file and convert its entities
pub fn load_dxf(path: &Path) -> ContourResult<Vec<PathPrimitive>> {
    let mut file = File::open(path)?;
    let drawing = Drawing::load(&mut file).map_err(|e| ContourError::Dxf(e.to_string()))?;
    primitives_from_drawing(&drawing)
}

/// Variant name of an entity, e.g. `Circle`
fn entity_kind(specific: &EntityType) -> String {
    let debug = format!("{:?}", specific);
    debug
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_string()
}
