//! Visible face detection over a column height field.
//!
//! A voxel is solid when its layer is below its column's height. A face is
//! visible when the cell across it is not solid: outside the map, above the
//! vertical extent, or above the neighbour column's height.

use rampart_terrain::HeightField;

use crate::face_direction::Face;
use crate::visible_faces::VisibleFaces;

/// Answers face visibility queries against the whole map.
///
/// Lookups cross chunk boundaries freely, so neighbouring chunks never leave
/// seams or duplicate faces between them.
#[derive(Clone, Copy, Debug)]
pub struct FaceVisibility<'a> {
    field: &'a HeightField,
    emit_floor_faces: bool,
}

impl<'a> FaceVisibility<'a> {
    /// With `emit_floor_faces` unset, the bottom of layer 0 is treated as
    /// resting on covered ground.
    pub fn new(field: &'a HeightField, emit_floor_faces: bool) -> Self {
        Self {
            field,
            emit_floor_faces,
        }
    }

    /// Returns `true` if the voxel at `(x, y, z)` is solid.
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        if y < 0 {
            return !self.emit_floor_faces;
        }
        if y >= self.field.max_height() as i32 {
            return false;
        }
        match self.field.column(x, z) {
            Some(height) => y < height as i32,
            None => false,
        }
    }

    /// Visible faces of the solid voxel at `(x, y, z)`.
    pub fn visible_faces(&self, x: i32, y: i32, z: i32) -> VisibleFaces {
        let mut faces = VisibleFaces::NONE;
        for face in Face::ALL {
            let (nx, ny, nz) = face.offset(x, y, z);
            if !self.is_solid(nx, ny, nz) {
                faces.set_visible(face);
            }
        }
        faces
    }
}

/// Total visible faces over every solid voxel in the map.
pub fn count_visible_faces(field: &HeightField, emit_floor_faces: bool) -> u32 {
    let visibility = FaceVisibility::new(field, emit_floor_faces);
    let mut total = 0;
    for z in 0..field.depth() as i32 {
        for x in 0..field.width() as i32 {
            for y in 0..field.get(x, z) as i32 {
                total += visibility.visible_faces(x, y, z).count();
            }
        }
    }
    total
}
