//! Directional bilinear splat of a height change onto the grid.

use glam::{Vec2, Vec3};

use crate::geometry::direction_to_face_coordinates;
use crate::terrain::CubemapData;

/// Shares of a deposit over the 2x2 cells around a point, indexed
/// `[x][y]` with `0` the lower and `1` the upper cell index.
///
/// The corner ahead of the flow in both axes takes half, the two side cells
/// split the other half by the flow's x/y proportions and the trailing corner
/// takes nothing. A component counts as forward only when strictly positive,
/// so a zero component behaves like a negative one. A zero flow splits the
/// side shares evenly.
pub fn splat_weights(flow: Vec2, amount: f32) -> [[f32; 2]; 2] {
    let total = flow.x.abs() + flow.y.abs();
    let (wx, wy) = if total > 0.0 {
        (flow.x.abs() / total, flow.y.abs() / total)
    } else {
        (0.5, 0.5)
    };
    let lead_x = usize::from(flow.x > 0.0);
    let lead_y = usize::from(flow.y > 0.0);

    let mut weights = [[0.0; 2]; 2];
    weights[lead_x][lead_y] = 0.5 * amount;
    weights[lead_x][1 - lead_y] = 0.5 * amount * wx;
    weights[1 - lead_x][lead_y] = 0.5 * amount * wy;
    weights
}

/// Adds `amount` of height around sphere direction `position`, biased along
/// `flow` (expressed in the face's u/v axes).
///
/// Indices are clamped to the face; when clamping merges cells their shares
/// land on the same pixel, so the total added is always `amount`.
pub fn deposit(height: &mut CubemapData, position: Vec3, flow: Vec2, amount: f32) {
    let coord = direction_to_face_coordinates(position);
    let (i0, i1, j0, j1) = height.surrounding_cells(coord);
    let weights = splat_weights(flow, amount);
    let columns = [i0, i1];
    let rows = [j0, j1];
    for (x, column) in weights.iter().enumerate() {
        for (y, &share) in column.iter().enumerate() {
            if share != 0.0 {
                height.add_to_pixel(coord.face, columns[x], rows[y], 0, share);
            }
        }
    }
}
