/// Scanline edge walk shared by the interpolating shaders
use std::ops::{Add, Mul};

use nalgebra::Vector2;

use crate::canvas::Canvas;
use crate::interp::{interp, Axis};

/// Walk the rows covered by a triangle, interpolating `attributes` per pixel.
///
/// Vertices are sorted by Y. Each row meets the long edge (top → bottom) and the
/// short edge (top → middle, then middle → bottom once the row passes the middle
/// vertex); position and attributes are interpolated along Y on both, and then
/// along X between the two boundary points. `plot` receives every pixel from
/// `floor(left)` to `ceil(right)` inside the canvas, so attributes just outside
/// the triangle may be extrapolated.
pub(crate) fn scan<A, F>(
    canvas: &mut Canvas,
    vertices: &[Vector2<f32>; 3],
    attributes: &[A; 3],
    mut plot: F,
) where
    A: Copy + Add<Output = A> + Mul<f32, Output = A>,
    F: FnMut(&mut Canvas, usize, usize, A),
{
    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    let max_x = (canvas.width() - 1) as f32;
    let max_y = (canvas.height() - 1) as f32;

    let mut order = [0, 1, 2];
    order.sort_by(|&a, &b| vertices[a].y.total_cmp(&vertices[b].y));
    let [c1, c2, c3] = order.map(|i| vertices[i]);
    let [a1, a2, a3] = order.map(|i| attributes[i]);

    let y_min = c1.y.floor().max(0.0);
    let y_max = c3.y.ceil().min(max_y);
    if !(y_min <= y_max) {
        return;
    }

    for y in y_min as usize..=y_max as usize {
        let row = y as f32;

        let (mut left, mut left_attr) = if row < c2.y {
            (
                interp(&c1, &c2, c1, c2, row, Axis::Y),
                interp(&c1, &c2, a1, a2, row, Axis::Y),
            )
        } else {
            (
                interp(&c2, &c3, c2, c3, row, Axis::Y),
                interp(&c2, &c3, a2, a3, row, Axis::Y),
            )
        };
        let mut right = interp(&c1, &c3, c1, c3, row, Axis::Y);
        let mut right_attr = interp(&c1, &c3, a1, a3, row, Axis::Y);

        if left.x > right.x {
            std::mem::swap(&mut left, &mut right);
            std::mem::swap(&mut left_attr, &mut right_attr);
        }

        let x_min = left.x.floor().max(0.0);
        let x_max = right.x.ceil().min(max_x);
        if !(x_min <= x_max) {
            continue;
        }

        for x in x_min as usize..=x_max as usize {
            let attr = interp(&left, &right, left_attr, right_attr, x as f32, Axis::X);
            plot(canvas, x, y, attr);
        }
    }
}
