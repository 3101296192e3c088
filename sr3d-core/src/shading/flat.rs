/// Solid fill with the mean vertex colour
use nalgebra::Vector2;

use crate::canvas::Canvas;
use crate::color::Rgb;

/// Signed doubled area of `(a, b, p)`; its sign tells which side of `a → b` `p` is on.
fn edge(a: &Vector2<f32>, b: &Vector2<f32>, p: &Vector2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Whether `p` lies inside the closed triangle, for either winding.
pub fn contains(vertices: &[Vector2<f32>; 3], p: &Vector2<f32>) -> bool {
    let [a, b, c] = vertices;
    let d = [edge(a, b, p), edge(b, c, p), edge(c, a, p)];
    let has_neg = d.iter().any(|&e| e < 0.0);
    let has_pos = d.iter().any(|&e| e > 0.0);
    !(has_neg && has_pos)
}

/// Fill the triangle with the average of `colors`.
///
/// Every integer pixel position in the triangle's bounding box (clipped to the
/// canvas) is tested against the three edge functions.
pub fn shade(canvas: &mut Canvas, vertices: &[Vector2<f32>; 3], colors: &[Rgb; 3]) {
    if canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    let color = (colors[0] + colors[1] + colors[2]) / 3.0;

    let xs = vertices.map(|v| v.x);
    let ys = vertices.map(|v| v.y);
    let last_x = (canvas.width() - 1) as f32;
    let last_y = (canvas.height() - 1) as f32;
    let min_x = xs.iter().copied().fold(f32::INFINITY, f32::min).floor().max(0.0);
    let max_x = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max).ceil().min(last_x);
    let min_y = ys.iter().copied().fold(f32::INFINITY, f32::min).floor().max(0.0);
    let max_y = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max).ceil().min(last_y);
    if !(min_x <= max_x && min_y <= max_y) {
        return;
    }

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            if contains(vertices, &Vector2::new(x as f32, y as f32)) {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn rgb_triangle() -> ([Vector2<f32>; 3], [Rgb; 3]) {
        (
            [Vector2::new(20.0, 20.0), Vector2::new(80.0, 20.0), Vector2::new(50.0, 80.0)],
            [Vector3::x(), Vector3::y(), Vector3::z()],
        )
    }

    #[test]
    fn test_contains_either_winding() {
        let (tri, _) = rgb_triangle();
        let reversed = [tri[2], tri[1], tri[0]];
        for t in [tri, reversed] {
            assert!(contains(&t, &Vector2::new(50.0, 40.0)));
            // on an edge and on a vertex
            assert!(contains(&t, &Vector2::new(50.0, 20.0)));
            assert!(contains(&t, &Vector2::new(80.0, 20.0)));
            assert!(!contains(&t, &Vector2::new(10.0, 10.0)));
            assert!(!contains(&t, &Vector2::new(50.0, 81.0)));
        }
    }

    #[test]
    fn test_interior_gets_mean_color() {
        let (tri, colors) = rgb_triangle();
        let mut canvas = Canvas::new(100, 100);
        shade(&mut canvas, &tri, &colors);

        let third = Vector3::repeat(1.0 / 3.0);
        for (x, y) in [(50, 40), (25, 21), (75, 21), (50, 79)] {
            assert_relative_eq!(canvas.pixel(x, y), third, epsilon = 1e-6);
        }
        for (x, y) in [(0, 0), (19, 20), (81, 20), (50, 81), (30, 60)] {
            assert_eq!(canvas.pixel(x, y), WHITE);
        }
    }

    #[test]
    fn test_clips_to_canvas() {
        let mut canvas = Canvas::new(10, 10);
        let tri = [Vector2::new(-50.0, -50.0), Vector2::new(50.0, -50.0), Vector2::new(0.0, 50.0)];
        shade(&mut canvas, &tri, &[Vector3::zeros(); 3]);
        // the triangle covers the whole canvas
        assert!(canvas.pixels().iter().all(|p| *p == Vector3::zeros()));
    }
}
