/// RGB colour helpers
use nalgebra::Vector3;

/// Linear RGB with channels nominally in [0, 1]
pub type Rgb = Vector3<f32>;

pub const WHITE: Rgb = Vector3::new(1.0, 1.0, 1.0);

/// Clamp every channel to [0, 1].
pub fn clamp(color: Rgb) -> Rgb {
    color.map(|c| c.clamp(0.0, 1.0))
}

/// Quantize a colour to 8 bits per channel.
pub fn to_rgb8(color: &Rgb) -> [u8; 3] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color.x), q(color.y), q(color.z)]
}

pub fn from_rgb8(rgb: [u8; 3]) -> Rgb {
    Vector3::new(rgb[0], rgb[1], rgb[2]).map(|c| c as f32 / 255.0)
}
