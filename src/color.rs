//! Color packing
//!
//! Packed colors are `u32` words with one byte per channel:
//!
//! | bits  | channel |
//! |-------|---------|
//! | 0-7   | red     |
//! | 8-15  | green   |
//! | 16-23 | blue    |
//! | 24-31 | alpha   |
//!
//! This is the ABGR8888 word layout: on a little-endian target the bytes of
//! a packed buffer read R, G, B, A in memory, which is what an `Rgba8Unorm`
//! texture expects. Anything that wants another layout (e.g. `minifb`'s
//! `0x00RRGGBB`) must go through an explicit conversion such as [`to_0rgb`].

pub const RED_SHIFT: u32 = 0;
pub const GREEN_SHIFT: u32 = 8;
pub const BLUE_SHIFT: u32 = 16;
pub const ALPHA_SHIFT: u32 = 24;

/// Opaque black, the color of an unlit cell
pub const OPAQUE_BLACK: u32 = 0xFF00_0000;

/// Flat gray used for wall cells
pub const WALL_COLOR: u32 = pack_bytes(0x80, 0x80, 0x80, 0xFF);

/// Marker drawn over the cell a light sits in
pub const LIGHT_MARKER: u32 = pack_bytes(0xFF, 0xFF, 0xFF, 0xFF);

/// RGBA color with floating point components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBA {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RGBA {
    pub fn black() -> Self {
        RGBA { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    /// Add `color * weight` to the RGB channels, leaving alpha alone.
    #[inline]
    pub fn accumulate(&mut self, color: (f32, f32, f32), weight: f32) {
        self.r += color.0 * weight;
        self.g += color.1 * weight;
        self.b += color.2 * weight;
    }

    /// Clamp every channel to `[0, 1]`.
    pub fn clamped(self) -> Self {
        RGBA {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn pack(self) -> u32 {
        pack(self.r, self.g, self.b, self.a)
    }
}

/// Convert a float value (0.0-1.0) to a byte (0-255), truncating
#[inline]
pub fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Pack four `[0, 1]` channels. Out-of-range values saturate.
#[inline]
pub fn pack(r: f32, g: f32, b: f32, a: f32) -> u32 {
    pack_bytes(to_byte(r), to_byte(g), to_byte(b), to_byte(a))
}

#[inline]
pub const fn pack_bytes(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << RED_SHIFT | (g as u32) << GREEN_SHIFT | (b as u32) << BLUE_SHIFT | (a as u32) << ALPHA_SHIFT
}

/// Split a packed color into `[r, g, b, a]` bytes.
#[inline]
pub const fn unpack(packed: u32) -> [u8; 4] {
    [
        (packed >> RED_SHIFT) as u8,
        (packed >> GREEN_SHIFT) as u8,
        (packed >> BLUE_SHIFT) as u8,
        (packed >> ALPHA_SHIFT) as u8,
    ]
}

/// Reorder a packed color into `0x00RRGGBB` (the `minifb` window format).
#[inline]
pub const fn to_0rgb(packed: u32) -> u32 {
    let [r, g, b, _] = unpack(packed);
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_layout() {
        assert_eq!(pack_bytes(0x11, 0x22, 0x33, 0x44), 0x4433_2211);
        assert_eq!(unpack(0x4433_2211), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(pack(0.0, 0.0, 0.0, 1.0), OPAQUE_BLACK);
        assert_eq!(unpack(WALL_COLOR), [128, 128, 128, 255]);
    }

    #[test]
    fn test_pack_truncates() {
        // 0.999 * 255 = 254.745 -> 254, not 255
        assert_eq!(unpack(pack(0.999, 0.5, 0.002, 1.0)), [254, 127, 0, 255]);
    }

    #[test]
    fn test_pack_saturates_out_of_range() {
        assert_eq!(unpack(pack(7.5, -1.0, 1.0, 1.0)), [255, 0, 255, 255]);
    }

    #[test]
    fn test_rgba_accumulate_and_clamp() {
        let mut color = RGBA::black();
        color.accumulate((1.0, 0.5, 0.0), 0.5);
        color.accumulate((1.0, 1.0, 0.0), 0.75);
        assert_eq!((color.r, color.g, color.b, color.a), (1.25, 1.0, 0.0, 1.0));

        let clamped = color.clamped();
        assert_eq!((clamped.r, clamped.g), (1.0, 1.0));
        assert_eq!(unpack(clamped.pack()), [255, 255, 0, 255]);
    }

    #[test]
    fn test_to_0rgb() {
        assert_eq!(to_0rgb(pack_bytes(0x12, 0x34, 0x56, 0xFF)), 0x0012_3456);
        assert_eq!(to_0rgb(OPAQUE_BLACK), 0);
    }
}
