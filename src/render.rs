//! Presentation helpers: tile upscaling, light markers and PPM snapshots

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::color::unpack;
use crate::grid::Grid;
use crate::light::LightRegistry;

/// Draw each buffer entry as a `scale x scale` block of window pixels.
///
/// `out` must hold `width * scale * height * scale` pixels; `convert` maps
/// a packed color to the window's pixel format.
pub fn blit_scaled(buffer: &PixelBuffer, scale: usize, out: &mut [u32], convert: impl Fn(u32) -> u32) {
    let out_width = buffer.width() * scale;
    debug_assert_eq!(out.len(), out_width * buffer.height() * scale);

    for (gy, row) in buffer.pixels().chunks(buffer.width()).enumerate() {
        let py = gy * scale;
        // Build one scaled scanline, then copy it down the block
        let line_start = py * out_width;
        for (gx, &packed) in row.iter().enumerate() {
            let color = convert(packed);
            let start = line_start + gx * scale;
            out[start..start + scale].fill(color);
        }
        for sy in 1..scale {
            out.copy_within(line_start..line_start + out_width, (py + sy) * out_width);
        }
    }
}

/// Paint `marker` over the cell of every light inside the grid.
pub fn mark_lights(buffer: &mut PixelBuffer, grid: &Grid, lights: &LightRegistry, marker: u32) {
    for light in lights.iter() {
        if let Some((x, y)) = light.cell(grid) {
            buffer.set(x, y, marker);
        }
    }
}

/// Save a buffer to an ASCII PPM file, each cell as a `scale x scale` block
pub fn save_ppm(buffer: &PixelBuffer, path: impl AsRef<Path>, scale: usize) -> io::Result<()> {
    let path = path.as_ref();
    let scale = scale.max(1);
    let img_width = buffer.width() * scale;
    let img_height = buffer.height() * scale;

    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "P3")?;
    writeln!(file, "{} {}", img_width, img_height)?;
    writeln!(file, "255")?;

    for img_y in 0..img_height {
        for img_x in 0..img_width {
            let [r, g, b, _] = unpack(buffer.pixels()[(img_y / scale) * buffer.width() + img_x / scale]);
            write!(file, "{} {} {} ", r, g, b)?;
        }
        writeln!(file)?;
    }
    file.flush()?;

    log::info!("Wrote {}x{} snapshot to {}", img_width, img_height, path.display());
    Ok(())
}

/// Converts a buffer to a formatted string of RGB bytes for debugging
pub fn buffer_to_string(buffer: &PixelBuffer) -> String {
    let mut result = String::new();
    for row in buffer.pixels().chunks(buffer.width()) {
        for &packed in row {
            let [r, g, b, _] = unpack(packed);
            result.push_str(&format!("({:3},{:3},{:3}) ", r, g, b));
        }
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{LIGHT_MARKER, pack_bytes, to_0rgb};
    use crate::light::Light;

    #[test]
    fn test_blit_scaled() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(0, 0, pack_bytes(255, 0, 0, 255));
        buffer.set(1, 0, pack_bytes(0, 0, 255, 255));

        let mut out = vec![0u32; 2 * 3 * 3];
        blit_scaled(&buffer, 3, &mut out, to_0rgb);

        let red = 0x00FF_0000;
        let blue = 0x0000_00FF;
        for row in out.chunks(6) {
            assert_eq!(row, &[red, red, red, blue, blue, blue]);
        }
    }

    #[test]
    fn test_mark_lights() {
        let grid = Grid::new(3, 3).unwrap();
        let lights: LightRegistry = [Light::white((1.2, 0.9)), Light::white((8.0, 8.0))]
            .into_iter()
            .collect();
        let mut buffer = PixelBuffer::new(3, 3);
        mark_lights(&mut buffer, &grid, &lights, LIGHT_MARKER);

        assert_eq!(buffer.get(1, 1), Some(LIGHT_MARKER));
        assert_eq!(buffer.pixels().iter().filter(|&&p| p == LIGHT_MARKER).count(), 1);
    }

    #[test]
    fn test_save_ppm() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(1, 0, pack_bytes(9, 8, 7, 255));
        let path = std::env::temp_dir().join(format!("tilelight-snapshot-{}.ppm", std::process::id()));
        save_ppm(&buffer, &path, 2).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..3], &["P3", "4 2", "255"]);
        assert_eq!(lines[3].trim_end(), "0 0 0 0 0 0 9 8 7 9 8 7");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_buffer_to_string() {
        let buffer = PixelBuffer::new(2, 2);
        let text = buffer_to_string(&buffer);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("(  0,  0,  0)"));
    }
}
