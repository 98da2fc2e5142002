//! Tests for the lighting system

use crate::color::{OPAQUE_BLACK, WALL_COLOR, unpack};
use crate::{
    CellKind, Compositor, Grid, InverseQuadratic, Light, LightRegistry, buffer_to_string, compute_buffer, is_occluded,
    parse_level,
};

fn lights(list: &[Light]) -> LightRegistry {
    list.iter().copied().collect()
}

#[test]
fn test_example_3x3_white_light() {
    // Cell (0,0) is sqrt(2) from the light: 1 / (1 + 0.1*1.414 + 0.1*2) = 0.7455
    let grid = Grid::new(3, 3).unwrap();
    let buffer = compute_buffer(&grid, &lights(&[Light::white((1.0, 1.0))]));

    println!("3x3 buffer:\n{}", buffer_to_string(&buffer));

    assert_eq!(buffer.rgba(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(buffer.rgba(0, 0), Some([190, 190, 190, 255]));
    assert_eq!(buffer.rgba(2, 2), Some([190, 190, 190, 255]));
    // Orthogonal neighbours at distance 1: 1 / 1.2 = 0.8333 -> 212
    assert_eq!(buffer.rgba(1, 0), Some([212, 212, 212, 255]));
    assert_eq!(buffer.rgba(2, 1), Some([212, 212, 212, 255]));
}

#[test]
fn test_colored_light_at_source() {
    let grid = Grid::new(5, 5).unwrap();
    let buffer = compute_buffer(&grid, &lights(&[Light::new((2.0, 2.0), (1.0, 0.0, 0.0))]));
    assert_eq!(buffer.rgba(2, 2), Some([255, 0, 0, 255]));

    // Orange torch
    let buffer = compute_buffer(&grid, &lights(&[Light::new((2.0, 2.0), (1.0, 0.6, 0.2))]));
    assert_eq!(buffer.rgba(2, 2), Some([255, 153, 51, 255]));
}

#[test]
fn test_two_lights_accumulate_independently() {
    // Red and green at distance 1 either side of (1,1)
    let grid = Grid::new(3, 3).unwrap();
    let red = Light::new((0.0, 1.0), (1.0, 0.0, 0.0));
    let green = Light::new((2.0, 1.0), (0.0, 1.0, 0.0));

    let both = compute_buffer(&grid, &lights(&[red, green]));
    let red_only = compute_buffer(&grid, &lights(&[red]));
    let green_only = compute_buffer(&grid, &lights(&[green]));

    let [r, g, b, a] = both.rgba(1, 1).unwrap();
    println!("Center color: R={}, G={}, B={}", r, g, b);
    assert!(r > 0 && g > 0, "Should have red and green components");
    assert_eq!(r, red_only.rgba(1, 1).unwrap()[0]);
    assert_eq!(g, green_only.rgba(1, 1).unwrap()[1]);
    assert_eq!((r, g, b, a), (212, 212, 0, 255));
}

#[test]
fn test_accumulation_clamps() {
    let grid = Grid::new(3, 3).unwrap();
    let many: Vec<Light> = (0..10).map(|_| Light::white((1.0, 1.0))).collect();
    let buffer = compute_buffer(&grid, &lights(&many));

    assert_eq!(buffer.rgba(1, 1), Some([255, 255, 255, 255]));
    // Ten lights at distance 1 also saturate instead of wrapping
    assert_eq!(buffer.rgba(0, 1), Some([255, 255, 255, 255]));
}

#[test]
fn test_empty_registry_is_black() {
    let grid = parse_level("#####\n#...#\n#.#.#\n#####\n").unwrap();
    let buffer = compute_buffer(&grid, &LightRegistry::new());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let expected = if grid.is_wall(x, y) { WALL_COLOR } else { OPAQUE_BLACK };
            assert_eq!(buffer.get(x, y), Some(expected));
        }
    }
}

#[test]
fn test_light_inside_wall_is_dark() {
    let mut grid = Grid::new(5, 5).unwrap();
    grid.set(2, 2, CellKind::Wall);
    let buffer = compute_buffer(&grid, &lights(&[Light::white((2.0, 2.0))]));

    assert_eq!(buffer.get(2, 2), Some(WALL_COLOR));
    assert!(
        buffer.pixels().iter().all(|&p| p == OPAQUE_BLACK || p == WALL_COLOR),
        "A light embedded in a wall should light nothing"
    );
}

#[test]
fn test_wall_casts_shadow() {
    // Layout (7x3 grid):
    //      0   1   2   3   4   5   6
    //  0 |   |   |   |   |   |   |   |
    //  1 | ☀ |   | █ |   |   |   |   |
    //  2 |   |   |   |   |   |   |   |
    let mut grid = Grid::new(7, 3).unwrap();
    grid.set(2, 1, CellKind::Wall);
    let buffer = compute_buffer(&grid, &lights(&[Light::white((0.0, 1.0))]));

    println!("Shadow buffer:\n{}", buffer_to_string(&buffer));

    // Straight behind the wall is dark
    for x in 3..7 {
        assert_eq!(buffer.get(x, 1), Some(OPAQUE_BLACK), "({}, 1) should be in shadow", x);
    }
    // Between the light and the wall is lit
    for (x, y) in [(1, 1), (0, 0), (1, 0), (0, 2), (1, 2)] {
        assert!(unpack(buffer.get(x, y).unwrap())[0] > 0, "({}, {}) should be lit", x, y);
    }
}

#[test]
fn test_occlusion_matches_buffer() {
    // A cell is lit by a single light exactly when the oracle says it is visible
    let grid = parse_level(crate::level::SAMPLE_LEVEL).unwrap();
    let light = Light::white((20.0, 12.0));
    let buffer = compute_buffer(&grid, &lights(&[light]));

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.is_wall(x, y) {
                continue;
            }
            let visible = !is_occluded(&grid, (20, 12), (x, y));
            let lit = buffer.get(x, y) != Some(OPAQUE_BLACK);
            assert_eq!(visible, lit, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let grid = parse_level(crate::level::SAMPLE_LEVEL).unwrap();
    let registry = lights(&[
        Light::new((5.0, 5.0), (1.0, 0.0, 0.0)),
        Light::new((30.5, 18.25), (0.0, 0.5, 1.0)),
        Light::new((20.0, 2.0), (1.0, 0.8, 0.4)),
    ]);

    let sequential = Compositor::new().parallel(false).compute(&grid, &registry);
    let parallel = Compositor::new().parallel(true).compute(&grid, &registry);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_custom_coefficients() {
    let grid = Grid::new(3, 1).unwrap();
    let registry = lights(&[Light::white((0.0, 0.0))]);

    // a = 0, b = 1: distance 2 -> 1 / 5 = 0.2 -> 51
    let compositor = Compositor::with_falloff(InverseQuadratic::with_coefficients(0.0, 1.0));
    let buffer = compositor.compute(&grid, &registry);
    assert_eq!(buffer.rgba(2, 0), Some([51, 51, 51, 255]));
}

#[test]
fn test_edit_between_frames() {
    // Toggling one wall only affects the next pass
    let mut grid = Grid::new(5, 1).unwrap();
    let registry = lights(&[Light::white((0.0, 0.0))]);
    let compositor = Compositor::new();

    let before = compositor.compute(&grid, &registry);
    assert!(before.get(4, 0) != Some(OPAQUE_BLACK));

    grid.toggle(2, 0);
    let after = compositor.compute(&grid, &registry);
    assert_eq!(after.get(2, 0), Some(WALL_COLOR));
    assert_eq!(after.get(4, 0), Some(OPAQUE_BLACK));
    assert_eq!(after.get(1, 0), before.get(1, 0));
}

#[test]
fn test_shallow_ray_through_wall_is_dark() {
    //      0   1   2   3   4
    //  0 |   | █ |   |   |   |
    //  1 |   |   |   |   | ☀ |
    let mut grid = Grid::new(5, 2).unwrap();
    grid.set(1, 0, CellKind::Wall);
    let buffer = compute_buffer(&grid, &lights(&[Light::white((4.0, 1.0))]));

    println!("Shallow shadow buffer:\n{}", buffer_to_string(&buffer));

    // The line to (0,0) crosses the middle of the wall cell
    assert_eq!(buffer.get(0, 0), Some(OPAQUE_BLACK));
    assert!(buffer.get(0, 1) != Some(OPAQUE_BLACK));
    assert!(buffer.get(2, 0) != Some(OPAQUE_BLACK));
}
