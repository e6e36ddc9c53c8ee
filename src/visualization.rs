//! 3D visualization of a folded snake using kiss3d.

use std::collections::HashMap;

use kiss3d::prelude::*;

use snake::Solution;

/// Returns the display color for a segment (in placement order).
///
/// Neighbouring segments always get different colors so every fold is visible.
fn segment_color(segment: usize) -> Color {
    match segment % 6 {
        0 => Color::new(1.0, 0.2, 0.2, 1.0), // red
        1 => Color::new(0.2, 1.0, 0.2, 1.0), // green
        2 => Color::new(0.2, 0.2, 1.0, 1.0), // blue
        3 => Color::new(1.0, 1.0, 0.2, 1.0), // yellow
        4 => Color::new(1.0, 0.2, 1.0, 1.0), // magenta
        _ => Color::new(0.2, 1.0, 1.0, 1.0), // cyan
    }
}

/// Represents a rendered cube in the 3D scene.
struct RenderedCube {
    /// The kiss3d scene node for this cube.
    node: SceneNode3d,
    /// The cube's position when not exploded.
    base_position: Vec3,
    /// Which segment this cube belongs to.
    segment: usize,
}

/// Builds the 3D scene for the first `segments_shown` segments of a folding.
///
/// Coordinate conventions:
/// - Solver cells use integer x, y, z in 0..=3.
/// - Rendered cubes map x->X, y->Y, z->Z in world units.
/// - The cube is centered at the origin by offsetting positions by -1.5.
///
/// Returns the rendered cubes and a map of segment centroids for the
/// explosion animation.
fn build_scene(
    scene: &mut SceneNode3d,
    solution: &Solution,
    segments_shown: usize,
) -> (Vec<RenderedCube>, HashMap<usize, Vec3>) {
    /// Size of each rendered cube (slightly smaller than 1.0 for visible gaps).
    const CUBE_SIZE: f32 = 0.9;
    /// Spacing between grid cells.
    const CELL_SPACING: f32 = 1.0;
    /// Offset to center the cube around the origin.
    const CENTER_OFFSET: f32 = -1.5;

    let cells: Vec<(usize, Vec3)> = solution
        .segment_cells()
        .into_iter()
        .filter(|&(segment, _)| segment < segments_shown)
        .map(|(segment, [x, y, z])| (segment, Vec3::new(x as f32, y as f32, z as f32)))
        .collect();

    // compute segment centroids for explosion animation
    let mut sums: HashMap<usize, (Vec3, f32)> = HashMap::new();
    for &(segment, position) in &cells {
        let entry = sums.entry(segment).or_insert((Vec3::ZERO, 0.0));
        entry.0 += position;
        entry.1 += 1.0;
    }
    let segment_centroids: HashMap<usize, Vec3> = sums
        .into_iter()
        .map(|(segment, (sum, count))| (segment, sum / count))
        .collect();

    let rendered_cubes = cells
        .into_iter()
        .map(|(segment, position)| {
            let base_position = position * CELL_SPACING + Vec3::splat(CENTER_OFFSET);
            let node = scene
                .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
                .set_color(segment_color(segment))
                .set_position(base_position);
            RenderedCube {
                node,
                base_position,
                segment,
            }
        })
        .collect();

    (rendered_cubes, segment_centroids)
}

/// Window title for the current fold step.
fn title(segments_shown: usize, segment_count: usize) -> String {
    format!(
        "Segments {}/{} - [Left/Right] fold, [Up/Down] explode, [R] reset",
        segments_shown, segment_count
    )
}

/// Displays a folding in an interactive 3D viewer.
pub fn display(solution: Solution) {
    pollster::block_on(display_async(solution));
}

async fn display_async(solution: Solution) {
    let segment_count = solution.moves().len();
    if segment_count == 0 {
        println!("Nothing to display");
        return;
    }

    let mut segments_shown = segment_count;
    let mut window = Window::new(&title(segments_shown, segment_count)).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(10.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(6.0, 6.0, 6.0));

    // center point in solver coordinates for explosion direction calculation
    let grid_center = Vec3::splat(1.5);
    let (mut rendered_cubes, mut segment_centroids) =
        build_scene(&mut scene, &solution, segments_shown);

    // how much to expand segments outward (0.0 = compact, higher = more exploded)
    let mut explosion_amount: f32 = 0.0;
    // speed at which explosion changes per keypress
    const EXPLOSION_SPEED: f32 = 0.05;
    // whether the scene needs to be rebuilt (after the fold step changes)
    let mut needs_rebuild = false;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up => explosion_amount += EXPLOSION_SPEED,
                        Key::Down => {
                            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0)
                        }
                        Key::R => {
                            explosion_amount = 0.0;
                            segments_shown = segment_count;
                            needs_rebuild = true;
                        }
                        Key::Right if segments_shown < segment_count => {
                            segments_shown += 1;
                            needs_rebuild = true;
                        }
                        Key::Left if segments_shown > 1 => {
                            segments_shown -= 1;
                            needs_rebuild = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        if needs_rebuild {
            for mut cube in rendered_cubes.drain(..) {
                cube.node.remove();
            }
            let (new_cubes, new_centroids) = build_scene(&mut scene, &solution, segments_shown);
            rendered_cubes = new_cubes;
            segment_centroids = new_centroids;
            window.set_title(&title(segments_shown, segment_count));
            needs_rebuild = false;
        }

        // update cube positions for explosion animation
        for cube in &mut rendered_cubes {
            let centroid = segment_centroids
                .get(&cube.segment)
                .copied()
                .unwrap_or(grid_center);
            let explosion_direction = (centroid - grid_center).normalize_or_zero();
            cube.node.set_position(
                cube.base_position + explosion_direction * explosion_amount * 2.0,
            );
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
