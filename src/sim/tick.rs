//! Per-frame scene update
//!
//! Ducks move in list order (each edge hit throws a party on the spot), then
//! every confetti piece falls and burns life, then dead confetti is removed.

use super::confetti;
use super::state::{Scene, SceneEvent};

/// Advance the scene by one frame
pub fn tick(scene: &mut Scene) {
    scene.frame += 1;

    let canvas = scene.canvas;
    let motion = scene.motion;
    for index in 0..scene.ducks.len() {
        let hit = scene.ducks[index].update(&mut scene.rng, canvas, motion);
        if let Some(hit) = hit {
            log::trace!(
                "Duck {} hit edge (normal {:?}) on frame {}",
                index,
                hit.normal,
                scene.frame
            );
            scene.push_event(SceneEvent::BoundaryHit { duck: index });
            scene.party();
        }
    }

    confetti::tick(&mut scene.confetti);
    let height = scene.canvas.y;
    confetti::prune(&mut scene.confetti, height);
}
