//! Per-frame simulation step
//!
//! Variable timestep: the host measures elapsed time and passes it in.
//! Order within a frame is fixed: scenery, player, obstacles, finish line,
//! collision, outcome.

use super::collision::{CollisionJudge, Rect};
use super::player::PlayerController;
use super::race::RaceOutcome;
use super::state::World;

/// Longest plan the autopilot searches, in frames
const MAX_PLAN_FRAMES: usize = 600;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump key is held
    pub jump: bool,
    /// Demo mode - plan jumps over the oncoming obstacles
    pub autopilot: bool,
}

/// Non-finite or negative elapsed times are treated as zero
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame time {}", dt);
        0.0
    }
}

/// Search over jump timings against the obstacles as they are now, moving
/// in a straight line. Respawns are not predicted, so the plan is rebuilt
/// every frame.
struct JumpPlanner<'a> {
    judge: &'a CollisionJudge,
    obstacles: Vec<Rect>,
    /// Leftward obstacle travel per frame
    step: f32,
    dt: f32,
    horizon: usize,
    /// Memo: can the race go on from standing on the ground at frame `i`
    clear_from: Vec<Option<bool>>,
}

impl<'a> JumpPlanner<'a> {
    fn new(world: &'a World, dt: f32) -> Self {
        let horizon = ((world.config.autopilot_horizon / dt).ceil() as usize).min(MAX_PLAN_FRAMES);
        Self {
            judge: &world.judge,
            obstacles: world.obstacles.obstacles.iter().map(|o| o.bounds()).collect(),
            step: world.obstacles.speed * dt,
            dt,
            horizon,
            clear_from: vec![None; horizon],
        }
    }

    fn hit_at(&self, player: &PlayerController, frame: usize) -> bool {
        let shift = self.step * frame as f32;
        let obstacles = self.obstacles.iter().map(|r| Rect {
            x: r.x - shift,
            ..*r
        });
        self.judge.collides(player.bounds(), obstacles)
    }

    /// Stay on the ground for the frame after `frame`
    fn wait_from(&self, mut player: PlayerController, frame: usize) -> Option<PlayerController> {
        player.update(self.dt, false);
        (!self.hit_at(&player, frame + 1)).then_some(player)
    }

    /// Jump at `frame` and ride the arc down. Landing frame and player, or
    /// `None` if the arc meets an obstacle.
    fn jump_from(
        &self,
        mut player: PlayerController,
        frame: usize,
    ) -> Option<(usize, PlayerController)> {
        let mut jump = true;
        let mut k = frame;
        loop {
            player.update(self.dt, jump);
            jump = false;
            k += 1;
            if self.hit_at(&player, k) {
                return None;
            }
            if !player.is_airborne() || k >= self.horizon {
                return Some((k, player));
            }
        }
    }

    /// True if some sequence of jumps from standing at `frame` stays clear
    /// up to the horizon
    fn survives(&mut self, frame: usize, player: &PlayerController) -> bool {
        if frame >= self.horizon {
            return true;
        }
        if let Some(known) = self.clear_from[frame] {
            return known;
        }
        self.clear_from[frame] = Some(false);

        let clear = match self.jump_from(player.clone(), frame) {
            Some((landed, next)) => self.survives(landed, &next),
            None => false,
        } || self
            .wait_from(player.clone(), frame)
            .is_some_and(|next| self.survives(frame + 1, &next));

        self.clear_from[frame] = Some(clear);
        clear
    }
}

/// Autopilot decision for a frame of `dt` seconds.
///
/// Stays on the ground while some later jump still gets past everything
/// within `autopilot_horizon`, so each jump is as late as it can be and the
/// landing leaves room for the next one. When no clear run exists it still
/// jumps if the arc itself is clear.
pub fn autopilot_wants_jump(world: &World, dt: f32) -> bool {
    if world.player.is_airborne() || dt <= 0.0 {
        return false;
    }

    let mut planner = JumpPlanner::new(world, dt);
    let can_wait = planner
        .wait_from(world.player.clone(), 0)
        .is_some_and(|next| planner.survives(1, &next));

    !can_wait && planner.jump_from(world.player.clone(), 0).is_some()
}

/// Advance the world by one frame of `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> RaceOutcome {
    let dt = sanitize_dt(dt);

    // Scenery keeps scrolling behind the result screen
    for layer in &mut world.layers {
        layer.advance(dt);
    }

    // Frozen once decided
    if world.race.outcome().is_over() {
        return world.race.outcome();
    }

    // Zero-length frames leave the clock alone
    if dt > 0.0 {
        world.time_ticks += 1;
        world.elapsed += dt;
    }

    let jump = input.jump || (input.autopilot && autopilot_wants_jump(world, dt));
    if world.player.update(dt, jump) {
        log::trace!("Jump at tick {}", world.time_ticks);
    }

    world.obstacles.update(dt, &mut world.rng);
    world.race.advance(world.obstacles.speed, dt);

    let player_box = world.player.bounds();
    let hit = world
        .judge
        .first_hit(player_box, world.obstacles.obstacles.iter().map(|o| o.bounds()));
    world.last_collision = hit.is_some();

    let outcome = world.race.judge(world.last_collision);
    match outcome {
        RaceOutcome::Lost => log::info!(
            "Race lost: hit obstacle {} after {:.2}s ({:.0}px to go)",
            hit.unwrap_or_default(),
            world.elapsed,
            world.race.remaining_distance()
        ),
        RaceOutcome::Won => log::info!("Race won after {:.2}s", world.elapsed),
        RaceOutcome::Continuing => {}
    }

    outcome
}

/// By-value form of [`tick`]
pub fn advance(mut world: World, dt: f32, input: &TickInput) -> World {
    tick(&mut world, input, dt);
    world
}
