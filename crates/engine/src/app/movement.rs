use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::content::{CellKind, GridPos, LevelError, LevelGrid};

use super::input::{Direction, Step};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Fixed edges; the displayed grid is re-derived from the source level.
    #[default]
    Bounded,
    /// Wrap-around map; one grid is mutated and rotated in place.
    Toroidal,
}

impl MovementPolicy {
    pub fn label(self) -> &'static str {
        match self {
            MovementPolicy::Bounded => "bounded",
            MovementPolicy::Toroidal => "toroidal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Moved,
    BlockedByWall,
    BlockedByEdge,
}

impl MoveOutcome {
    pub fn is_moved(self) -> bool {
        self == MoveOutcome::Moved
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::BlockedByWall => "blocked_by_wall",
            MoveOutcome::BlockedByEdge => "blocked_by_edge",
        }
    }
}

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("step ({dx}, {dy}) is not one of the four unit directions")]
    InvalidDirection { dx: i32, dy: i32 },
    #[error(transparent)]
    Level(#[from] LevelError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedMove {
    pub position: GridPos,
    pub grid: LevelGrid,
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToroidalMove {
    /// Target cell before the wrap rotation.
    pub candidate: GridPos,
    /// Marker cell after the wrap rotation.
    pub position: GridPos,
    pub outcome: MoveOutcome,
}

/// Resolves one step against a fixed-edge map.
///
/// The returned grid is always `source` with every marker cleared and a single
/// marker at the resolved position, so stale markers never accumulate.
pub fn move_bounded(
    current: GridPos,
    step: impl Into<Step>,
    source: &LevelGrid,
) -> Result<BoundedMove, MoveError> {
    let direction = validate_step(step.into())?;
    source.cell_at(current)?;

    let delta = direction.step();
    let candidate = current.offset(delta.dx, delta.dy);
    let (position, outcome) = if !source.contains(candidate) {
        (current, MoveOutcome::BlockedByEdge)
    } else if source.cell_at(candidate)? == CellKind::Wall {
        (current, MoveOutcome::BlockedByWall)
    } else {
        (candidate, MoveOutcome::Moved)
    };

    let grid = source.with_player_at(position)?;
    debug!(
        policy = "bounded",
        ?direction,
        from = %current,
        to = %position,
        outcome = outcome.label(),
        "move_resolved"
    );
    Ok(BoundedMove {
        position,
        grid,
        outcome,
    })
}

/// Resolves one step against a wrap-around map held in `grid`.
///
/// An accepted move relocates the marker and then rotates the whole grid one
/// cell against the motion, so the world scrolls while the marker returns to
/// the index it started from. On any error or block `grid` is left untouched.
pub fn move_toroidal(
    current: GridPos,
    step: impl Into<Step>,
    grid: &mut LevelGrid,
) -> Result<ToroidalMove, MoveError> {
    let direction = validate_step(step.into())?;
    grid.cell_at(current)?;

    let delta = direction.step();
    let candidate = current.offset(delta.dx, delta.dy);
    let blocked = if !grid.contains(candidate) {
        Some(MoveOutcome::BlockedByEdge)
    } else if grid.cell_at(candidate)? == CellKind::Wall {
        Some(MoveOutcome::BlockedByWall)
    } else {
        None
    };
    if let Some(outcome) = blocked {
        debug!(
            policy = "toroidal",
            ?direction,
            from = %current,
            outcome = outcome.label(),
            "move_resolved"
        );
        return Ok(ToroidalMove {
            candidate,
            position: current,
            outcome,
        });
    }

    grid.set_cell(current, CellKind::Empty)?;
    grid.set_cell(candidate, CellKind::PlayerStart)?;
    match direction {
        Direction::Down => grid.rotate_rows_up(),
        Direction::Up => grid.rotate_rows_down(),
        Direction::Right => grid.rotate_columns_left(),
        Direction::Left => grid.rotate_columns_right(),
    }
    let position = wrap_position(candidate.offset(-delta.dx, -delta.dy), grid);

    debug!(
        policy = "toroidal",
        ?direction,
        from = %current,
        candidate = %candidate,
        to = %position,
        outcome = MoveOutcome::Moved.label(),
        "move_resolved"
    );
    Ok(ToroidalMove {
        candidate,
        position,
        outcome: MoveOutcome::Moved,
    })
}

/// Owns the map state for one policy so a session can drive either policy
/// through the same calls.
pub trait MoveResolver {
    fn policy(&self) -> MovementPolicy;

    fn grid(&self) -> &LevelGrid;

    fn resolve(&mut self, current: GridPos, step: Step) -> Result<ResolvedMove, MoveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMove {
    pub candidate: GridPos,
    pub position: GridPos,
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone)]
pub struct BoundedResolver {
    source: LevelGrid,
    current: LevelGrid,
}

impl BoundedResolver {
    pub fn new(source: LevelGrid, start: GridPos) -> Result<Self, LevelError> {
        let current = source.with_player_at(start)?;
        Ok(Self { source, current })
    }

    pub fn source(&self) -> &LevelGrid {
        &self.source
    }
}

impl MoveResolver for BoundedResolver {
    fn policy(&self) -> MovementPolicy {
        MovementPolicy::Bounded
    }

    fn grid(&self) -> &LevelGrid {
        &self.current
    }

    fn resolve(&mut self, current: GridPos, step: Step) -> Result<ResolvedMove, MoveError> {
        let resolved = move_bounded(current, step, &self.source)?;
        self.current = resolved.grid;
        Ok(ResolvedMove {
            candidate: current.offset(step.dx, step.dy),
            position: resolved.position,
            outcome: resolved.outcome,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ToroidalResolver {
    grid: LevelGrid,
}

impl ToroidalResolver {
    pub fn new(source: &LevelGrid, start: GridPos) -> Result<Self, LevelError> {
        Ok(Self {
            grid: source.with_player_at(start)?,
        })
    }
}

impl MoveResolver for ToroidalResolver {
    fn policy(&self) -> MovementPolicy {
        MovementPolicy::Toroidal
    }

    fn grid(&self) -> &LevelGrid {
        &self.grid
    }

    fn resolve(&mut self, current: GridPos, step: Step) -> Result<ResolvedMove, MoveError> {
        let resolved = move_toroidal(current, step, &mut self.grid)?;
        Ok(ResolvedMove {
            candidate: resolved.candidate,
            position: resolved.position,
            outcome: resolved.outcome,
        })
    }
}

pub fn build_resolver(
    policy: MovementPolicy,
    source: LevelGrid,
    start: GridPos,
) -> Result<Box<dyn MoveResolver>, LevelError> {
    Ok(match policy {
        MovementPolicy::Bounded => Box::new(BoundedResolver::new(source, start)?),
        MovementPolicy::Toroidal => Box::new(ToroidalResolver::new(&source, start)?),
    })
}

fn validate_step(step: Step) -> Result<Direction, MoveError> {
    Direction::try_from(step).map_err(|step| MoveError::InvalidDirection {
        dx: step.dx,
        dy: step.dy,
    })
}

fn wrap_position(pos: GridPos, grid: &LevelGrid) -> GridPos {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    GridPos::new(pos.x.rem_euclid(width), pos.y.rem_euclid(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> LevelGrid {
        LevelGrid::parse(text).expect("grid")
    }

    #[test]
    fn bounded_accepts_move_into_empty_cell() {
        let source = grid("#####\n#@..#\n#####");
        let start = source.find_player_start().expect("start");
        let resolved = move_bounded(start, Direction::Right, &source).expect("move");
        assert_eq!(resolved.outcome, MoveOutcome::Moved);
        assert_eq!(resolved.position, GridPos::new(2, 1));
        assert_eq!(resolved.grid.to_string(), "#####\n#.@.#\n#####");
    }

    #[test]
    fn bounded_wall_keeps_position_and_redraws_marker() {
        let source = grid("#####\n#@..#\n#####");
        let start = source.find_player_start().expect("start");
        for direction in [Direction::Left, Direction::Up, Direction::Down] {
            let resolved = move_bounded(start, direction, &source).expect("move");
            assert_eq!(resolved.outcome, MoveOutcome::BlockedByWall);
            assert_eq!(resolved.position, start);
            assert_eq!(resolved.grid, source);
        }
    }

    #[test]
    fn bounded_edge_is_a_no_op() {
        let source = grid("@.\n..");
        let resolved = move_bounded(GridPos::new(0, 0), Direction::Up, &source).expect("move");
        assert_eq!(resolved.outcome, MoveOutcome::BlockedByEdge);
        assert_eq!(resolved.position, GridPos::new(0, 0));
        assert_eq!(resolved.grid.to_string(), "@.\n..");

        let resolved = move_bounded(GridPos::new(1, 1), Direction::Right, &source).expect("move");
        assert_eq!(resolved.outcome, MoveOutcome::BlockedByEdge);
        assert_eq!(resolved.grid.to_string(), "..\n.@");
    }

    #[test]
    fn bounded_round_trip_restores_position_and_grid() {
        let source = grid("#....\n..@..\n...#.\n.....");
        let start = source.find_player_start().expect("start");
        let original = source.with_player_at(start).expect("derive");
        for direction in Direction::ALL {
            let there = move_bounded(start, direction, &source).expect("forward");
            assert!(there.outcome.is_moved(), "{direction:?} should be legal");
            let back =
                move_bounded(there.position, direction.inverse(), &source).expect("backward");
            assert_eq!(back.position, start);
            assert_eq!(back.grid, original);
        }
    }

    #[test]
    fn bounded_never_accumulates_markers() {
        let source = grid("@...\n....");
        let mut position = GridPos::new(0, 0);
        for direction in [Direction::Right, Direction::Down, Direction::Right] {
            let resolved = move_bounded(position, direction, &source).expect("move");
            position = resolved.position;
            let markers = resolved
                .grid
                .cells()
                .filter(|(_, kind)| *kind == CellKind::PlayerStart)
                .count();
            assert_eq!(markers, 1);
        }
        assert_eq!(position, GridPos::new(2, 1));
    }

    #[test]
    fn invalid_step_is_rejected_without_touching_state() {
        let source = grid("@..\n...");
        let err = move_bounded(GridPos::new(0, 0), Step::new(1, 1), &source).expect_err("diag");
        assert!(matches!(err, MoveError::InvalidDirection { dx: 1, dy: 1 }));

        let mut torus = grid("@..\n...");
        let before = torus.clone();
        for step in [Step::new(0, 0), Step::new(1, 1), Step::new(2, 0)] {
            let err = move_toroidal(GridPos::new(0, 0), step, &mut torus).expect_err("invalid");
            assert!(matches!(err, MoveError::InvalidDirection { .. }));
        }
        assert_eq!(torus, before);
    }

    #[test]
    fn current_position_off_grid_is_out_of_bounds() {
        let source = grid("@.");
        let err = move_bounded(GridPos::new(5, 0), Direction::Left, &source).expect_err("oob");
        assert!(matches!(
            err,
            MoveError::Level(LevelError::OutOfBounds { x: 5, y: 0, .. })
        ));

        let mut torus = grid("@.");
        let before = torus.clone();
        let err = move_toroidal(GridPos::new(0, -1), Direction::Down, &mut torus).expect_err("oob");
        assert!(matches!(err, MoveError::Level(LevelError::OutOfBounds { .. })));
        assert_eq!(torus, before);
    }

    #[test]
    fn toroidal_right_scrolls_row_under_fixed_marker() {
        let mut torus = grid("@..");
        let resolved = move_toroidal(GridPos::new(0, 0), Direction::Right, &mut torus).expect("move");
        assert_eq!(resolved.outcome, MoveOutcome::Moved);
        assert_eq!(resolved.candidate, GridPos::new(1, 0));
        assert_eq!(resolved.position, GridPos::new(0, 0));
        assert_eq!(torus.to_string(), "@..");
        for pos in [resolved.candidate, resolved.position] {
            assert!(pos.x >= 0 && pos.x < torus.width() as i32);
        }
    }

    #[test]
    fn toroidal_shift_moves_terrain_against_motion() {
        let mut torus = grid("@.#.\n....");
        let resolved = move_toroidal(GridPos::new(0, 0), Direction::Right, &mut torus).expect("move");
        assert!(resolved.outcome.is_moved());
        assert_eq!(torus.to_string(), "@#..\n....");

        let blocked =
            move_toroidal(resolved.position, Direction::Right, &mut torus).expect("blocked");
        assert_eq!(blocked.outcome, MoveOutcome::BlockedByWall);
        assert_eq!(blocked.position, GridPos::new(0, 0));
        assert_eq!(torus.to_string(), "@#..\n....");
    }

    #[test]
    fn toroidal_vertical_moves_rotate_rows() {
        let mut torus = grid(".#.\n.@.\n...");
        let down = move_toroidal(GridPos::new(1, 1), Direction::Down, &mut torus).expect("down");
        assert_eq!(down.candidate, GridPos::new(1, 2));
        assert_eq!(down.position, GridPos::new(1, 1));
        assert_eq!(torus.to_string(), "...\n.@.\n.#.");

        let up = move_toroidal(GridPos::new(1, 1), Direction::Up, &mut torus).expect("up");
        assert_eq!(up.position, GridPos::new(1, 1));
        assert_eq!(torus.to_string(), ".#.\n.@.\n...");

        let blocked = move_toroidal(GridPos::new(1, 1), Direction::Up, &mut torus).expect("wall");
        assert_eq!(blocked.outcome, MoveOutcome::BlockedByWall);
    }

    #[test]
    fn toroidal_edge_check_still_blocks() {
        let mut torus = grid("..@");
        let before = torus.clone();
        let resolved = move_toroidal(GridPos::new(2, 0), Direction::Right, &mut torus).expect("edge");
        assert_eq!(resolved.outcome, MoveOutcome::BlockedByEdge);
        assert_eq!(resolved.position, GridPos::new(2, 0));
        assert_eq!(torus, before);
    }

    #[test]
    fn toroidal_full_cycle_restores_grid() {
        let source = grid("...\n...\n...");
        for y in 0..3 {
            for x in 0..3 {
                let start = GridPos::new(x, y);
                for direction in Direction::ALL {
                    let mut torus = source.with_player_at(start).expect("derive");
                    let original = torus.clone();
                    let repeats = match direction {
                        Direction::Left | Direction::Right => torus.width(),
                        Direction::Up | Direction::Down => torus.height(),
                    };
                    let mut position = start;
                    for _ in 0..repeats {
                        position = move_toroidal(position, direction, &mut torus)
                            .expect("move")
                            .position;
                    }
                    assert_eq!(position, start);
                    assert_eq!(torus, original, "{start:?} {direction:?}");
                }
            }
        }
    }

    #[test]
    fn toroidal_full_cycle_with_walls_off_the_line_of_motion() {
        let mut torus = grid("#.##\n@...\n.#..");
        let original = torus.clone();
        let mut position = torus.find_player_start().expect("start");
        for _ in 0..torus.width() {
            let resolved = move_toroidal(position, Direction::Right, &mut torus).expect("move");
            assert!(resolved.outcome.is_moved());
            position = resolved.position;
        }
        assert_eq!(torus, original);
    }

    #[test]
    fn resolvers_track_their_grid() {
        let source = grid("@..\n.#.");
        let start = source.find_player_start().expect("start");

        let mut bounded = build_resolver(MovementPolicy::Bounded, source.clone(), start)
            .expect("bounded");
        let moved = bounded.resolve(start, Direction::Down.step()).expect("down");
        assert_eq!(moved.position, GridPos::new(0, 1));
        assert_eq!(bounded.grid().to_string(), "...\n@#.");
        assert_eq!(bounded.policy(), MovementPolicy::Bounded);

        let mut toroidal =
            build_resolver(MovementPolicy::Toroidal, source, start).expect("toroidal");
        let moved = toroidal.resolve(start, Direction::Down.step()).expect("down");
        assert_eq!(moved.candidate, GridPos::new(0, 1));
        assert_eq!(moved.position, start);
        assert_eq!(toroidal.grid().to_string(), "@#.\n...");
    }

    #[test]
    fn policy_names_deserialize_in_snake_case() {
        let policy: MovementPolicy = serde_json::from_str("\"toroidal\"").expect("policy");
        assert_eq!(policy, MovementPolicy::Toroidal);
        assert_eq!(MovementPolicy::default(), MovementPolicy::Bounded);
    }
}
