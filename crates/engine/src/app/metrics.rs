use super::movement::MoveOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopMetricsSnapshot {
    pub frames: u64,
    pub moves_accepted: u64,
    pub moves_blocked: u64,
    pub moves_rejected: u64,
}

impl LoopMetricsSnapshot {
    pub fn moves_requested(&self) -> u64 {
        self.moves_accepted
            .saturating_add(self.moves_blocked)
            .saturating_add(self.moves_rejected)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MetricsAccumulator {
    snapshot: LoopMetricsSnapshot,
}

impl MetricsAccumulator {
    pub(crate) fn record_frame(&mut self) {
        self.snapshot.frames = self.snapshot.frames.saturating_add(1);
    }

    pub(crate) fn record_move(&mut self, outcome: MoveOutcome) {
        let counter = if outcome.is_moved() {
            &mut self.snapshot.moves_accepted
        } else {
            &mut self.snapshot.moves_blocked
        };
        *counter = counter.saturating_add(1);
    }

    pub(crate) fn record_rejected(&mut self) {
        self.snapshot.moves_rejected = self.snapshot.moves_rejected.saturating_add(1);
    }

    pub(crate) fn snapshot(&self) -> LoopMetricsSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames_and_move_outcomes() {
        let mut accumulator = MetricsAccumulator::default();
        accumulator.record_frame();
        accumulator.record_frame();
        accumulator.record_move(MoveOutcome::Moved);
        accumulator.record_move(MoveOutcome::BlockedByWall);
        accumulator.record_move(MoveOutcome::BlockedByEdge);
        accumulator.record_rejected();

        let snapshot = accumulator.snapshot();
        assert_eq!(snapshot.frames, 2);
        assert_eq!(snapshot.moves_accepted, 1);
        assert_eq!(snapshot.moves_blocked, 2);
        assert_eq!(snapshot.moves_rejected, 1);
        assert_eq!(snapshot.moves_requested(), 4);
    }
}
