use kart_engine::{Rect, Vec2};

pub(crate) const CHECKPOINT_COUNT: usize = 3;

/// A fresh cart counts as having just crossed the final checkpoint, so crossing
/// checkpoint 0 opens lap 1.
pub(crate) const START_SENTINEL: usize = CHECKPOINT_COUNT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Crossing {
    pub(crate) checkpoint: usize,
    pub(crate) lap_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LapProgress {
    laps: u32,
    last_crossed: usize,
}

impl Default for LapProgress {
    fn default() -> Self {
        Self {
            laps: 0,
            last_crossed: START_SENTINEL,
        }
    }
}

impl LapProgress {
    pub(crate) fn laps(&self) -> u32 {
        self.laps
    }

    pub(crate) fn last_crossed(&self) -> usize {
        self.last_crossed
    }

    /// Tests checkpoints in index order against the hull point. Only the next checkpoint in
    /// sequence advances; the final-to-first wrap also counts a lap.
    pub(crate) fn update(
        &mut self,
        hull_point: Vec2,
        checkpoints: &[Rect; CHECKPOINT_COUNT],
    ) -> Vec<Crossing> {
        let mut crossings = Vec::new();
        for (checkpoint, zone) in checkpoints.iter().enumerate() {
            if !zone.contains_point(hull_point) {
                continue;
            }
            if checkpoint > 0 && self.last_crossed == checkpoint - 1 {
                self.last_crossed = checkpoint;
                crossings.push(Crossing {
                    checkpoint,
                    lap_completed: false,
                });
            } else if checkpoint == 0 && self.last_crossed == START_SENTINEL {
                self.last_crossed = 0;
                self.laps += 1;
                crossings.push(Crossing {
                    checkpoint,
                    lap_completed: true,
                });
            }
        }
        crossings
    }

    pub(crate) fn has_finished(&self, laps_to_finish: u32) -> bool {
        self.laps > laps_to_finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoints() -> [Rect; CHECKPOINT_COUNT] {
        [
            Rect::from_xywh(1085.0, 610.0, 150.0, 5.0),
            Rect::from_xywh(115.0, 285.0, 150.0, 5.0),
            Rect::from_xywh(570.0, 285.0, 150.0, 5.0),
        ]
    }

    fn on(index: usize) -> Vec2 {
        checkpoints()[index].center
    }

    const NOWHERE: Vec2 = Vec2::new(600.0, 50.0);

    #[test]
    fn starts_before_first_lap() {
        let progress = LapProgress::default();
        assert_eq!(progress.laps(), 0);
        assert_eq!(progress.last_crossed(), 2);
    }

    #[test]
    fn full_circuit_counts_laps_in_order() {
        let zones = checkpoints();
        let mut progress = LapProgress::default();

        progress.update(on(0), &zones);
        assert_eq!((progress.last_crossed(), progress.laps()), (0, 1));
        progress.update(on(1), &zones);
        assert_eq!((progress.last_crossed(), progress.laps()), (1, 1));
        progress.update(on(2), &zones);
        assert_eq!((progress.last_crossed(), progress.laps()), (2, 1));
        let crossings = progress.update(on(0), &zones);
        assert_eq!((progress.last_crossed(), progress.laps()), (0, 2));
        assert_eq!(
            crossings,
            vec![Crossing {
                checkpoint: 0,
                lap_completed: true
            }]
        );
    }

    #[test]
    fn out_of_order_checkpoints_are_ignored() {
        let zones = checkpoints();
        let mut progress = LapProgress::default();

        assert!(progress.update(on(1), &zones).is_empty());
        assert!(progress.update(on(2), &zones).is_empty());
        assert_eq!(progress, LapProgress::default());

        progress.update(on(0), &zones);
        assert!(progress.update(on(2), &zones).is_empty());
        assert_eq!((progress.last_crossed(), progress.laps()), (0, 1));
    }

    #[test]
    fn parking_on_a_checkpoint_does_not_retrigger() {
        let zones = checkpoints();
        let mut progress = LapProgress::default();
        progress.update(on(0), &zones);
        for _ in 0..120 {
            assert!(progress.update(on(0), &zones).is_empty());
        }
        assert_eq!(progress.laps(), 1);
    }

    #[test]
    fn reversing_never_decrements() {
        let zones = checkpoints();
        let mut progress = LapProgress::default();
        let mut previous = progress.laps();
        for point in [on(0), on(2), on(1), on(0), on(1), on(2), on(1), on(0), NOWHERE] {
            progress.update(point, &zones);
            assert!(progress.laps() >= previous);
            assert!(progress.laps() - previous <= 1);
            previous = progress.laps();
        }
        assert_eq!(progress.laps(), 2);
    }

    #[test]
    fn edge_of_checkpoint_counts() {
        let zones = checkpoints();
        let mut progress = LapProgress::default();
        progress.update(Vec2::new(zones[0].left(), zones[0].top()), &zones);
        assert_eq!(progress.laps(), 1);
    }

    #[test]
    fn finish_requires_exceeding_the_target() {
        let zones = checkpoints();
        let mut progress = LapProgress::default();
        for _ in 0..3 {
            for index in [0, 1, 2] {
                progress.update(on(index), &zones);
            }
        }
        assert_eq!(progress.laps(), 3);
        assert!(!progress.has_finished(3));

        progress.update(on(0), &zones);
        assert_eq!(progress.laps(), 4);
        assert!(progress.has_finished(3));
    }
}
