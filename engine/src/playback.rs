/// Replays a snapshot of recorded values newest-first, one value every `cadence` ticks.
///
/// The snapshot is owned by the controller, so the live history can keep changing while a
/// replay is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback<T> {
    active: bool,
    pending: Vec<T>,
    tick_counter: u32,
    cadence: u32,
}

impl<T> Playback<T> {
    /// A cadence of 0 behaves like 1 (one value per tick).
    pub fn new(cadence: u32) -> Self {
        Self {
            active: false,
            pending: Vec::new(),
            tick_counter: 0,
            cadence: cadence.max(1),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cadence(&self) -> u32 {
        self.cadence
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> &[T] {
        &self.pending
    }

    /// Begins replaying `snapshot`. Ignored while already active or when `snapshot` is empty.
    pub fn start(&mut self, snapshot: Vec<T>) -> bool {
        if self.active || snapshot.is_empty() {
            return false;
        }
        self.pending = snapshot;
        self.tick_counter = 0;
        self.active = true;
        true
    }

    /// Advances one tick, yielding at most one value.
    pub fn tick(&mut self) -> Option<T> {
        if !self.active {
            return None;
        }
        if self.pending.is_empty() {
            self.active = false;
            return None;
        }

        self.tick_counter += 1;
        if self.tick_counter < self.cadence {
            return None;
        }
        self.tick_counter = 0;

        let target = self.pending.pop();
        if self.pending.is_empty() {
            self.active = false;
        }
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tick_does_nothing() {
        let mut p: Playback<i32> = Playback::new(3);
        assert_eq!(p.tick(), None);
        assert!(!p.is_active());
    }

    #[test]
    fn start_rejects_empty_snapshot() {
        let mut p: Playback<i32> = Playback::new(3);
        assert!(!p.start(Vec::new()));
        assert!(!p.is_active());
    }

    #[test]
    fn start_is_ignored_while_active() {
        let mut p = Playback::new(1);
        assert!(p.start(vec![1, 2]));
        assert!(!p.start(vec![9, 9, 9]));
        assert_eq!(p.pending(), &[1, 2]);
    }

    #[test]
    fn emits_tail_first_every_cadence_ticks() {
        let mut p = Playback::new(3);
        p.start(vec![10, 20, 30]);

        let emitted: Vec<Option<i32>> = (0..9).map(|_| p.tick()).collect();
        assert_eq!(
            emitted,
            vec![None, None, Some(30), None, None, Some(20), None, None, Some(10)]
        );
    }

    #[test]
    fn becomes_idle_on_the_tick_that_empties_pending() {
        for n in 1..6usize {
            for cadence in 1..5u32 {
                let mut p = Playback::new(cadence);
                p.start((0..n).collect::<Vec<_>>());

                let ticks = n * cadence as usize;
                for i in 0..ticks {
                    assert!(p.is_active(), "went idle early at tick {i} (n={n}, c={cadence})");
                    p.tick();
                }
                assert!(!p.is_active());
                assert_eq!(p.pending_len(), 0);
            }
        }
    }

    #[test]
    fn emitted_sequence_is_snapshot_reversed() {
        let snapshot = vec![1, 2, 3, 4, 5];
        let mut p = Playback::new(2);
        p.start(snapshot.clone());

        let mut emitted = Vec::new();
        while p.is_active() {
            if let Some(v) = p.tick() {
                emitted.push(v);
            }
        }

        let mut expected = snapshot;
        expected.reverse();
        assert_eq!(emitted, expected);
    }

    #[test]
    fn zero_cadence_steps_every_tick() {
        let mut p = Playback::new(0);
        assert_eq!(p.cadence(), 1);
        p.start(vec!['x', 'y']);
        assert_eq!(p.tick(), Some('y'));
        assert_eq!(p.tick(), Some('x'));
        assert!(!p.is_active());
    }

    #[test]
    fn can_restart_after_finishing() {
        let mut p = Playback::new(1);
        p.start(vec![1]);
        assert_eq!(p.tick(), Some(1));
        assert!(p.start(vec![2]));
        assert_eq!(p.tick(), Some(2));
    }
}
