use std::time::Duration;

/// Wall-clock epochs for the pre-race countdown and the race itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RaceTimers {
    countdown_epoch: Option<Duration>,
    race_epoch: Option<Duration>,
}

impl RaceTimers {
    pub(crate) fn start_countdown(&mut self, now: Duration) {
        self.countdown_epoch = Some(now);
        self.race_epoch = None;
    }

    /// Records the race epoch once the countdown has fully elapsed. True only on that tick.
    pub(crate) fn poll_go(&mut self, now: Duration, countdown_seconds: u64) -> bool {
        if self.race_epoch.is_some() {
            return false;
        }
        let Some(epoch) = self.countdown_epoch else {
            return false;
        };
        if now.saturating_sub(epoch) >= Duration::from_secs(countdown_seconds) {
            self.race_epoch = Some(now);
            return true;
        }
        false
    }

    pub(crate) fn is_go(&self) -> bool {
        self.race_epoch.is_some()
    }

    /// Digit to display while counting down. Whole elapsed second `e` shows
    /// `countdown_seconds - e`; nothing shows during the first second.
    pub(crate) fn countdown_digit(&self, now: Duration, countdown_seconds: u64) -> Option<u64> {
        if self.is_go() {
            return None;
        }
        let elapsed = now.saturating_sub(self.countdown_epoch?).as_secs();
        (1..countdown_seconds)
            .contains(&elapsed)
            .then(|| countdown_seconds - elapsed)
    }

    /// Whole seconds since go, or 0 before it.
    pub(crate) fn race_seconds(&self, now: Duration) -> u64 {
        self.race_epoch
            .map(|epoch| now.saturating_sub(epoch).as_secs())
            .unwrap_or(0)
    }

    pub(crate) fn show_go_banner(&self, now: Duration, go_banner_seconds: u64) -> bool {
        self.race_epoch
            .is_some_and(|epoch| now.saturating_sub(epoch) < Duration::from_secs(go_banner_seconds))
    }
}
