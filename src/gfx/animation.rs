//! Clip playback for animated models
//!
//! When a loaded model carries animations, only the first clip is played,
//! looped exactly [`LOOP_REPETITIONS`] times and then left on its end pose.

/// Number of times the startup animation loops before stopping.
const LOOP_REPETITIONS: u32 = 2;

/// An animation clip as reported by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Clip length in seconds.
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration,
        }
    }
}

/// Drives one clip through its fixed number of repetitions.
pub struct AnimationPlayer {
    clip: AnimationClip,
    elapsed: f32,
}

impl AnimationPlayer {
    pub fn new(clip: AnimationClip) -> Self {
        Self { clip, elapsed: 0.0 }
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Advances playback by `dt` seconds. Time never runs backwards and
    /// stops accumulating once the final repetition completes.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.total_duration());
    }

    /// True until the last repetition has fully played out.
    ///
    /// A clip without positive duration has nothing to play and finishes
    /// immediately.
    pub fn is_playing(&self) -> bool {
        self.clip.duration > 0.0 && self.elapsed < self.total_duration()
    }

    /// The playback position within the clip, wrapping at each repetition.
    pub fn local_time(&self) -> f32 {
        if self.clip.duration <= 0.0 {
            return 0.0;
        }
        if self.is_playing() {
            self.elapsed % self.clip.duration
        } else {
            // Hold the end pose after the final repetition.
            self.clip.duration
        }
    }

    fn total_duration(&self) -> f32 {
        self.clip.duration.max(0.0) * LOOP_REPETITIONS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_exactly_two_repetitions() {
        let mut player = AnimationPlayer::new(AnimationClip::new("walk", 1.0));
        assert!(player.is_playing());

        player.advance(0.5);
        assert!(player.is_playing());
        assert!((player.local_time() - 0.5).abs() < 1e-6);

        player.advance(1.0);
        assert!(player.is_playing());
        assert!((player.local_time() - 0.5).abs() < 1e-6);

        player.advance(0.5);
        assert!(!player.is_playing());
        assert_eq!(player.local_time(), 1.0);
    }

    #[test]
    fn test_local_time_wraps_between_repetitions() {
        let mut player = AnimationPlayer::new(AnimationClip::new("walk", 2.0));
        player.advance(2.5);
        assert!((player.local_time() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_clamps_to_the_end_pose() {
        let mut player = AnimationPlayer::new(AnimationClip::new("walk", 1.0));
        player.advance(100.0);
        assert!(!player.is_playing());
        assert_eq!(player.local_time(), 1.0);

        player.advance(1.0);
        assert_eq!(player.local_time(), 1.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let player = AnimationPlayer::new(AnimationClip::new("pose", 0.0));
        assert!(!player.is_playing());
        assert_eq!(player.local_time(), 0.0);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut player = AnimationPlayer::new(AnimationClip::new("walk", 1.0));
        player.advance(0.4);
        player.advance(-10.0);
        assert!((player.local_time() - 0.4).abs() < 1e-6);
    }
}
