/*
Segbar - by David Petnick
*/

/// Which Fill Layer an Animation Writes To
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowLayer {
    /// Primary Fill Catches Up (Gain)
    Primary,
    /// Follow Fill Drains (Loss)
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowAnimation {
    pub from: f32,
    pub to: f32,
    pub elapsed: f32,
    pub layer: FollowLayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FollowState {
    #[default]
    Idle,
    Animating(FollowAnimation),
}

/// Result of One Frame of Animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowStep {
    pub layer: FollowLayer,
    pub value: f32,
    pub finished: bool,
}

/// Lagging Value Interpolator, Driven Once per Frame by the Host
///
/// Starting a new animation replaces the old one outright; no progress
/// carries over and nothing is blended.
#[derive(Debug, Clone, Default)]
pub struct FollowAnimator {
    state: FollowState,
    duration: f32,
}

impl FollowAnimator {
    pub fn new(duration: f32) -> Self {
        Self {
            state: FollowState::Idle,
            duration,
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, FollowState::Animating(_))
    }

    /// Drop Any In-Flight Animation; Returns It if There was One
    pub fn cancel(&mut self) -> Option<FollowAnimation> {
        match std::mem::take(&mut self.state) {
            FollowState::Animating(anim) => Some(anim),
            FollowState::Idle => None,
        }
    }

    /// Begin Interpolating `from` -> `to` on `layer`
    /// Returns the t = 0 Step so Caller can Paint First Frame Right Away
    pub fn start(&mut self, from: f32, to: f32, layer: FollowLayer) -> FollowStep {
        self.state = FollowState::Animating(FollowAnimation {
            from,
            to,
            elapsed: 0.0,
            layer,
        });
        FollowStep {
            layer,
            value: from,
            finished: false,
        }
    }

    /// Advance by `dt` Seconds
    /// Returns None While Idle
    pub fn tick(&mut self, dt: f32) -> Option<FollowStep> {
        let FollowState::Animating(anim) = &mut self.state else {
            return None;
        };

        anim.elapsed += dt.max(0.0);

        let t = if self.duration > 0.0 {
            (anim.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let layer = anim.layer;
        if t >= 1.0 {
            let to = anim.to;
            self.state = FollowState::Idle;
            return Some(FollowStep {
                layer,
                value: to,
                finished: true,
            });
        }

        Some(FollowStep {
            layer,
            value: anim.from + (anim.to - anim.from) * t,
            finished: false,
        })
    }
}
