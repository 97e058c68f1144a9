/// Minimal finite-state-machine container.
///
/// `S` is the state type (usually an enum). The machine tracks the current state,
/// the previous state, and how long it has been in the current one. Transition
/// rules live with the system that drives it, not here.
///
/// ```
/// use skirmish::fsm::StateMachine;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door { Open, Closed }
///
/// let mut fsm = StateMachine::new(Door::Closed);
/// fsm.tick(0.5);
/// fsm.go(Door::Open);
/// assert!(fsm.just_entered());
/// assert_eq!(fsm.previous, Door::Closed);
/// ```
#[derive(Debug, Clone)]
pub struct StateMachine<S: Clone> {
    pub state: S,
    pub previous: S,
    /// Seconds spent in the current state. Reset on each transition.
    pub elapsed: f32,
    entered_this_tick: bool,
}

impl<S: Clone> StateMachine<S> {
    /// `just_entered()` is true until the first `tick`.
    pub fn new(initial: S) -> Self {
        Self {
            previous: initial.clone(),
            state: initial,
            elapsed: 0.0,
            entered_this_tick: true,
        }
    }

    /// Transition only if `next` is a different variant (by discriminant).
    /// Returns whether a transition happened.
    pub fn go(&mut self, next: S) -> bool {
        if std::mem::discriminant(&self.state) == std::mem::discriminant(&next) {
            return false;
        }
        self.previous = std::mem::replace(&mut self.state, next);
        self.elapsed = 0.0;
        self.entered_this_tick = true;
        true
    }

    /// Advance the in-state timer and clear the `just_entered` flag. Call once per
    /// tick before evaluating transitions.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        self.entered_this_tick = false;
    }

    pub fn just_entered(&self) -> bool {
        self.entered_this_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Light {
        Red,
        Green { lit: f32 },
    }

    #[test]
    fn same_variant_is_not_a_transition() {
        let mut fsm = StateMachine::new(Light::Green { lit: 0.0 });
        fsm.tick(1.0);
        assert!(!fsm.go(Light::Green { lit: 2.0 }));
        assert_eq!(fsm.elapsed, 1.0);
        assert!(!fsm.just_entered());
    }

    #[test]
    fn transition_resets_timer_and_records_previous() {
        let mut fsm = StateMachine::new(Light::Red);
        fsm.tick(0.4);
        assert!(fsm.go(Light::Green { lit: 0.0 }));
        assert_eq!(fsm.previous, Light::Red);
        assert_eq!(fsm.elapsed, 0.0);
        assert!(fsm.just_entered());
        fsm.tick(0.1);
        assert!(!fsm.just_entered());
    }
}
