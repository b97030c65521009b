//! The read/write context handed to a state's `init`/`entry`/`step`/`exit`.

use wheelly_core::Millis;
use wheelly_world::WorldModel;

use crate::blackboard::Blackboard;

/// Everything a state behavior needs for one call: the current world
/// snapshot (read-only, valid for this step only — see
/// [`WorldModel`][wheelly_world::WorldModel]'s own contract), the shared
/// blackboard (read/write), and the current time.
pub struct StepContext<'a> {
    pub world: &'a WorldModel<'a>,
    pub blackboard: &'a mut Blackboard,
    pub now: Millis,
}

impl<'a> StepContext<'a> {
    pub fn new(world: &'a WorldModel<'a>, blackboard: &'a mut Blackboard, now: Millis) -> Self {
        Self { world, blackboard, now }
    }
}
