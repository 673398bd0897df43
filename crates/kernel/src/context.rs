use crate::stats::FrameStats;
use crate::updateable::UpdateCollector;
use crate::variables::WorldVariables;
use crate::world::World;

/// Number of frames kept for the rolling frame statistics.
const STATS_WINDOW: usize = 120;

/// Per-session state shared by the frame loop and the subsystems it drives.
///
/// Constructed once and passed by reference; nothing in here is global.
#[derive(Debug)]
pub struct AppContext {
    pub variables: WorldVariables,
    pub world: World,
    pub updateables: UpdateCollector,
    pub stats: FrameStats,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            variables: WorldVariables::new(),
            world: World::new(),
            updateables: UpdateCollector::new(),
            stats: FrameStats::new(STATS_WINDOW),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
