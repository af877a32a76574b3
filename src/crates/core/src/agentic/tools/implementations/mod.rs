pub mod attack_tool;
pub mod explore_tool;
pub mod scan_tool;
pub mod util;

pub use attack_tool::AttackEnemyAction;
pub use explore_tool::ExploreAreaAction;
pub use scan_tool::ScanForEnemiesAction;
