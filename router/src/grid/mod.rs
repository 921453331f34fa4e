pub mod congestion;
pub mod dense;

pub use congestion::CongestionMap;
pub use dense::{CellState, Grid};

/// The routing cost constants, loaded from [`mazeroute_common::util::config::RouterConfig`].
#[derive(Clone, Copy, Debug)]
pub struct CostModel {
    pub via_cost: u32,
    pub wrong_direction_cost: u32,
    pub congestion_weight: u32,
}

impl CostModel {
    pub fn new(via_cost: u32, wrong_direction_cost: u32, congestion_weight: u32) -> Self {
        Self {
            via_cost,
            wrong_direction_cost,
            congestion_weight,
        }
    }
}

impl From<&mazeroute_common::util::config::RouterConfig> for CostModel {
    fn from(cfg: &mazeroute_common::util::config::RouterConfig) -> Self {
        Self::new(cfg.via_cost, cfg.wrong_direction_cost, cfg.congestion_weight)
    }
}
