pub mod algo;
pub mod global_router;
pub mod grid;
pub mod net_router;
pub mod orderer;

use global_router::GlobalRouter;
use mazeroute_common::db::core::{NetlistDB, RoutedNets};
use mazeroute_common::util::config::RouterConfig;

/// Routes every net in `db` and returns the map of successfully routed
/// nets. Never returns an error: per-net failures are logged and simply
/// absent from the result, per the router's failure semantics.
pub fn route(db: &NetlistDB, config: &RouterConfig) -> RoutedNets {
    let router = GlobalRouter::new(db.width, db.height, &db.obstacles, config);
    router.route(&db.nets, config)
}
