use crate::grid::{CellState, CongestionMap, CostModel, Grid};
use crate::net_router;
use crate::orderer;
use mazeroute_common::db::core::{Net, RoutedNets};
use mazeroute_common::geom::coord::Cell;
use mazeroute_common::util::config::RouterConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

/// Points a net can be scored against during rip-up: its name plus the path
/// it currently occupies.
struct Routed {
    path: Vec<Cell>,
}

/// Owns the grid, congestion map, and routed-nets map for one routing run
/// and drives the first pass plus the bounded rip-up loop.
pub struct GlobalRouter {
    grid: Grid,
    congestion: CongestionMap,
    used_cells: HashSet<Cell>,
    routed: HashMap<String, Routed>,
    cost: CostModel,
    rng: StdRng,
}

impl GlobalRouter {
    pub fn new(width: u32, height: u32, obstacles: &[(u32, u32)], config: &RouterConfig) -> Self {
        let mut grid = Grid::new(width, height);
        for &(x, y) in obstacles {
            grid.mark_obstacle(x, y);
        }
        Self {
            grid,
            congestion: CongestionMap::new(width, height),
            used_cells: HashSet::new(),
            routed: HashMap::new(),
            cost: CostModel::from(config),
            rng: StdRng::seed_from_u64(config.rng_seed),
        }
    }

    /// Runs the net orderer, routes the first pass, then runs the bounded
    /// rip-up loop. Returns the final map of successfully routed nets.
    pub fn route(mut self, nets: &[Net], config: &RouterConfig) -> RoutedNets {
        let order = orderer::order(nets, &config.orderer.strategy);

        let mut failed: Vec<usize> = Vec::new();
        for &idx in &order {
            let net = &nets[idx];
            if net.pins.len() < 2 {
                log::warn!("net '{}' has fewer than two pins, skipping", net.name);
                continue;
            }
            if !self.try_route(net) {
                failed.push(idx);
            }
        }

        log::info!(
            "first pass: {}/{} nets routed, {} failed",
            self.routed.len(),
            nets.len(),
            failed.len()
        );

        self.rip_up_loop(nets, &mut failed, config.max_rip_up_iterations);

        if !failed.is_empty() {
            log::warn!(
                "{} nets still unrouted after rip-up: {:?}",
                failed.len(),
                failed.iter().map(|&i| nets[i].name.as_str()).collect::<Vec<_>>()
            );
        }

        self.routed
            .into_iter()
            .map(|(name, r)| (name, r.path))
            .collect()
    }

    fn try_route(&mut self, net: &Net) -> bool {
        match net_router::route_net(net, &mut self.grid, &self.congestion, &self.cost, &self.used_cells) {
            Some(path) => {
                self.congestion.add_path(&path);
                self.used_cells.extend(path.iter().copied());
                self.routed.insert(net.name.clone(), Routed { path });
                true
            }
            None => false,
        }
    }

    /// Removes a previously routed net from the grid, congestion map, and
    /// used-cells set, restoring its non-pin cells to `Empty`.
    fn rip_up(&mut self, net: &Net) -> Option<Vec<Cell>> {
        let Routed { path } = self.routed.remove(&net.name)?;
        self.congestion.remove_path(&path);
        for &c in &path {
            self.used_cells.remove(&c);
            if !net.pins.contains(&c) {
                self.grid.set_state(c, CellState::Empty);
            }
        }
        for &pin in &net.pins {
            self.grid.set_state(pin, CellState::Empty);
        }
        Some(path)
    }

    fn conflict_score(&self, candidate_path: &[Cell], failing: &Net) -> u32 {
        let mut score = 0u32;
        for &c in candidate_path {
            for pin in &failing.pins {
                if c.layer == pin.layer && c.manhattan(pin) <= 2 {
                    score += 5;
                }
            }
        }
        score
    }

    fn rip_up_loop(&mut self, nets: &[Net], failed: &mut Vec<usize>, max_iterations: u32) {
        for iteration in 0..max_iterations {
            if failed.is_empty() {
                break;
            }
            let going_in = failed.len();
            let mut next_failed = Vec::new();

            for &f_idx in failed.iter() {
                let failing = &nets[f_idx];

                let mut scored: Vec<(usize, f64)> = self
                    .routed
                    .iter()
                    .map(|(name, r)| {
                        let name_idx = nets.iter().position(|n| &n.name == name).unwrap();
                        let conflict = self.conflict_score(&r.path, failing) as f64;
                        let congestion = self.congestion.path_congestion(&r.path) as f64;
                        let denom = r.path.len() as f64 + 1.0;
                        (name_idx, (conflict + congestion) / denom)
                    })
                    .collect();

                scored.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .unwrap()
                        .then_with(|| a.0.cmp(&b.0))
                });
                let chosen: Vec<usize> = scored.into_iter().take(3).map(|(idx, _)| idx).collect();

                if chosen.is_empty() {
                    next_failed.push(f_idx);
                    continue;
                }

                let ripped: Vec<usize> = chosen
                    .into_iter()
                    .filter(|&idx| self.rip_up(&nets[idx]).is_some())
                    .collect();

                if self.try_route(failing) {
                    log::info!(
                        "rip-up iter {}: '{}' routed after ripping up {} nets",
                        iteration,
                        failing.name,
                        ripped.len()
                    );
                    for &idx in &ripped {
                        if !self.try_route(&nets[idx]) {
                            next_failed.push(idx);
                        }
                    }
                } else {
                    for &idx in &ripped {
                        self.try_route(&nets[idx]);
                    }
                    next_failed.push(f_idx);
                }
            }

            *failed = next_failed;

            if failed.len() == going_in {
                failed.shuffle(&mut self.rng);
            }
        }
    }
}
