use crate::algo::astar;
use crate::grid::{CellState, CongestionMap, CostModel, Grid};
use mazeroute_common::db::core::Net;
use mazeroute_common::geom::coord::Cell;
use std::collections::HashSet;

/// Routes one net by nearest-pin tree growth: start from the pin with the
/// lowest (y, x); at each step, evaluate every (source, remaining target)
/// pair with a full path search and extend the tree with whichever pair
/// produced the shortest path. Returns the deduplicated, order-preserving
/// cell sequence on success.
///
/// While routing this net, its own unreached pins are marked
/// [`CellState::PinTemp`] on the grid so the search may cross them freely;
/// the target pin under evaluation is briefly cleared to `Empty` so it can
/// be reached as an ordinary destination. All temporary marks are restored
/// before returning, whether the net succeeded or failed.
pub fn route_net(
    net: &Net,
    grid: &mut Grid,
    congestion: &CongestionMap,
    cost: &CostModel,
    used_cells: &HashSet<Cell>,
) -> Option<Vec<Cell>> {
    if net.pins.len() < 2 {
        log::warn!("net '{}' has fewer than two pins, skipping", net.name);
        return None;
    }

    for &pin in &net.pins {
        grid.set_state(pin, CellState::PinTemp);
    }

    let result = route_net_inner(net, grid, congestion, cost, used_cells);

    match &result {
        Some(_) => {
            for &pin in &net.pins {
                grid.set_state(pin, CellState::Routed);
            }
        }
        None => {
            for &pin in &net.pins {
                grid.set_state(pin, CellState::Empty);
            }
        }
    }

    result
}

fn route_net_inner(
    net: &Net,
    grid: &mut Grid,
    congestion: &CongestionMap,
    cost: &CostModel,
    used_cells: &HashSet<Cell>,
) -> Option<Vec<Cell>> {
    let mut targets: Vec<Cell> = net.pins.clone();
    let start_idx = targets
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| (c.y, c.x))
        .map(|(i, _)| i)
        .unwrap();
    let start = targets.remove(start_idx);

    let mut sources = vec![start];
    let mut route = vec![start];

    while !targets.is_empty() {
        let mut best: Option<(usize, Vec<Cell>)> = None;

        for &source in &sources {
            for (target_idx, &target) in targets.iter().enumerate() {
                grid.set_state(target, CellState::Empty);

                if let Some(path) = astar::find_path(grid, congestion, cost, source, target, used_cells) {
                    let shorter = match &best {
                        None => true,
                        Some((_, best_path)) => path.len() < best_path.len(),
                    };
                    if shorter {
                        best = Some((target_idx, path));
                    }
                }

                grid.set_state(target, CellState::PinTemp);
            }
        }

        let (target_idx, path) = best?;
        let target = targets.remove(target_idx);

        for &c in &path {
            if !net.pins.contains(&c) {
                grid.set_state(c, CellState::Routed);
            }
        }

        route.extend(path.into_iter().skip(1));
        sources.push(target);
    }

    Some(dedup_preserve_order(route))
}

fn dedup_preserve_order(path: Vec<Cell>) -> Vec<Cell> {
    let mut seen = HashSet::new();
    path.into_iter().filter(|c| seen.insert(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(name: &str, pins: Vec<Cell>) -> Net {
        let mut n = Net::new(name.to_string());
        n.pins = pins;
        n
    }

    #[test]
    fn routes_a_two_pin_net_on_an_empty_grid() {
        let mut grid = Grid::new(5, 5);
        let cong = CongestionMap::new(5, 5);
        let cost = CostModel::new(10, 2, 2);
        let n = net("n1", vec![Cell::new(0, 0, 0), Cell::new(4, 0, 0)]);
        let path = route_net(&n, &mut grid, &cong, &cost, &HashSet::new()).unwrap();
        assert_eq!(path[0], Cell::new(0, 0, 0));
        assert_eq!(*path.last().unwrap(), Cell::new(4, 0, 0));
    }

    #[test]
    fn starts_at_the_pin_with_lowest_y_then_lowest_x() {
        let mut grid = Grid::new(5, 5);
        let cong = CongestionMap::new(5, 5);
        let cost = CostModel::new(10, 2, 2);
        let n = net("n1", vec![Cell::new(3, 2, 0), Cell::new(0, 0, 0), Cell::new(1, 0, 0)]);
        let path = route_net(&n, &mut grid, &cong, &cost, &HashSet::new()).unwrap();
        assert_eq!(path[0], Cell::new(0, 0, 0));
    }

    #[test]
    fn fails_cleanly_when_blocked_and_restores_pin_temp_marks() {
        let mut grid = Grid::new(3, 1);
        grid.mark_obstacle(1, 0);
        let cong = CongestionMap::new(3, 1);
        let cost = CostModel::new(10, 2, 2);
        let n = net("n1", vec![Cell::new(0, 0, 0), Cell::new(2, 0, 0)]);
        let path = route_net(&n, &mut grid, &cong, &cost, &HashSet::new());
        assert!(path.is_none());
        assert_eq!(grid.state(Cell::new(0, 0, 0)), CellState::Empty);
        assert_eq!(grid.state(Cell::new(2, 0, 0)), CellState::Empty);
    }

    #[test]
    fn three_pin_net_grows_a_tree_and_covers_every_pin() {
        let mut grid = Grid::new(6, 6);
        let cong = CongestionMap::new(6, 6);
        let cost = CostModel::new(10, 2, 2);
        let pins = vec![
            Cell::new(0, 0, 0),
            Cell::new(5, 0, 0),
            Cell::new(0, 5, 0),
        ];
        let n = net("n1", pins.clone());
        let path = route_net(&n, &mut grid, &cong, &cost, &HashSet::new()).unwrap();
        for pin in pins {
            assert!(path.contains(&pin));
        }
    }

    #[test]
    fn single_pin_net_is_skipped() {
        let mut grid = Grid::new(3, 3);
        let cong = CongestionMap::new(3, 3);
        let cost = CostModel::new(10, 2, 2);
        let n = net("n1", vec![Cell::new(0, 0, 0)]);
        assert!(route_net(&n, &mut grid, &cong, &cost, &HashSet::new()).is_none());
    }

    #[test]
    fn successfully_routed_net_marks_pins_and_path_as_routed() {
        let mut grid = Grid::new(5, 5);
        let cong = CongestionMap::new(5, 5);
        let cost = CostModel::new(10, 2, 2);
        let n = net("n1", vec![Cell::new(0, 0, 0), Cell::new(4, 0, 0)]);
        route_net(&n, &mut grid, &cong, &cost, &HashSet::new()).unwrap();
        assert_eq!(grid.state(Cell::new(0, 0, 0)), CellState::Routed);
        assert_eq!(grid.state(Cell::new(4, 0, 0)), CellState::Routed);
        assert_eq!(grid.state(Cell::new(2, 0, 0)), CellState::Routed);
    }
}
