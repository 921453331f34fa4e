use crate::grid::{CellState, CongestionMap, CostModel, Grid};
use mazeroute_common::geom::coord::Cell;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Best-first search for the shortest path between two cells on the
/// two-layer grid. The heuristic is Manhattan distance on the target's
/// layer, which never overestimates the true cost since every move costs
/// at least 1.
///
/// `used_cells` holds cells already consumed by other nets (or by this
/// net's own previously completed pin-to-pin segments); the search may
/// step onto one only if it is the target itself.
pub fn find_path(
    grid: &Grid,
    congestion: &CongestionMap,
    cost: &CostModel,
    start: Cell,
    target: Cell,
    used_cells: &std::collections::HashSet<Cell>,
) -> Option<Vec<Cell>> {
    if start == target {
        return Some(vec![start]);
    }

    let mut g_score: HashMap<Cell, i64> = HashMap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut frontier: PriorityQueue<Cell, Reverse<(i64, u64)>> = PriorityQueue::new();
    let mut sequence: u64 = 0;

    g_score.insert(start, 0);
    frontier.push(start, Reverse((heuristic(start, target), sequence)));

    while let Some((current, _)) = frontier.pop() {
        if current == target {
            return Some(reconstruct_path(&came_from, current));
        }

        let current_g = g_score[&current];

        for neighbor in grid.neighbors(current) {
            if !grid.in_bounds(neighbor) {
                continue;
            }
            let blocked = matches!(grid.state(neighbor), CellState::Obstacle | CellState::Routed);
            if blocked {
                continue;
            }
            if used_cells.contains(&neighbor) && neighbor != target {
                continue;
            }

            let step_cost = move_cost(current, neighbor, cost);
            let congestion_penalty =
                (cost.congestion_weight as i64) * congestion.usage(neighbor) as i64;
            let tentative_g = current_g + step_cost + congestion_penalty;

            if tentative_g < *g_score.get(&neighbor).unwrap_or(&i64::MAX) {
                g_score.insert(neighbor, tentative_g);
                came_from.insert(neighbor, current);
                sequence += 1;
                let f_score = tentative_g + heuristic(neighbor, target);
                frontier.push(neighbor, Reverse((f_score, sequence)));
            }
        }
    }

    None
}

fn heuristic(a: Cell, b: Cell) -> i64 {
    a.manhattan(&b) as i64
}

fn move_cost(from: Cell, to: Cell, cost: &CostModel) -> i64 {
    if from.layer != to.layer {
        return cost.via_cost as i64;
    }
    if from.y != to.y {
        return cost.wrong_direction_cost as i64;
    }
    1
}

fn reconstruct_path(came_from: &HashMap<Cell, Cell>, mut current: Cell) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn empty_inputs(w: u32, h: u32) -> (Grid, CongestionMap, CostModel) {
        (
            Grid::new(w, h),
            CongestionMap::new(w, h),
            CostModel::new(10, 2, 2),
        )
    }

    #[test]
    fn finds_a_straight_line_on_an_empty_grid() {
        let (grid, cong, cost) = empty_inputs(5, 5);
        let path = find_path(
            &grid,
            &cong,
            &cost,
            Cell::new(0, 0, 0),
            Cell::new(4, 0, 0),
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Cell::new(0, 0, 0));
        assert_eq!(*path.last().unwrap(), Cell::new(4, 0, 0));
    }

    #[test]
    fn routes_around_an_obstacle_via_the_other_layer() {
        let (mut grid, cong, cost) = empty_inputs(3, 1);
        grid.mark_obstacle(1, 0);
        grid.set_state(Cell::new(1, 0, 1), CellState::Empty);
        let path = find_path(
            &grid,
            &cong,
            &cost,
            Cell::new(0, 0, 0),
            Cell::new(2, 0, 0),
            &HashSet::new(),
        )
        .expect("a detour through layer 1 must exist");
        assert_eq!(path.len(), 5);
        assert!(path.iter().any(|c| c.layer == 1));
    }

    #[test]
    fn obstacle_blocking_both_layers_has_no_path() {
        let (mut grid, cong, cost) = empty_inputs(3, 1);
        grid.mark_obstacle(1, 0);
        let path = find_path(
            &grid,
            &cong,
            &cost,
            Cell::new(0, 0, 0),
            Cell::new(2, 0, 0),
            &HashSet::new(),
        );
        assert!(path.is_none());
    }

    #[test]
    fn returns_none_when_fully_blocked() {
        let (mut grid, cong, cost) = empty_inputs(3, 3);
        for y in 0..3 {
            grid.mark_obstacle(1, y);
        }
        let path = find_path(
            &grid,
            &cong,
            &cost,
            Cell::new(0, 0, 0),
            Cell::new(2, 0, 0),
            &HashSet::new(),
        );
        assert!(path.is_none());
    }

    #[test]
    fn used_cells_are_excluded_except_as_the_target() {
        let (grid, cong, cost) = empty_inputs(3, 1);
        let mut used = HashSet::new();
        used.insert(Cell::new(1, 0, 0));
        let path = find_path(&grid, &cong, &cost, Cell::new(0, 0, 0), Cell::new(1, 0, 0), &used);
        assert!(path.is_some(), "target cell must remain reachable");
    }

    #[test]
    fn congestion_raises_path_cost_but_does_not_block() {
        let (grid, mut cong, cost) = empty_inputs(3, 1);
        cong.add_path(&[Cell::new(1, 0, 0)]);
        let path = find_path(
            &grid,
            &cong,
            &cost,
            Cell::new(0, 0, 0),
            Cell::new(2, 0, 0),
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(path.len(), 3);
    }
}
