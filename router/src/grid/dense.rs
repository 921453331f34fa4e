use mazeroute_common::geom::coord::Cell;

/// Occupancy state of a single grid cell. `PinTemp` exists only for the
/// duration of one net's routing attempt: it marks the net's own
/// not-yet-reached pins so the search can pass through them freely while
/// still treating every other net's pins as ordinary obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Obstacle,
    PinTemp,
    Routed,
}

/// Flattened two-layer occupancy grid. Index order matches the teacher's
/// dense grid: `layer * width * height + y * width + x`.
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

const LAYERS: u32 = 2;

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize) * (LAYERS as usize);
        Self {
            width,
            height,
            cells: vec![CellState::Empty; size],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, c: Cell) -> usize {
        (c.layer as usize) * (self.width as usize) * (self.height as usize)
            + (c.y as usize) * (self.width as usize)
            + (c.x as usize)
    }

    #[inline]
    pub fn in_bounds(&self, c: Cell) -> bool {
        c.x < self.width && c.y < self.height && (c.layer as u32) < LAYERS
    }

    pub fn state(&self, c: Cell) -> CellState {
        self.cells[self.index(c)]
    }

    pub fn set_state(&mut self, c: Cell, state: CellState) {
        let idx = self.index(c);
        self.cells[idx] = state;
    }

    pub fn mark_obstacle(&mut self, x: u32, y: u32) {
        for layer in 0..LAYERS as u8 {
            self.set_state(Cell::new(x, y, layer), CellState::Obstacle);
        }
    }

    pub fn is_blocked(&self, c: Cell) -> bool {
        matches!(self.state(c), CellState::Obstacle | CellState::Routed)
    }

    /// The four same-layer Manhattan neighbors plus the via neighbor on the
    /// other layer, filtered to the grid bounds.
    pub fn neighbors(&self, c: Cell) -> Vec<Cell> {
        let mut out = Vec::with_capacity(5);
        if c.x > 0 {
            out.push(Cell::new(c.x - 1, c.y, c.layer));
        }
        if c.x + 1 < self.width {
            out.push(Cell::new(c.x + 1, c.y, c.layer));
        }
        if c.y > 0 {
            out.push(Cell::new(c.x, c.y - 1, c.layer));
        }
        if c.y + 1 < self.height {
            out.push(Cell::new(c.x, c.y + 1, c.layer));
        }
        let other_layer = 1 - c.layer;
        if (other_layer as u32) < LAYERS {
            out.push(Cell::new(c.x, c.y, other_layer));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_blocks_both_layers() {
        let mut g = Grid::new(3, 3);
        g.mark_obstacle(1, 1);
        assert!(g.is_blocked(Cell::new(1, 1, 0)));
        assert!(g.is_blocked(Cell::new(1, 1, 1)));
    }

    #[test]
    fn neighbors_include_via_and_exclude_out_of_bounds() {
        let g = Grid::new(3, 3);
        let n = g.neighbors(Cell::new(0, 0, 0));
        assert!(n.contains(&Cell::new(1, 0, 0)));
        assert!(n.contains(&Cell::new(0, 1, 0)));
        assert!(n.contains(&Cell::new(0, 0, 1)));
        assert!(!n.iter().any(|c| c.x == u32::MAX));
        assert_eq!(n.len(), 3);
    }
}
