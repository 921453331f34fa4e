use crate::geom::coord::Cell;
use std::collections::HashMap;

/// Net name -> deduplicated, order-preserving route cell sequence. Entries
/// appear only for successfully routed nets.
pub type RoutedNets = HashMap<String, Vec<Cell>>;

/// One net: a name and its ordered list of required pin cells.
#[derive(Clone, Debug)]
pub struct Net {
    pub name: String,
    pub pins: Vec<Cell>,
}

impl Net {
    pub fn new(name: String) -> Self {
        Self {
            name,
            pins: Vec::new(),
        }
    }

    /// Sum of Manhattan distances between consecutive pins, in the order
    /// they were parsed. Used by the net orderer to estimate difficulty.
    pub fn estimated_length(&self) -> u32 {
        self.pins
            .windows(2)
            .map(|w| w[0].manhattan(&w[1]))
            .sum()
    }

    /// Axis-aligned bounding box area of the pin set, used by the
    /// supplemental bounding-box ordering strategy.
    pub fn bounding_box_area(&self) -> u64 {
        let Some(first) = self.pins.first() else {
            return u64::MAX;
        };
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in &self.pins {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x + 1) as u64 * (max_y - min_y + 1) as u64
    }
}

/// The parsed design: grid dimensions, obstacles, and nets. Built by the
/// input parser; consumed by the router.
#[derive(Debug)]
pub struct NetlistDB {
    pub width: u32,
    pub height: u32,
    /// (x, y) pairs; an obstacle blocks both layers at that coordinate.
    pub obstacles: Vec<(u32, u32)>,
    pub nets: Vec<Net>,
    pub net_name_map: HashMap<String, usize>,
}

impl NetlistDB {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            obstacles: Vec::new(),
            nets: Vec::new(),
            net_name_map: HashMap::new(),
        }
    }

    pub fn add_obstacle(&mut self, x: u32, y: u32) {
        self.obstacles.push((x, y));
    }

    /// Returns the existing net with this name, or creates a new one.
    pub fn net_mut(&mut self, name: &str) -> &mut Net {
        if let Some(&idx) = self.net_name_map.get(name) {
            return &mut self.nets[idx];
        }
        let idx = self.nets.len();
        self.nets.push(Net::new(name.to_string()));
        self.net_name_map.insert(name.to_string(), idx);
        &mut self.nets[idx]
    }

    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimated_length_sums_consecutive_manhattan_distances() {
        let mut net = Net::new("n1".to_string());
        net.pins.push(Cell::new(0, 0, 0));
        net.pins.push(Cell::new(3, 0, 0));
        net.pins.push(Cell::new(3, 4, 0));
        assert_eq!(net.estimated_length(), 7);
    }

    #[test]
    fn single_pin_net_has_zero_length() {
        let mut net = Net::new("n1".to_string());
        net.pins.push(Cell::new(2, 2, 0));
        assert_eq!(net.estimated_length(), 0);
    }

    #[test]
    fn net_mut_reuses_existing_net_by_name() {
        let mut db = NetlistDB::new(10, 10);
        db.net_mut("a").pins.push(Cell::new(0, 0, 0));
        db.net_mut("a").pins.push(Cell::new(1, 1, 1));
        assert_eq!(db.nets.len(), 1);
        assert_eq!(db.nets[0].pins.len(), 2);
    }
}
