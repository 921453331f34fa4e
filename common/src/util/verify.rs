use crate::db::core::{NetlistDB, RoutedNets};
use std::collections::HashSet;

/// Post-routing verification pass, mirroring the check-then-report shape of
/// a placement/DRC checker: walk the finished result and report every
/// violation found rather than stopping at the first one.
pub fn check_route_invariants(db: &NetlistDB, routed: &RoutedNets) -> Result<(), String> {
    let mut errors = Vec::new();

    let obstacles: HashSet<(u32, u32)> = db.obstacles.iter().copied().collect();
    let mut seen_cells: HashSet<(u32, u32, u8)> = HashSet::new();

    for net in &db.nets {
        let Some(path) = routed.get(&net.name) else {
            continue;
        };

        if path.is_empty() {
            errors.push(format!("net '{}': routed but path is empty", net.name));
            continue;
        }

        let mut dedup = HashSet::new();
        for c in path {
            if !dedup.insert((c.x, c.y, c.layer)) {
                errors.push(format!(
                    "net '{}': duplicate cell ({}, {}, {})",
                    net.name, c.x, c.y, c.layer
                ));
            }
        }

        for c in path {
            if obstacles.contains(&(c.x, c.y)) {
                errors.push(format!(
                    "net '{}': route passes through obstacle at ({}, {})",
                    net.name, c.x, c.y
                ));
            }
        }

        for w in path.windows(2) {
            let (a, b) = (w[0], w[1]);
            let dx = a.x.abs_diff(b.x);
            let dy = a.y.abs_diff(b.y);
            let dz = a.layer.abs_diff(b.layer);
            let is_step = (dx + dy == 1 && dz == 0) || (dx == 0 && dy == 0 && dz == 1);
            if !is_step {
                errors.push(format!(
                    "net '{}': illegal jump from ({},{},{}) to ({},{},{})",
                    net.name, a.x, a.y, a.layer, b.x, b.y, b.layer
                ));
            }
        }

        for pin in &net.pins {
            if !path.iter().any(|c| *c == *pin) {
                errors.push(format!(
                    "net '{}': pin ({}, {}, {}) missing from route",
                    net.name, pin.x, pin.y, pin.layer
                ));
            }
        }

        let expected_start = net.pins.iter().min_by_key(|p| (p.y, p.x));
        if let Some(expected_start) = expected_start {
            if path[0] != *expected_start {
                errors.push(format!(
                    "net '{}': route starts at ({}, {}, {}), expected ({}, {}, {})",
                    net.name,
                    path[0].x,
                    path[0].y,
                    path[0].layer,
                    expected_start.x,
                    expected_start.y,
                    expected_start.layer
                ));
            }
        }

        for &(x, y, z) in &dedup {
            if !seen_cells.insert((x, y, z)) {
                errors.push(format!(
                    "cell ({}, {}, {}) is shared by more than one routed net",
                    x, y, z
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}
