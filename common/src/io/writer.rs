use crate::db::core::{NetlistDB, RoutedNets};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Writes one line per successfully routed net:
/// `<net_name> (layer, x, y) (layer, x, y) ...`, layers 1-based. Nets with
/// no entry in `routed` (because they were skipped or failed to route) are
/// omitted entirely.
pub fn write(path: impl AsRef<Path>, db: &NetlistDB, routed: &RoutedNets) -> io::Result<()> {
    let mut file = File::create(path)?;
    for net in &db.nets {
        let Some(cells) = routed.get(&net.name) else {
            continue;
        };
        write!(file, "{}", net.name)?;
        for c in cells {
            write!(file, " ({}, {}, {})", c.layer + 1, c.x, c.y)?;
        }
        writeln!(file)?;
    }
    Ok(())
}
