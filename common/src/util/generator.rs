use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};

/// Writes a random synthetic input file in the format `io::parser` reads:
/// a random obstacle set followed by nets with randomly placed pins, each
/// pin landing on a free, in-bounds (x, y) and a random layer.
pub fn generate_random_input(
    path: &str,
    width: u32,
    height: u32,
    num_obstacles: usize,
    num_nets: usize,
    pins_per_net: usize,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut file = File::create(path)?;

    log::info!(
        "generating benchmark: {}x{} grid, {} obstacles, {} nets x {} pins -> {}",
        width,
        height,
        num_obstacles,
        num_nets,
        pins_per_net,
        path
    );

    writeln!(file, "{}x{}", width, height)?;

    let mut occupied: HashSet<(u32, u32)> = HashSet::new();
    let mut obstacles = Vec::with_capacity(num_obstacles);
    while obstacles.len() < num_obstacles && occupied.len() < (width as usize) * (height as usize)
    {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        if occupied.insert((x, y)) {
            obstacles.push((x, y));
        }
    }
    for &(x, y) in &obstacles {
        writeln!(file, "OBS ({}, {})", x, y)?;
    }

    for net_id in 0..num_nets {
        write!(file, "net{}", net_id)?;
        let mut placed = 0;
        let mut attempts = 0;
        while placed < pins_per_net && attempts < pins_per_net * 20 {
            attempts += 1;
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            if occupied.contains(&(x, y)) {
                continue;
            }
            let layer = rng.gen_range(1..=2u8);
            write!(file, " ({}, {}, {})", layer, x, y)?;
            placed += 1;
        }
        writeln!(file)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parser;

    #[test]
    fn generated_file_parses_cleanly() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().to_str().unwrap();
        generate_random_input(path, 10, 10, 5, 3, 2).unwrap();
        let db = parser::parse(path).unwrap();
        assert_eq!(db.width, 10);
        assert_eq!(db.height, 10);
        assert_eq!(db.nets.len(), 3);
    }
}
