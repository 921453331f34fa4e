use crate::db::core::NetlistDB;
use crate::util::error::RouterError;
use std::fs;
use std::path::Path;

/// Parses the line-oriented maze-router input format:
///
/// ```text
/// <width>x<height>
/// OBS (x, y)
/// <net_name> (layer, x, y) (layer, x, y) ...
/// ```
///
/// Layer values in the file are 1-based; stored 0-based. Pins outside the
/// grid are dropped silently. Blank lines are ignored. Returns a fatal
/// [`RouterError`] for a missing file, a malformed size line, an
/// over-large grid, or a line that matches neither pattern.
pub fn parse(path: impl AsRef<Path>) -> Result<NetlistDB, RouterError> {
    parse_with_max_size(path, 1000)
}

pub fn parse_with_max_size(
    path: impl AsRef<Path>,
    max_grid_size: u32,
) -> Result<NetlistDB, RouterError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|_| RouterError::MissingInputFile(path.display().to_string()))?;

    let mut lines = text.lines().enumerate();

    let (_, size_line) = lines
        .next()
        .ok_or_else(|| RouterError::MalformedSizeLine(String::new()))?;
    let (width, height) = parse_size_line(size_line)?;

    if width > max_grid_size || height > max_grid_size {
        return Err(RouterError::GridTooLarge {
            width,
            height,
            max: max_grid_size,
        });
    }

    let mut db = NetlistDB::new(width, height);

    for (line_no, raw_line) in lines {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }

        if tokens[0].eq_ignore_ascii_case("OBS") {
            parse_obstacle_line(&mut db, &tokens, line_no + 1, line)?;
        } else {
            parse_net_line(&mut db, &tokens, line_no + 1, line)?;
        }
    }

    reject_pins_on_obstacles(&db)?;

    Ok(db)
}

/// Splits `<width>x<height>` (case-insensitive 'x') into its two integers.
fn parse_size_line(line: &str) -> Result<(u32, u32), RouterError> {
    let lower = line.trim().to_lowercase();
    let (w, h) = lower
        .split_once('x')
        .ok_or_else(|| RouterError::MalformedSizeLine(line.to_string()))?;
    let width: u32 = w
        .trim()
        .parse()
        .map_err(|_| RouterError::MalformedSizeLine(line.to_string()))?;
    let height: u32 = h
        .trim()
        .parse()
        .map_err(|_| RouterError::MalformedSizeLine(line.to_string()))?;
    Ok((width, height))
}

/// Breaks a line into whitespace-separated tokens after stripping the
/// `(`, `)`, and `,` punctuation the coordinate tuples use.
fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c == '(' || c == ')' || c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_obstacle_line(
    db: &mut NetlistDB,
    tokens: &[&str],
    line_no: usize,
    raw: &str,
) -> Result<(), RouterError> {
    if tokens.len() != 3 {
        return Err(RouterError::UnparseableLine {
            line_no,
            text: raw.to_string(),
        });
    }
    let x: u32 = tokens[1].parse().map_err(|_| RouterError::UnparseableLine {
        line_no,
        text: raw.to_string(),
    })?;
    let y: u32 = tokens[2].parse().map_err(|_| RouterError::UnparseableLine {
        line_no,
        text: raw.to_string(),
    })?;
    db.add_obstacle(x, y);
    Ok(())
}

fn parse_net_line(
    db: &mut NetlistDB,
    tokens: &[&str],
    line_no: usize,
    raw: &str,
) -> Result<(), RouterError> {
    if tokens.len() < 4 || (tokens.len() - 1) % 3 != 0 {
        return Err(RouterError::UnparseableLine {
            line_no,
            text: raw.to_string(),
        });
    }

    let net_name = tokens[0].to_string();
    let width = db.width;
    let height = db.height;
    let net = db.net_mut(&net_name);

    for chunk in tokens[1..].chunks(3) {
        let layer_1based: u8 = chunk[0].parse().map_err(|_| RouterError::UnparseableLine {
            line_no,
            text: raw.to_string(),
        })?;
        let x: u32 = chunk[1].parse().map_err(|_| RouterError::UnparseableLine {
            line_no,
            text: raw.to_string(),
        })?;
        let y: u32 = chunk[2].parse().map_err(|_| RouterError::UnparseableLine {
            line_no,
            text: raw.to_string(),
        })?;

        if layer_1based == 0 {
            return Err(RouterError::UnparseableLine {
                line_no,
                text: raw.to_string(),
            });
        }
        let layer = layer_1based - 1;

        if x >= width || y >= height {
            log::warn!(
                "line {}: dropping out-of-bounds pin ({}, {}, layer {}) for net '{}'",
                line_no,
                x,
                y,
                layer_1based,
                net_name
            );
            continue;
        }

        net.pins.push(crate::geom::coord::Cell::new(x, y, layer));
    }

    Ok(())
}

fn reject_pins_on_obstacles(db: &NetlistDB) -> Result<(), RouterError> {
    use std::collections::HashSet;
    let obstacles: HashSet<(u32, u32)> = db.obstacles.iter().copied().collect();
    for net in &db.nets {
        for pin in &net.pins {
            if obstacles.contains(&(pin.x, pin.y)) {
                return Err(RouterError::PinOnObstacle {
                    net: net.name.clone(),
                    x: pin.x,
                    y: pin.y,
                    layer: pin.layer,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_size_obstacle_and_net() {
        let f = write_temp("5x5\nOBS (1, 1)\nn1 (1, 0, 0) (1, 4, 4)\n");
        let db = parse(f.path()).unwrap();
        assert_eq!(db.width, 5);
        assert_eq!(db.height, 5);
        assert_eq!(db.obstacles, vec![(1, 1)]);
        assert_eq!(db.nets.len(), 1);
        assert_eq!(db.nets[0].pins.len(), 2);
        assert_eq!(db.nets[0].pins[0].layer, 0);
    }

    #[test]
    fn size_line_is_case_insensitive() {
        let f = write_temp("3X4\n");
        let db = parse(f.path()).unwrap();
        assert_eq!((db.width, db.height), (3, 4));
    }

    #[test]
    fn drops_out_of_bounds_pins_silently() {
        let f = write_temp("3x3\nn1 (1, 0, 0) (1, 9, 9)\n");
        let db = parse(f.path()).unwrap();
        assert_eq!(db.nets[0].pins.len(), 1);
    }

    #[test]
    fn accepts_pins_on_layer_two() {
        let f = write_temp("3x3\nn1 (2, 0, 0) (2, 1, 1)\n");
        let db = parse(f.path()).unwrap();
        assert_eq!(db.nets[0].pins[0].layer, 1);
    }

    #[test]
    fn oversized_grid_is_fatal() {
        let f = write_temp("2000x2000\n");
        let err = parse_with_max_size(f.path(), 1000).unwrap_err();
        assert!(matches!(err, RouterError::GridTooLarge { .. }));
    }

    #[test]
    fn pin_on_obstacle_is_rejected() {
        let f = write_temp("3x3\nOBS (1, 1)\nn1 (1, 1, 1) (1, 2, 2)\n");
        let err = parse(f.path()).unwrap_err();
        assert!(matches!(err, RouterError::PinOnObstacle { .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = parse("/nonexistent/path/input.txt").unwrap_err();
        assert!(matches!(err, RouterError::MissingInputFile(_)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let f = write_temp("3x3\n\nOBS (0, 0)\n\nn1 (1, 1, 1) (1, 2, 2)\n");
        let db = parse(f.path()).unwrap();
        assert_eq!(db.obstacles.len(), 1);
        assert_eq!(db.nets.len(), 1);
    }
}
