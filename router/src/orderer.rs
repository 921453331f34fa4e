use mazeroute_common::db::core::Net;

/// Returns net indices in the order the global router should attempt them.
/// `"length"` (the default) sorts ascending by [`Net::estimated_length`];
/// `"bbox"` sorts ascending by bounding-box area, falling back to length to
/// break ties, mirroring the heuristic the original net-ordering pass used
/// for nets whose pins are clustered but whose pin-to-pin path is long.
pub fn order(nets: &[Net], strategy: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..nets.len()).collect();
    match strategy {
        "bbox" => indices.sort_by_key(|&i| (nets[i].bounding_box_area(), nets[i].estimated_length())),
        _ => indices.sort_by_key(|&i| nets[i].estimated_length()),
    }
    indices
}
