use crate::clusterer::ClusterId;

/// Cluster colours in id order: red, green, blue, purple, yellow
pub const CLUSTER_COLORS: [&str; 5] = [
    "rgb(239 68 68)",
    "rgb(34 197 94)",
    "rgb(59 130 246)",
    "rgb(168 85 247)",
    "rgb(234 179 8)",
];

/// Colour for points with no cluster yet
pub const UNASSIGNED_COLOR: &str = "rgb(156 163 175)";

/// Colour a renderer should use for a point or centroid. Ids wrap around the palette.
pub fn color_for(cluster_id: Option<ClusterId>) -> &'static str {
    match cluster_id {
        Some(id) => CLUSTER_COLORS[id % CLUSTER_COLORS.len()],
        None => UNASSIGNED_COLOR,
    }
}
