use phf::{Map, phf_map};

/// Coordination geometries whose polyhedra can share corners, edges or faces,
/// in the order they are described.
pub const CONNECTED_GEOMETRIES: [&str; 10] = [
    "tetrahedral",
    "octahedral",
    "trigonal pyramidal",
    "square pyramidal",
    "trigonal bipyramidal",
    "pentagonal pyramidal",
    "hexagonal pyramidal",
    "pentagonal bipyramidal",
    "hexagonal bipyramidal",
    "cuboctahedral",
];

static GEOMETRY_TO_POLYHEDRA: Map<&'static str, &'static str> = phf_map! {
    "tetrahedral" => "tetrahedra",
    "octahedral" => "octahedra",
    "trigonal pyramidal" => "trigonal pyramids",
    "square pyramidal" => "square pyramids",
    "trigonal bipyramidal" => "trigonal bipyramids",
    "pentagonal pyramidal" => "pentagonal pyramids",
    "hexagonal pyramidal" => "hexagonal pyramids",
    "pentagonal bipyramidal" => "pentagonal bipyramids",
    "hexagonal bipyramidal" => "hexagonal bipyramids",
    "cuboctahedral" => "cuboctahedra",
};

pub fn is_connected_geometry(geometry: &str) -> bool {
    GEOMETRY_TO_POLYHEDRA.contains_key(geometry)
}

/// Plural polyhedron noun for a geometry, e.g. `octahedral` → `octahedra`.
pub fn polyhedra_noun(geometry: &str) -> Option<&'static str> {
    GEOMETRY_TO_POLYHEDRA.get(geometry).copied()
}

/// Priority of a geometry in [`CONNECTED_GEOMETRIES`].
pub fn connected_geometry_rank(geometry: &str) -> Option<usize> {
    CONNECTED_GEOMETRIES.iter().position(|&g| g == geometry)
}

/// Singular shape noun for a component of the given dimensionality.
pub fn dimensionality_to_shape(dimensionality: u8) -> &'static str {
    match dimensionality {
        0 => "cluster",
        1 => "ribbon",
        2 => "sheet",
        _ => "framework",
    }
}
