use crate::cli::FeaturesArgs;
use crate::error::{CliError, Result};
use robocrys::core::io::condensed::read_condensed_path;
use robocrys::core::models::structure::CondensedStructure;
use robocrys::engine::config::DescriberConfigBuilder;
use robocrys::workflows::featurize::StructureFeatures;
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::info;

pub fn run(args: FeaturesArgs) -> Result<()> {
    let mut builder = DescriberConfigBuilder::new();
    if let Some(tol) = args.distorted_tol {
        builder = builder.distorted_tol(tol);
    }
    let distorted_tol = builder.build()?.distorted_tol;

    info!("Loading condensed structure from {:?}", &args.input);
    let structure = read_condensed_path(&args.input)?;
    let features = StructureFeatures::new(&structure)
        .map_err(|source| CliError::Describe {
            path: args.input.clone(),
            source,
        })?
        .with_distorted_tol(distorted_tol);

    print!("{}", render_features(&structure, &features));
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// One `name: value` line per feature, with per-geometry and
/// per-coordination fractions for whatever the structure contains.
fn render_features(structure: &CondensedStructure, features: &StructureFeatures<'_>) -> String {
    let dimensionalities = features
        .component_dimensionalities()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut out = String::new();
    let mut line = |name: &str, value: &dyn std::fmt::Display| {
        let _ = writeln!(out, "{name}: {value}");
    };

    line("formula", &structure.formula());
    line("component_dimensionalities", &dimensionalities);
    line("contains_named_molecule", &yes_no(features.contains_named_molecule()));
    line("contains_polyhedra", &yes_no(features.contains_polyhedra()));
    line("is_intercalated", &yes_no(features.is_intercalated()));
    line("is_interpenetrated", &yes_no(features.is_interpenetrated()));
    line(
        "contains_corner_sharing_polyhedra",
        &yes_no(features.contains_corner_sharing_polyhedra()),
    );
    line(
        "contains_edge_sharing_polyhedra",
        &yes_no(features.contains_edge_sharing_polyhedra()),
    );
    line(
        "contains_face_sharing_polyhedra",
        &yes_no(features.contains_face_sharing_polyhedra()),
    );
    line(
        "frac_sites_polyhedra",
        &format!("{:.3}", features.frac_sites_polyhedra()),
    );

    let sites = structure.site_index();
    let geometries: BTreeSet<&str> = sites.values().map(|site| site.geometry().kind()).collect();
    for geometry in geometries {
        line(
            &format!("frac_{}", geometry.replace(' ', "_")),
            &format!("{:.3}", features.frac_site_geometry(geometry)),
        );
        line(
            &format!("distorted_{}", geometry.replace(' ', "_")),
            &yes_no(features.contains_geometry_type(geometry, Some(true))),
        );
    }

    let coordinations: BTreeSet<usize> = sites
        .values()
        .map(|site| site.coordination_number())
        .collect();
    for n in coordinations {
        line(
            &format!("frac_{n}_coordinate"),
            &format!("{:.3}", features.frac_sites_n_coordinate(n)),
        );
    }

    out
}
