use robocrys::core::io::condensed::{JsonFile, read_condensed_path};
use robocrys::core::io::traits::CondensedFile;
use robocrys::core::models::site::Connectivity;
use robocrys::engine::config::DescriberConfigBuilder;
use robocrys::engine::matching::{CandidateTable, RankingCache, StructureKey};
use robocrys::engine::mineral::MineralNamer;
use robocrys::workflows::describe::Describer;
use robocrys::workflows::featurize::StructureFeatures;
use std::fs;
use tempfile::tempdir;

const RUTILE_JSON: &str = r#"{
    "mineral": {"prototype": [{"mineral": "Rutile", "distance": -1.0}]},
    "formula": "SnO2",
    "spg_symbol": "P4_2/mnm",
    "crystal_system": "tetragonal",
    "dimensionality": 3,
    "n_components": 1,
    "components": {
        "3": {
            "SnO2": {
                "dimensionality": 3,
                "count": 1,
                "inequiv_components": [{
                    "count": 1,
                    "sites": [
                        {
                            "id": 0,
                            "element": "Sn4+",
                            "geometry": {"type": "octahedral", "likeness": 0.95},
                            "nn": {"O2-": {"n_sites": 6, "inequiv_groups": [
                                {"n_sites": 6, "dists": [2.05, 2.05, 2.05, 2.05, 2.09, 2.09]}
                            ]}},
                            "nnn": {"corner": [0], "edge": [0]},
                            "poly_formula": "SnO6"
                        },
                        {
                            "id": 1,
                            "element": "O2-",
                            "geometry": {"type": "trigonal planar", "likeness": 0.99},
                            "nn": {"Sn4+": {"n_sites": 3, "inequiv_groups": [
                                {"n_sites": 3, "dists": [2.05, 2.05, 2.09]}
                            ]}}
                        }
                    ]
                }]
            }
        }
    }
}"#;

fn describer() -> Describer {
    Describer::new(
        DescriberConfigBuilder::new()
            .describe_oxidation_states(false)
            .build()
            .unwrap(),
    )
}

#[test]
fn rutile_is_described_end_to_end() {
    let structure = JsonFile::read_from_str(RUTILE_JSON).unwrap();
    let text = describer().describe(&structure).unwrap();
    assert_eq!(
        text,
        "SnO2 is Rutile structured and crystallizes in the tetragonal P4_2/mnm space group. \
         The structure is three-dimensional. \
         The structure contains a mixture of corner- and edge-sharing SnO6 octahedra. \
         O is bonded in a trigonal planar geometry to three equivalent Sn atoms. \
         In this arrangement, there are two shorter (2.05 Å) and one longer (2.09 Å) O–Sn bond length."
    );
}

#[test]
fn reading_from_disk_gives_the_same_description() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("SnO2.json");
    fs::write(&path, RUTILE_JSON).unwrap();

    let from_disk = read_condensed_path(&path).unwrap();
    let in_memory = JsonFile::read_from_str(RUTILE_JSON).unwrap();
    let describer = describer();
    assert_eq!(
        describer.describe(&from_disk).unwrap(),
        describer.describe(&in_memory).unwrap()
    );
}

#[test]
fn provider_rankings_override_embedded_candidates() {
    let structure = JsonFile::read_from_str(RUTILE_JSON).unwrap();
    let table = CandidateTable::from_reader(
        "structure,tier,mineral,distance\nSnO2,fingerprint,Cassiterite,0.05\n".as_bytes(),
    )
    .unwrap();
    let mut cache = RankingCache::new(table);
    let mineral = MineralNamer::name_structure(&mut cache, &StructureKey::from("SnO2"));

    let text = describer().describe_with_mineral(&structure, &mineral).unwrap();
    assert!(text.starts_with("SnO2 is Cassiterite-like structured and"));
}

#[test]
fn features_agree_with_the_description() {
    let structure = JsonFile::read_from_str(RUTILE_JSON).unwrap();
    let features = StructureFeatures::new(&structure).unwrap();
    assert!(features.contains_polyhedra());
    assert!(features.contains_corner_sharing_polyhedra());
    assert!(features.contains_edge_sharing_polyhedra());
    assert!(features.contains_connected_geometry(Connectivity::Edge, "octahedral"));
    assert!(features.is_dimensionality(&[3]));
    assert_eq!(features.frac_sites_polyhedra(), 0.5);
}
