use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, MineralMatchingConfig};
use crate::cli::DescribeArgs;
use crate::error::{CliError, Result};
use robocrys::engine::config::DescriberConfigBuilder;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub fn build_config(args: &DescribeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        let mut config = FileConfig::from_file(config_path)?;
        resolve_table_path(&mut config, config_path);
        config
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Configuration after --set overrides: {:?}", file_config);

    let describe_file = file_config.describe.take().unwrap_or_default();
    let merge_flag = |disabled_by_cli: bool, file_val: Option<bool>, default: bool| {
        if disabled_by_cli {
            false
        } else {
            file_val.unwrap_or(default)
        }
    };

    let distorted_tol = args
        .distorted_tol
        .or(file_config.distorted_tol)
        .unwrap_or(defaults.distorted_tol);

    let only_cation_polyhedra = args.cation_polyhedra_only
        || describe_file
            .cation_polyhedra_only
            .unwrap_or(defaults.only_describe_cation_polyhedra_connectivity);

    let describer_config = DescriberConfigBuilder::new()
        .distorted_tol(distorted_tol)
        .describe_mineral(merge_flag(
            args.no_mineral,
            describe_file.mineral,
            defaults.describe_mineral,
        ))
        .describe_component_dimensionality(merge_flag(
            args.no_dimensionality,
            describe_file.component_dimensionality,
            defaults.describe_component_dimensionality,
        ))
        .describe_components(merge_flag(
            args.no_components,
            describe_file.components,
            defaults.describe_components,
        ))
        .describe_oxidation_states(merge_flag(
            args.hide_oxidation_states,
            describe_file.oxidation_states,
            defaults.describe_oxidation_states,
        ))
        .only_describe_cation_polyhedra_connectivity(only_cation_polyhedra)
        .describe_bond_lengths(merge_flag(
            args.no_bond_lengths,
            describe_file.bond_lengths,
            defaults.describe_bond_lengths,
        ))
        .build()?;

    let matching_file = file_config.mineral_matching.take().unwrap_or_default();
    let mineral_matching = args
        .mineral_table
        .clone()
        .or(matching_file.table)
        .map(|table| -> Result<MineralMatchingConfig> {
            let distance_cutoff = matching_file
                .distance_cutoff
                .unwrap_or(defaults.distance_cutoff);
            if distance_cutoff.is_nan() || distance_cutoff <= 0.0 {
                return Err(CliError::Config(format!(
                    "`mineral-matching.distance-cutoff` must be positive, got {}",
                    distance_cutoff
                )));
            }
            Ok(MineralMatchingConfig {
                table,
                distance_cutoff,
                max_matches: matching_file.max_matches.or(defaults.max_matches),
            })
        })
        .transpose()?;

    Ok(AppConfig {
        inputs: args.inputs.clone(),
        output: args.output.clone(),
        describer_config,
        mineral_matching,
    })
}

/// Relative table paths in a config file are taken relative to that file.
fn resolve_table_path(config: &mut FileConfig, config_path: &Path) {
    let Some(table) = config
        .mineral_matching
        .as_mut()
        .and_then(|m| m.table.as_mut())
    else {
        return;
    };
    if table.is_relative() {
        if let Some(parent) = config_path.parent() {
            *table = parent.join(&*table);
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "distorted-tol" => {
                config.distorted_tol = Some(parse_value(key, value_str, "float")?);
            }
            "describe.mineral" => {
                config.describe.get_or_insert_with(Default::default).mineral =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "describe.component-dimensionality" => {
                config
                    .describe
                    .get_or_insert_with(Default::default)
                    .component_dimensionality = Some(parse_value(key, value_str, "boolean")?);
            }
            "describe.components" => {
                config.describe.get_or_insert_with(Default::default).components =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "describe.oxidation-states" => {
                config
                    .describe
                    .get_or_insert_with(Default::default)
                    .oxidation_states = Some(parse_value(key, value_str, "boolean")?);
            }
            "describe.cation-polyhedra-only" => {
                config
                    .describe
                    .get_or_insert_with(Default::default)
                    .cation_polyhedra_only = Some(parse_value(key, value_str, "boolean")?);
            }
            "describe.bond-lengths" => {
                config.describe.get_or_insert_with(Default::default).bond_lengths =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "mineral-matching.distance-cutoff" => {
                config
                    .mineral_matching
                    .get_or_insert_with(Default::default)
                    .distance_cutoff = Some(parse_value(key, value_str, "float")?);
            }
            "mineral-matching.max-matches" => {
                config
                    .mineral_matching
                    .get_or_insert_with(Default::default)
                    .max_matches = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
