use crate::cli::DescribeArgs;
use crate::config::{MineralMatchingConfig, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::{BatchCallback, BatchProgress, CliProgressHandler};
use rayon::prelude::*;
use robocrys::core::io::condensed::read_condensed_path;
use robocrys::engine::matching::{CandidateTable, RankingCache, StructureKey};
use robocrys::engine::mineral::MineralNamer;
use robocrys::workflows::describe::Describer;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

type SharedRankings = Mutex<RankingCache<CandidateTable>>;

pub fn run(args: DescribeArgs) -> Result<()> {
    let config = build_config(&args)?;
    let describer = Describer::new(config.describer_config.clone());
    let rankings = config
        .mineral_matching
        .as_ref()
        .map(load_rankings)
        .transpose()?;

    let batch = config.inputs.len() > 1;
    let progress = CliProgressHandler::new();
    let callback: Option<BatchCallback> = batch.then(|| progress.get_callback());
    let report = |event: BatchProgress| {
        if let Some(callback) = &callback {
            callback(event);
        }
    };

    info!("Describing {} input file(s).", config.inputs.len());
    report(BatchProgress::Started {
        total: config.inputs.len() as u64,
    });

    let results: Vec<(&PathBuf, Result<String>)> = config
        .inputs
        .par_iter()
        .map(|path| {
            let result = describe_file(&describer, rankings.as_ref(), path);
            let name = display_name(path);
            match &result {
                Ok(_) => report(BatchProgress::FileDone { name }),
                Err(e) => {
                    error!("Failed to describe {:?}: {}", path, e);
                    report(BatchProgress::FileFailed { name });
                }
            }
            (path, result)
        })
        .collect();
    report(BatchProgress::Finished);

    let mut descriptions = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(text) => descriptions.push((path, text)),
            Err(e) => failures.push(e),
        }
    }

    write_descriptions(&descriptions, batch, config.output.as_deref())?;

    match failures.len() {
        0 => Ok(()),
        1 if !batch => Err(failures.remove(0)),
        n => Err(CliError::Other(anyhow::anyhow!(
            "{} of {} input file(s) could not be described",
            n,
            config.inputs.len()
        ))),
    }
}

fn load_rankings(matching: &MineralMatchingConfig) -> Result<SharedRankings> {
    info!("Loading mineral rankings from {:?}", matching.table);
    let table = CandidateTable::from_path(&matching.table)?
        .with_distance_cutoff(matching.distance_cutoff)
        .with_max_matches(matching.max_matches);
    info!("Loaded rankings for {} structure(s).", table.len());
    Ok(Mutex::new(RankingCache::new(table)))
}

/// Rankings are keyed by the file stem, e.g. `mp-149` for `mp-149.json`.
fn structure_key(path: &Path) -> StructureKey {
    StructureKey::new(
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn describe_file(
    describer: &Describer,
    rankings: Option<&SharedRankings>,
    path: &Path,
) -> Result<String> {
    let structure = read_condensed_path(path)?;

    let mineral = match rankings {
        Some(cache) => {
            let mut cache = cache.lock().map_err(|_| {
                CliError::Other(anyhow::anyhow!("Mineral ranking cache lock was poisoned"))
            })?;
            Some(MineralNamer::name_structure(&mut *cache, &structure_key(path)))
        }
        None => None,
    };

    let result = match mineral.filter(|m| m.mineral.is_some()) {
        Some(mineral) => describer.describe_with_mineral(&structure, &mineral),
        None => describer.describe(&structure),
    };
    result.map_err(|source| CliError::Describe {
        path: path.to_path_buf(),
        source,
    })
}

fn write_descriptions(
    descriptions: &[(&PathBuf, String)],
    batch: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut rendered = String::new();
    for (path, text) in descriptions {
        if batch {
            rendered.push_str(&display_name(path));
            rendered.push_str(": ");
        }
        rendered.push_str(text);
        rendered.push('\n');
    }

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Descriptions written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
