use crate::archive::{fetch_archive, ArchiveSource, HttpArchiveSource, TempWorkspace};
use crate::error::Result;
use crate::models::{LegendOutcome, LegendRequest};
use crate::processors::aggregator::{Aggregator, MissingFilePolicy};
use crate::processors::input_validator::{
    expand_federation_units, validate_encoding, validate_year, YearCheck,
};
use crate::processors::transliterator::transliterate;
use crate::readers::LegendReader;
use crate::settings::Settings;
use crate::utils::filename::export_base_name;
use crate::utils::progress::ProgressReporter;
use crate::writers::export;
use std::fmt;
use tracing::{info, info_span, warn};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    Aggregating,
    PostProcessing,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Fetching => "fetching",
            Stage::Aggregating => "aggregating",
            Stage::PostProcessing => "post-processing",
            Stage::Cleanup => "cleanup",
        };
        write!(f, "{}", name)
    }
}

fn enter(stage: Stage, progress: Option<&ProgressReporter>) {
    info!(%stage, "entering stage");
    if let Some(p) = progress {
        p.set_message(&format!("{}...", stage));
    }
}

/// Download, aggregate and normalize one year's coalition records.
pub fn legend_local(request: &LegendRequest, settings: &Settings) -> Result<LegendOutcome> {
    let source = HttpArchiveSource::new(settings)?;
    run_pipeline(request, settings, &source, None)
}

/// Run the pipeline against any archive source.
///
/// Input problems fail before anything touches the network or disk. Once
/// the work area exists, every exit path removes it.
pub fn run_pipeline(
    request: &LegendRequest,
    settings: &Settings,
    source: &dyn ArchiveSource,
    progress: Option<&ProgressReporter>,
) -> Result<LegendOutcome> {
    let span = info_span!("legend_local", year = request.year);
    let _guard = span.enter();

    enter(Stage::Validating, progress);
    settings.validate()?;
    let year_check = validate_year(request.year)?;
    let encoding = validate_encoding(&request.source_encoding)?;
    let units = expand_federation_units(&request.federation_units)?;
    let policy = MissingFilePolicy::for_selection(&request.federation_units);

    if let YearCheck::Unavailable { message } = year_check {
        info!("{}", message);
        return Ok(LegendOutcome::Unavailable {
            year: request.year,
            message,
        });
    }

    enter(Stage::Fetching, progress);
    let workspace = TempWorkspace::new(&settings.work_dir, request.year)?;
    let directory = fetch_archive(source, &workspace, request.year)?;

    enter(Stage::Aggregating, progress);
    let aggregator = Aggregator::new(LegendReader::new(encoding), request.year);
    let mut table = aggregator.aggregate(&directory, &units, policy)?;

    enter(Stage::PostProcessing, progress);
    if request.transliterate {
        table = transliterate(&table);
    }
    let exported = if request.export {
        export(
            &table,
            &export_base_name(request.year),
            &settings.output_dir,
            &settings.compression,
        )?
    } else {
        Vec::new()
    };

    enter(Stage::Cleanup, progress);
    if let Err(e) = workspace.close() {
        warn!(error = %e, "work area cleanup failed");
    }

    Ok(LegendOutcome::Table { table, exported })
}
