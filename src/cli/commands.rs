use crate::archive::{ArchiveSource, HttpArchiveSource, LocalArchiveSource};
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{CoalitionTable, LegendOutcome, LegendRequest, UnitSelection};
use crate::processors::{run_pipeline, validate_year, YearCheck};
use crate::settings::Settings;
use crate::utils::constants::LOCAL_ELECTION_YEARS;
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;

pub fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Commands::Fetch {
            year,
            uf,
            transliterate,
            encoding,
            export,
            output_dir,
            archive,
            compression,
            sample,
            json,
        } => {
            let mut settings = settings;
            if let Some(dir) = output_dir {
                settings = settings.with_output_dir(dir);
            }
            if let Some(compression) = compression {
                settings.compression = compression;
            }

            let request = LegendRequest::new(year)
                .with_federation_units(uf.parse::<UnitSelection>()?)
                .with_transliterate(transliterate)
                .with_source_encoding(encoding)
                .with_export(export);

            let source: Box<dyn ArchiveSource> = match archive {
                Some(path) => Box::new(LocalArchiveSource::new(path)),
                None => Box::new(HttpArchiveSource::new(&settings)?),
            };

            let progress = ProgressReporter::new_spinner("Starting...", json);
            let outcome = match run_pipeline(&request, &settings, source.as_ref(), Some(&progress)) {
                Ok(outcome) => outcome,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            };

            match outcome {
                LegendOutcome::Unavailable { message, .. } => {
                    progress.finish_with_message("Nothing to fetch");
                    println!("{}", message);
                }
                LegendOutcome::Table { table, exported } => {
                    progress.finish_with_message(&format!("Loaded {} records", table.len()));
                    let summary = table.summary();

                    if json {
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        println!("\n{}", summary.summary());
                        print_sample(&table, sample)?;
                        for path in &exported {
                            println!("Wrote {}", path.display());
                        }
                    }
                }
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing Parquet file: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing up to {} records):", sample);
                match writer.read_sample_rows(&file, sample) {
                    Ok(rows) => {
                        for (i, row) in rows.iter().enumerate() {
                            println!("{}. {}", i + 1, row.join(" | "));
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }

        Commands::Years => {
            println!("Municipal election years:");
            for &year in LOCAL_ELECTION_YEARS {
                let status = match validate_year(year)? {
                    YearCheck::Available => "coalition records available".to_string(),
                    YearCheck::Unavailable { .. } => "no coalition records published".to_string(),
                };
                println!("  {}  {}", year, status);
            }
        }
    }

    Ok(())
}

fn print_sample(table: &CoalitionTable, sample: usize) -> Result<()> {
    if sample == 0 || table.is_empty() {
        return Ok(());
    }

    println!("\nSample Records (showing {} of {}):", sample.min(table.len()), table.len());
    for (i, record) in table.records().take(sample).enumerate() {
        let record = record?;
        println!(
            "{}. {} / {}: {} [{}] {}",
            i + 1,
            record.federation_unit,
            record.electoral_unit_name,
            record.party_acronym,
            record.ballot_type,
            record.coalition_composition
        );
    }
    Ok(())
}
