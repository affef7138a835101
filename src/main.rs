/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use xChart::config::{Config, ExportFormat};
use xChart::data::{CsvLoader, Exporter, SampleGenerator};
use xChart::utils::{format_timestamp, logging};
use xChart::{AugmentedSeries, Indicator, IndicatorPipeline, PatternScanner, Series};

#[derive(Parser)]
#[command(name = "xchart")]
#[command(version, about = "OHLCV technical indicator pipeline", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = xChart::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Input CSV file with a header row
    #[arg(short, long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Use a generated series of this many bars instead of a file
    #[arg(long)]
    sample: Option<usize>,

    /// Field delimiter of the input file
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Evaluate independent moving averages in parallel
    #[arg(long)]
    parallel: bool,

    /// Keep the warm-up rows where sma_20 is undefined
    #[arg(long)]
    keep_warm_up: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the indicator catalog and export it
    Compute {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv, json)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Comma-separated indicator columns to export
        #[arg(long, value_delimiter = ',')]
        columns: Vec<Indicator>,
    },

    /// Scan the augmented series for candlestick and indicator patterns
    Scan {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write a seeded sample OHLCV series as CSV
    Sample {
        /// Number of business-day bars
        #[arg(short, long, default_value = "200")]
        bars: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // 설정 로드
    let mut config = Config::load_from(&cli.config).context("설정 로드 실패")?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::debug!("설정 로드 완료: {:?}", config);

    match cli.command {
        Commands::Compute { input, output, format, columns } => {
            apply_input_flags(&mut config, &input);
            if let Some(format) = format {
                config.export.format = format;
            }
            if !columns.is_empty() {
                config.export.columns = columns;
            }

            let augmented = run_pipeline(&config, &input)?;
            let exporter = Exporter::from_config(&config.export);
            let writer = open_output(output.as_deref())?;
            if let Err(e) = exporter.write(&augmented, config.export.format, writer) {
                logging::log_error("내보내기", &e);
                return Err(e.into());
            }
        }
        Commands::Scan { input } => {
            apply_input_flags(&mut config, &input);
            let augmented = run_pipeline(&config, &input)?;

            let scanner = PatternScanner::new(&config.patterns);
            let patterns = scanner.scan(&augmented);
            log::info!("패턴 {}개 탐지", patterns.len());

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for pattern in &patterns {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    pattern.id(),
                    format_timestamp(pattern.timestamp),
                    pattern.bias().as_str(),
                    pattern.name(),
                    pattern.description()
                )?;
            }
        }
        Commands::Sample { bars, seed, output } => {
            let series = SampleGenerator::new(seed).generate(bars)?;
            let augmented = AugmentedSeries::new(series.into_bars());
            let writer = open_output(output.as_deref())?;
            Exporter::bars_only().write_csv(&augmented, writer)?;
        }
    }

    Ok(())
}

fn apply_input_flags(config: &mut Config, input: &InputArgs) {
    if input.parallel {
        config.pipeline.parallel = true;
    }
    if input.keep_warm_up {
        config.pipeline.keep_warm_up = true;
    }
}

fn load_series(input: &InputArgs) -> anyhow::Result<Series> {
    match (&input.input, input.sample) {
        (Some(path), _) => CsvLoader::new(input.delimiter)?
            .load_path(path)
            .with_context(|| format!("입력 파일을 읽을 수 없습니다: {}", path.display())),
        (None, Some(bars)) => Ok(SampleGenerator::default().generate(bars)?),
        (None, None) => anyhow::bail!("--input 또는 --sample 중 하나가 필요합니다"),
    }
}

fn run_pipeline(config: &Config, input: &InputArgs) -> anyhow::Result<AugmentedSeries> {
    let series = load_series(input)?;
    let started = Instant::now();

    let augmented = IndicatorPipeline::new(config.pipeline).compute(&series);

    logging::log_pipeline_summary(series.len(), augmented.len(), started.elapsed().as_millis());
    Ok(augmented)
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("출력 파일을 만들 수 없습니다: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}
