use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use cdc_bench::config::TargetOptions;
use cdc_bench::dml::{DmlEngine, DmlKind, DmlOptions};
use cdc_bench::generate::RowGenerator;
use cdc_bench::logging;
use cdc_bench::schema::SchemaModel;
use cdc_bench::workload::{self, StopCondition, WorkloadOptions};
use clap::{Args, Parser, Subcommand};
use data_sampler::SampleStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, warn};

/// Generate CDC test schemas and change traffic against a database.
///
/// Table shapes come from per-dialect definition files, row values from a
/// YAML sample data file. DML runs in commit-unit sized transactions that
/// are committed, or rolled back with `--rollback`.
#[derive(Debug, Parser)]
#[command(name = "cdc-bench", version)]
struct CdcBench {
    #[command(flatten)]
    logging: logging::Options,

    #[command(flatten)]
    target: TargetOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert generated rows into a table
    Insert(InsertArgs),
    /// Update rows over an identifier range or a raw WHERE fragment
    Update(UpdateArgs),
    /// Delete rows over an identifier range or a raw WHERE fragment
    Delete(DeleteArgs),
    /// Create, drop, or reset schema objects
    Schema(SchemaArgs),
    /// Run a randomized INSERT/UPDATE/DELETE mix
    Workload(WorkloadArgs),
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Rows accumulated before a batch is submitted and its transaction
    /// resolved
    #[arg(long, default_value_t = 1000)]
    commit_unit: u64,

    /// Cap on rows buffered in memory before a forced mid-transaction
    /// flush
    #[arg(long, default_value_t = 10_000)]
    dml_array_size: u64,

    /// Roll every transaction back instead of committing
    #[arg(long)]
    rollback: bool,
}

impl BatchArgs {
    fn options(&self) -> DmlOptions {
        DmlOptions {
            commit_unit: self.commit_unit,
            dml_array_size: self.dml_array_size,
            rollback: self.rollback,
        }
    }
}

#[derive(Debug, Args)]
struct InsertArgs {
    /// Target table
    table: String,

    /// Number of rows to insert
    #[arg(long, default_value_t = 1000)]
    records: u64,

    /// One INSERT statement per row instead of multi-row statements
    #[arg(long)]
    single_row: bool,

    /// Columns to populate; the identifier and separator columns are
    /// always included
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    #[command(flatten)]
    batch: BatchArgs,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Target table
    table: String,

    /// Start of the identifier range
    #[arg(long, requires = "end_id", conflicts_with = "where_clause")]
    start_id: Option<i64>,

    /// End of the identifier range, inclusive
    #[arg(long, requires = "start_id", conflicts_with = "where_clause")]
    end_id: Option<i64>,

    /// Raw WHERE fragment; without this or a range, the whole table is
    /// updated in one statement
    #[arg(long = "where", value_name = "CLAUSE")]
    where_clause: Option<String>,

    /// Columns to update; defaults to every non-identifier column
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    #[command(flatten)]
    batch: BatchArgs,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Target table
    table: String,

    /// Start of the identifier range
    #[arg(long, requires = "end_id", conflicts_with = "where_clause")]
    start_id: Option<i64>,

    /// End of the identifier range, inclusive
    #[arg(long, requires = "start_id", conflicts_with = "where_clause")]
    end_id: Option<i64>,

    /// Raw WHERE fragment; without this or a range, the whole table is
    /// deleted in one statement
    #[arg(long = "where", value_name = "CLAUSE")]
    where_clause: Option<String>,

    #[command(flatten)]
    batch: BatchArgs,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    #[command(subcommand)]
    action: SchemaAction,
}

#[derive(Debug, Subcommand)]
enum SchemaAction {
    /// Create the tables, with constraint fixups
    Create(SchemaTables),
    /// Drop the tables
    Drop(SchemaTables),
    /// Drop (tolerating missing tables) and recreate the tables
    Reset(SchemaTables),
}

#[derive(Debug, Args)]
struct SchemaTables {
    /// Tables to act on
    #[arg(required = true)]
    tables: Vec<String>,
}

impl SchemaAction {
    fn tables(&self) -> &[String] {
        match self {
            SchemaAction::Create(t) | SchemaAction::Drop(t) | SchemaAction::Reset(t) => &t.tables,
        }
    }
}

#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("stop").required(true)))]
struct WorkloadArgs {
    /// Tables to mix the workload across
    #[arg(long, value_delimiter = ',', required = true)]
    tables: Vec<String>,

    /// DML kinds to draw from; defaults to all three
    #[arg(long, value_delimiter = ',', value_enum)]
    kinds: Option<Vec<DmlKind>>,

    /// Minimum records per iteration
    #[arg(long, default_value_t = 1)]
    min_records: u64,

    /// Maximum records per iteration
    #[arg(long, default_value_t = 100)]
    max_records: u64,

    /// Stop once this many records have been affected
    #[arg(long, group = "stop")]
    total_records: Option<u64>,

    /// Stop after this many DML dispatches
    #[arg(long, group = "stop")]
    dml_count: Option<u64>,

    /// Stop after this many seconds of wall-clock time
    #[arg(long, group = "stop", value_name = "SECONDS")]
    run_for: Option<u64>,

    /// Fixed sleep between iterations, in seconds
    #[arg(long, value_name = "SECONDS")]
    sleep: Option<u64>,

    /// Directory daily run reports are appended in
    #[arg(long, default_value = "reports")]
    report_dir: PathBuf,

    #[command(flatten)]
    batch: BatchArgs,
}

impl WorkloadArgs {
    fn stop(&self) -> anyhow::Result<StopCondition> {
        match (self.total_records, self.dml_count, self.run_for) {
            (Some(total), None, None) => Ok(StopCondition::TotalRecords(total)),
            (None, Some(count), None) => Ok(StopCondition::DmlCount(count)),
            (None, None, Some(secs)) => Ok(StopCondition::Duration(Duration::from_secs(secs))),
            _ => bail!("exactly one of --total-records, --dml-count, --run-for is required"),
        }
    }
}

async fn run(cli: CdcBench) -> anyhow::Result<()> {
    let target = cli.target.resolve()?;
    let dialect = target.url.dialect();

    match cli.command {
        Command::Schema(args) => {
            let model = SchemaModel::build(
                dialect,
                args.action.tables(),
                &target.defs_dir,
                target.schema.clone(),
            )?;
            let mut conn = target
                .url
                .connect()
                .await
                .context("connecting to the database")?;
            match args.action {
                SchemaAction::Create(_) => model.create_all(&mut conn).await,
                SchemaAction::Drop(_) => model.drop_all(&mut conn).await,
                SchemaAction::Reset(_) => model.reset(&mut conn).await,
            }
        }
        Command::Insert(args) => {
            let model = SchemaModel::build(
                dialect,
                &[args.table.clone()],
                &target.defs_dir,
                target.schema.clone(),
            )?;
            let store = SampleStore::load(&target.data_file, &target.lob_dir)?;
            let mut conn = target
                .url
                .connect()
                .await
                .context("connecting to the database")?;
            let generator = RowGenerator::new(&store, target.key_strategy);
            let mut engine = DmlEngine::new(
                &mut conn,
                &model,
                generator,
                args.batch.options(),
                StdRng::from_entropy(),
            );
            engine
                .insert(
                    &args.table,
                    args.records,
                    args.single_row,
                    args.columns.as_deref(),
                )
                .await?;
            println!("{}", engine.into_summary());
            Ok(())
        }
        Command::Update(args) => {
            let model = SchemaModel::build(
                dialect,
                &[args.table.clone()],
                &target.defs_dir,
                target.schema.clone(),
            )?;
            let store = SampleStore::load(&target.data_file, &target.lob_dir)?;
            let mut conn = target
                .url
                .connect()
                .await
                .context("connecting to the database")?;
            let generator = RowGenerator::new(&store, target.key_strategy);
            let mut engine = DmlEngine::new(
                &mut conn,
                &model,
                generator,
                args.batch.options(),
                StdRng::from_entropy(),
            );
            match (args.start_id, args.end_id) {
                (Some(start), Some(end)) => {
                    engine
                        .update_range(&args.table, start, end, args.columns.as_deref())
                        .await?
                }
                _ => {
                    engine
                        .update_where(
                            &args.table,
                            args.where_clause.as_deref(),
                            args.columns.as_deref(),
                        )
                        .await?
                }
            }
            println!("{}", engine.into_summary());
            Ok(())
        }
        Command::Delete(args) => {
            let model = SchemaModel::build(
                dialect,
                &[args.table.clone()],
                &target.defs_dir,
                target.schema.clone(),
            )?;
            let store = SampleStore::load(&target.data_file, &target.lob_dir)?;
            let mut conn = target
                .url
                .connect()
                .await
                .context("connecting to the database")?;
            let generator = RowGenerator::new(&store, target.key_strategy);
            let mut engine = DmlEngine::new(
                &mut conn,
                &model,
                generator,
                args.batch.options(),
                StdRng::from_entropy(),
            );
            match (args.start_id, args.end_id) {
                (Some(start), Some(end)) => engine.delete_range(&args.table, start, end).await?,
                _ => {
                    engine
                        .delete_where(&args.table, args.where_clause.as_deref())
                        .await?
                }
            }
            println!("{}", engine.into_summary());
            Ok(())
        }
        Command::Workload(args) => {
            let stop = args.stop()?;
            let model = SchemaModel::build(
                dialect,
                &args.tables,
                &target.defs_dir,
                target.schema.clone(),
            )?;
            let store = SampleStore::load(&target.data_file, &target.lob_dir)?;
            let mut conn = target
                .url
                .connect()
                .await
                .context("connecting to the database")?;
            let generator = RowGenerator::new(&store, target.key_strategy);
            let mut engine = DmlEngine::new(
                &mut conn,
                &model,
                generator,
                args.batch.options(),
                StdRng::from_entropy(),
            );
            let options = WorkloadOptions {
                record_range: (args.min_records, args.max_records),
                tables: args.tables.clone(),
                kinds: args.kinds.clone().unwrap_or_else(|| {
                    vec![DmlKind::Insert, DmlKind::Update, DmlKind::Delete]
                }),
                stop,
                sleep: args.sleep.map(Duration::from_secs),
                report_dir: args.report_dir.clone(),
            };
            let mut rng = StdRng::from_entropy();
            workload::run_workload(&mut engine, &options, &mut rng).await?;
            println!("{}", engine.into_summary());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = CdcBench::parse();
    let _guard = match cli.logging.init("cdc-bench") {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("logging setup failed: {error:#}");
            std::process::exit(1);
        }
    };

    let result = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("cancelled by user, already committed work stands");
            std::process::exit(1);
        }
    };

    if let Err(error) = result {
        error!("{error:#}");
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
