//! # rollcall-cli
//!
//! Command-line front end for the attendance pipeline: extract records
//! from a spreadsheet export and render the processed-data workbook, the
//! per-section archive or a filled summary template.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rollcall_engine::{legacy, pipeline, InMemoryStaffDirectory, Strategy};
use rollcall_grid::Grid;
use rollcall_report::{plain, section, template, ReportKind};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// rollcall - attendance spreadsheet processing
#[derive(Parser)]
#[command(name = "rollcall")]
#[command(author, version, about = "Attendance spreadsheet processing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Extract records from a spreadsheet and print them
    Preview {
        /// Attendance spreadsheet (.xls or .xlsx)
        file: PathBuf,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render the plain processed-data workbook
    Process {
        /// Attendance spreadsheet (.xls or .xlsx)
        file: PathBuf,

        /// Output workbook path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Render one workbook per section, bundled into a ZIP
    Sections {
        /// Attendance spreadsheet (.xls or .xlsx)
        file: PathBuf,

        /// Staff directory CSV
        #[arg(long, value_name = "CSV")]
        staff: PathBuf,

        /// Output archive path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Fill a summary template with per-employee aggregates
    Summary {
        /// Attendance spreadsheet (.xls or .xlsx)
        file: PathBuf,

        /// Staff directory CSV
        #[arg(long, value_name = "CSV")]
        staff: PathBuf,

        /// Template workbook with a "Template Sheet"
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        /// Output workbook path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Monthly-wages staff instead of permanent/contract
        #[arg(long)]
        wages: bool,

        /// Restrict to one department
        #[arg(long, value_name = "NAME")]
        department: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    match cli.command {
        Command::Preview { file, json } => preview(&file, json),
        Command::Process { file, output } => process(&file, &output),
        Command::Sections {
            file,
            staff,
            output,
        } => sections(&file, &staff, &output),
        Command::Summary {
            file,
            staff,
            template,
            output,
            wages,
            department,
        } => summary(
            &file,
            &staff,
            &template,
            &output,
            wages,
            department.as_deref(),
        ),
    }
}

fn progress(percent: u8, message: &str) {
    debug!(percent, message, "pipeline progress");
}

fn load(file: &Path) -> Result<(Grid, Vec<rollcall_engine::AttendanceRecord>, Strategy)> {
    let grid =
        Grid::from_path(file).with_context(|| format!("failed to read {}", file.display()))?;
    let (records, strategy) = pipeline::extract_records(&grid, Some(&progress))
        .with_context(|| format!("failed to extract records from {}", file.display()))?;
    Ok((grid, records, strategy))
}

fn load_staff(path: &Path) -> Result<InMemoryStaffDirectory> {
    InMemoryStaffDirectory::from_csv_path(path)
        .with_context(|| format!("failed to load staff directory {}", path.display()))
}

fn period_of(grid: &Grid) -> String {
    legacy::period_string(grid).unwrap_or_else(|| "Unknown".to_string())
}

fn preview(file: &Path, json: bool) -> Result<()> {
    let (_, records, strategy) = load(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{} records extracted ({} layout)\n",
        records.len(),
        strategy
    );
    println!(
        "{:<10} {:<25} {:<20} {:<12} {:<7} {:<7} {:<10} {:>6}",
        "ID", "Name", "Designation", "Date", "In", "Out", "Status", "Hours"
    );
    for record in &records {
        println!(
            "{:<10} {:<25} {:<20} {:<12} {:<7} {:<7} {:<10} {:>6.2}",
            record.employee_id,
            record.employee_name,
            record.designation,
            record.date_label,
            record.in_time,
            record.out_time,
            record.status,
            record.worked_hours
        );
    }
    Ok(())
}

fn process(file: &Path, output: &Path) -> Result<()> {
    let (_, records, _) = load(file)?;
    plain::write_workbook(&records, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {} records to {}", records.len(), output.display());
    Ok(())
}

fn sections(file: &Path, staff: &Path, output: &Path) -> Result<()> {
    let (grid, records, _) = load(file)?;
    let directory = load_staff(staff)?;
    let period = period_of(&grid);
    section::write_archive(&records, &directory, &period, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote section archive to {}", output.display());
    Ok(())
}

fn summary(
    file: &Path,
    staff: &Path,
    template_path: &Path,
    output: &Path,
    wages: bool,
    department: Option<&str>,
) -> Result<()> {
    let (grid, records, _) = load(file)?;
    let directory = load_staff(staff)?;
    let period = period_of(&grid);
    let kind = if wages {
        ReportKind::MonthlyWages
    } else {
        ReportKind::Detailed
    };
    template::fill_template(
        template_path,
        output,
        &records,
        &directory,
        &period,
        department,
        kind,
    )
    .with_context(|| format!("failed to fill template {}", template_path.display()))?;
    println!("Wrote summary report to {}", output.display());
    Ok(())
}
