use clap::{Parser, Subcommand};
use fcs_app::{AppConfig, AppError, AppResult, AssetAssessmentRequest, StorageConfig};
use fcs_core::RecordId;
use fcs_schema::{CalculationRequest, FuelCellSpec, NewProject};
use fcs_sizing::SizingReport;
use fcs_store::Storage;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = "fcs-data";

#[derive(Parser)]
#[command(name = "fcs-cli")]
#[command(about = "Fuel-cell backup power sizing for telecom sites", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store directory (defaults to FCS_DATA_DIR, the config file, or ./fcs-data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and edit the fuel-cell catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Size a site from a request file (JSON or YAML, same fields as the REST body)
    Calculate {
        request_path: PathBuf,
        /// Print the rounded report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage saved projects
    #[command(subcommand)]
    Projects(ProjectCommands),
    /// Totals across all saved projects
    Portfolio,
    /// Right-sizing advice for an existing diesel generator
    Assess {
        /// Average load as % of rating
        #[arg(long)]
        load_factor: f64,
        /// Age in years
        #[arg(long, default_value_t = 5.0)]
        age: f64,
        /// Rating in kVA
        #[arg(long, default_value_t = 100.0)]
        rated_kva: f64,
        /// Running hours per month
        #[arg(long, default_value_t = 500.0)]
        running_hours: f64,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List catalog entries
    List,
    /// Show one fuel cell
    Show { id: String },
    /// Add a fuel cell from a JSON or YAML spec file
    Add { spec_path: PathBuf },
    /// Import a versioned catalog file
    Import { path: PathBuf },
    /// Export the catalog (.json or .yaml)
    Export { path: PathBuf },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects, newest first
    List,
    /// Show one project
    Show { id: String },
    /// Create a project from a JSON or YAML file
    Create { project_path: PathBuf },
    /// Delete a project
    Delete { id: String },
    /// Write the project report as CSV
    ExportCsv {
        id: String,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Catalog(cmd) => {
            let (_, store) = open_store(&cli)?;
            match cmd {
                CatalogCommands::List => cmd_catalog_list(&store),
                CatalogCommands::Show { id } => cmd_catalog_show(&store, id),
                CatalogCommands::Add { spec_path } => cmd_catalog_add(&store, spec_path),
                CatalogCommands::Import { path } => cmd_catalog_import(&store, path),
                CatalogCommands::Export { path } => cmd_catalog_export(&store, path),
            }
        }
        Commands::Calculate { request_path, json } => {
            let (config, store) = open_store(&cli)?;
            cmd_calculate(&store, &config, request_path, *json)
        }
        Commands::Projects(cmd) => {
            let (config, store) = open_store(&cli)?;
            match cmd {
                ProjectCommands::List => cmd_projects_list(&store),
                ProjectCommands::Show { id } => cmd_projects_show(&store, id),
                ProjectCommands::Create { project_path } => {
                    cmd_projects_create(&store, &config, project_path)
                }
                ProjectCommands::Delete { id } => cmd_projects_delete(&store, id),
                ProjectCommands::ExportCsv { id, output } => {
                    cmd_projects_export(&store, id, output.as_deref())
                }
            }
        }
        Commands::Portfolio => {
            let (_, store) = open_store(&cli)?;
            cmd_portfolio(&store)
        }
        Commands::Assess {
            load_factor,
            age,
            rated_kva,
            running_hours,
        } => cmd_assess(AssetAssessmentRequest {
            load_factor: *load_factor,
            age: *age,
            rated_power: *rated_kva,
            running_hours: *running_hours,
        }),
    }
}

fn open_store(cli: &Cli) -> AppResult<(AppConfig, Arc<dyn Storage>)> {
    let config = resolve_config(cli)?;
    let store = config.open_store()?;
    if config.seed_catalog {
        let added = fcs_app::seed_if_empty(store.as_ref())?;
        if added > 0 {
            println!("Seeded catalog with {} fuel cells", added);
        }
    }
    Ok((config, store))
}

/// The CLI always persists: an in-memory config falls back to ./fcs-data.
fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_process_env();
    if let Some(dir) = &cli.data_dir {
        config.storage = StorageConfig::File {
            data_dir: dir.clone(),
        };
    }
    if config.storage == StorageConfig::Memory {
        config.storage = StorageConfig::File {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        };
    }
    config.validate()?;
    debug!(storage = ?config.storage, "resolved configuration");
    Ok(config)
}

fn parse_id(raw: &str) -> AppResult<RecordId> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Invalid id: {}", raw), Some("id")))
}

/// Read a JSON (`.json`) or YAML (anything else) document.
fn read_document<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| {
        AppError::validation(format!("{}: {}", path.display(), message), None)
    })
}

fn cmd_catalog_list(store: &Arc<dyn Storage>) -> AppResult<()> {
    let rows = fcs_app::list_fuel_cells(store.as_ref())?;
    if rows.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }
    println!("Fuel cells:");
    for fc in rows {
        println!(
            "  {:>3}  {:<32} {:<6} {:>7.2} kW  {:>5.1} %  {}",
            fc.id,
            fc.spec.display_name(),
            fc.spec.technology,
            fc.spec.rated_power_kw,
            fc.spec.efficiency,
            fc.spec.fuel_type
        );
    }
    Ok(())
}

fn cmd_catalog_show(store: &Arc<dyn Storage>, raw_id: &str) -> AppResult<()> {
    let fc = fcs_app::get_fuel_cell(store.as_ref(), parse_id(raw_id)?)?;
    let spec = &fc.spec;
    println!("{} (id {})", spec.display_name(), fc.id);
    println!("  Technology:    {}", spec.technology);
    println!(
        "  Power:         {:.2} kW rated ({:.2}-{:.2} kW)",
        spec.rated_power_kw,
        spec.min_power_kw,
        spec.effective_max_power_kw()
    );
    println!("  Output:        {} V", spec.output_voltage_v);
    println!("  Efficiency:    {} %", spec.efficiency);
    println!("  Parasitic:     {:.1} %", spec.parasitic_loss * 100.0);
    println!("  Fuel:          {} (LHV {} kWh/kg)", spec.fuel_type, spec.lhv);
    println!("  CAPEX:         {} per kW", spec.capex_per_kw);
    if let Some(note) = &spec.telecom_application {
        println!("  Application:   {}", note);
    }
    if let Some(url) = &spec.datasheet_url {
        println!("  Datasheet:     {}", url);
    }
    Ok(())
}

fn cmd_catalog_add(store: &Arc<dyn Storage>, spec_path: &Path) -> AppResult<()> {
    let spec: FuelCellSpec = read_document(spec_path)?;
    let fc = fcs_app::create_fuel_cell(store.as_ref(), spec)?;
    println!("✓ Added {} as id {}", fc.spec.display_name(), fc.id);
    Ok(())
}

fn cmd_catalog_import(store: &Arc<dyn Storage>, path: &Path) -> AppResult<()> {
    let summary = fcs_app::import_catalog(store.as_ref(), path)?;
    println!(
        "✓ Imported {} fuel cells ({} already present)",
        summary.created, summary.skipped
    );
    Ok(())
}

fn cmd_catalog_export(store: &Arc<dyn Storage>, path: &Path) -> AppResult<()> {
    let count = fcs_app::export_catalog(store.as_ref(), path)?;
    println!("✓ Exported {} fuel cells to {}", count, path.display());
    Ok(())
}

fn print_report(report: &SizingReport) {
    println!("\nPower:");
    println!("  Derating factor:      {:.3}", report.derating_factor);
    println!("  Gross power:          {} kW", report.gross_power_required);
    println!(
        "  Stacks:               {} x {} kW ({} kW derated)",
        report.required_stack_count, report.fc_rated_power, report.total_derated_power
    );
    match report.capacity_margin {
        Some(m) => println!("  Capacity margin:      {} %", m),
        None => println!("  Capacity margin:      n/a"),
    }
    if report.is_undersized {
        println!("  ! Short by {} kW", report.capacity_shortfall);
    }

    println!("\nStorage and cabling:");
    println!(
        "  Battery:              {} kWh / {} Ah ({} strings, {} h)",
        report.battery_capacity_kwh,
        report.battery_capacity_ah,
        report.battery_strings,
        report.battery_bank_hours
    );
    println!("  Cable:                {} mm² at {} A", report.cable_size_mm2, report.cable_current_a);

    println!("\nFuel and logistics:");
    println!(
        "  Fuel:                 {} kg/h, {} kg/day",
        report.fuel_consumption_hourly, report.fuel_consumption_daily
    );
    println!(
        "  Refuel cycle:         {} kg = {} cylinders in {} bundles",
        report.total_h2_required, report.cylinders_required, report.bundles_required
    );

    println!("\nEconomics:");
    println!(
        "  Diesel:               {}/day, {}/year, {} L/h with theft",
        report.dg_daily_cost, report.dg_annual_cost, report.dg_fuel_with_theft
    );
    println!(
        "  Fuel cell:            {}/day, {}/year",
        report.fc_daily_cost, report.fc_annual_cost
    );
    println!("  Annual savings:       {}", report.annual_savings);
    match report.payback_years {
        Some(y) => println!("  Payback:              {} years ({})", y, report.payback_status),
        None => println!("  Payback:              none ({})", report.payback_status),
    }
    println!(
        "  10-year TCO:          diesel {} vs fuel cell {}",
        report.dg_tco_10yr, report.fc_tco_10yr
    );
    println!("  CO2 avoided:          {} kg/year", report.co2_savings);
}

fn cmd_calculate(
    store: &Arc<dyn Storage>,
    config: &AppConfig,
    request_path: &Path,
    json: bool,
) -> AppResult<()> {
    let request: CalculationRequest = read_document(request_path)?;
    let calc = fcs_app::calculate(store.as_ref(), &config.defaults, &request)?;
    let report = calc.report.rounded();

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Calculation(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!(
        "✓ Sized {} kW for {}",
        calc.inputs.load_kw,
        calc.fuel_cell.spec.display_name()
    );
    print_report(&report);
    Ok(())
}

fn cmd_projects_list(store: &Arc<dyn Storage>) -> AppResult<()> {
    let projects = fcs_app::list_projects(store.as_ref())?;
    if projects.is_empty() {
        println!("No projects saved");
        return Ok(());
    }
    println!("Projects:");
    for p in projects {
        println!(
            "  {:>3}  {:<30} {:>6} kW  {}",
            p.id, p.record.name, p.record.inputs.load_kw, p.created_at
        );
    }
    Ok(())
}

fn cmd_projects_show(store: &Arc<dyn Storage>, raw_id: &str) -> AppResult<()> {
    let project = fcs_app::get_project(store.as_ref(), parse_id(raw_id)?)?;
    let record = &project.record;
    let outputs = &record.outputs;

    println!("{} (id {}, created {})", record.name, project.id, project.created_at);
    if let Some(desc) = &record.description {
        println!("  {}", desc);
    }
    if let (Some(lat), Some(lon)) = (record.latitude, record.longitude) {
        println!("  Location:      {:.4}, {:.4}", lat, lon);
    }
    println!(
        "  Load:          {} kW for {} h at {} V",
        record.inputs.load_kw, record.inputs.autonomy_hours, record.inputs.system_voltage
    );
    println!(
        "  Battery:       {} kWh / {} Ah ({} strings)",
        outputs.battery_capacity_kwh, outputs.battery_capacity_ah, outputs.battery_strings
    );
    println!("  Cable:         {} mm²", outputs.cable_size_mm2);
    if let Some(stacks) = outputs.required_stack_count {
        println!("  Stacks:        {}", stacks);
    }
    if let Some(savings) = outputs.annual_savings {
        println!("  Savings:       {}/year", savings);
    }
    if let Some(years) = outputs.payback_years {
        println!("  Payback:       {} years", years);
    }

    if fcs_app::is_up_to_date(store.as_ref(), &project)? {
        println!("✓ Outputs are current");
    } else {
        println!("! Outputs were computed with a different engine or catalog entry");
    }
    Ok(())
}

fn cmd_projects_create(
    store: &Arc<dyn Storage>,
    config: &AppConfig,
    project_path: &Path,
) -> AppResult<()> {
    let new: NewProject = read_document(project_path)?;
    let project = fcs_app::create_project(store.as_ref(), &config.defaults, new)?;
    println!("✓ Created project {} (id {})", project.record.name, project.id);
    Ok(())
}

fn cmd_projects_delete(store: &Arc<dyn Storage>, raw_id: &str) -> AppResult<()> {
    let id = parse_id(raw_id)?;
    fcs_app::delete_project(store.as_ref(), id)?;
    println!("✓ Deleted project {}", id);
    Ok(())
}

fn cmd_projects_export(
    store: &Arc<dyn Storage>,
    raw_id: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let csv = fcs_app::export_project_csv(store.as_ref(), parse_id(raw_id)?)?;
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Report written to {}", path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_portfolio(store: &Arc<dyn Storage>) -> AppResult<()> {
    let summary = fcs_app::get_portfolio(store.as_ref())?;
    println!("Portfolio:");
    println!(
        "  Projects:        {} ({} with a fuel cell)",
        summary.project_count, summary.sized_project_count
    );
    println!("  Total load:      {:.2} kW", summary.total_load_kw);
    println!("  Battery:         {:.1} kWh", summary.total_battery_kwh);
    println!("  Annual savings:  {:.0}", summary.total_annual_savings);
    println!("  CO2 avoided:     {:.0} kg/year", summary.total_co2_savings);
    if let Some(avg) = summary.average_payback_years {
        println!("  Mean payback:    {:.1} years", avg);
    }
    Ok(())
}

fn cmd_assess(request: AssetAssessmentRequest) -> AppResult<()> {
    let assessment = fcs_app::assess_asset(&request)?;
    println!("Recommendation: {}", assessment.recommendation);
    println!("  {}", assessment.action);
    println!("  {}", assessment.analysis);
    println!(
        "  Efficiency loss:     {:.1} points",
        assessment.metrics.efficiency_loss
    );
    println!(
        "  Annual fuel waste:   {:.0} L",
        assessment.metrics.annual_waste_estimate
    );
    Ok(())
}
