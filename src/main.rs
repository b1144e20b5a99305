use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use earnings_engine::api::{AppState, create_router};
use earnings_engine::calculation::{build_projection, compare_models, preview_monthly_residuals};
use earnings_engine::config::ConfigLoader;
use earnings_engine::format::{display_projection, format_count, format_currency};
use earnings_engine::models::{
    CalculatorInputs, CompensationModel, ModelComparison, ProjectionResult,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Earnings projections for ACA enrollment agents.
///
/// Projects pay over the Open Enrollment Period and five years of residual
/// income, either from the command line or as an HTTP service.
#[derive(Debug, Parser)]
#[command(name = "earnings-engine", version)]
struct Cli {
    /// Program configuration directory.
    #[arg(long, global = true, default_value = "./config/oep_2025")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Project earnings for one compensation model.
    Project(ProjectArgs),

    /// Project both compensation models side by side.
    Compare(InputArgs),
}

#[derive(Debug, Args)]
struct ProjectArgs {
    /// Compensation model (e.g. "hourly-plus-commission", "commission-only").
    #[arg(long)]
    model: Option<CompensationModel>,

    #[command(flatten)]
    inputs: InputArgs,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Applications completed per day.
    #[arg(long)]
    applications: Decimal,

    /// Hours worked per day.
    #[arg(long, default_value = "0")]
    hours: Decimal,

    /// Working days in the enrollment period (configured default if omitted).
    #[arg(long, allow_negative_numbers = true)]
    working_days: Option<i64>,

    /// Persistency rate in percent (configured default if omitted).
    #[arg(long)]
    persistency: Option<Decimal>,

    /// Months of residuals to list.
    #[arg(long)]
    months: Option<u32>,

    /// Reject out-of-range values instead of clamping them.
    #[arg(long)]
    strict: bool,

    /// Print JSON instead of a report.
    #[arg(long)]
    json: bool,
}

impl InputArgs {
    fn to_inputs(
        &self,
        model: Option<CompensationModel>,
        loader: &ConfigLoader,
    ) -> Result<CalculatorInputs> {
        let defaults = loader.defaults();
        let inputs = CalculatorInputs {
            model: model.unwrap_or(defaults.model),
            applications_per_day: self.applications,
            hours_worked: self.hours,
            working_days: self.working_days.unwrap_or(defaults.working_days),
            persistency_rate: self.persistency.unwrap_or(defaults.persistency_rate),
            residual_months: self.months.unwrap_or(defaults.residual_months),
        };

        let (inputs, warnings) = inputs
            .prepare(self.strict)
            .context("input rejected in strict mode")?;
        for warning in &warnings {
            warn!(code = %warning.code, "{}", warning.message);
        }
        Ok(inputs)
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG` when set and falls back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    debug!(program = %loader.program().code, "configuration loaded");

    match cli.command {
        Command::Serve { bind } => serve(loader, bind).await,
        Command::Project(args) => {
            let inputs = args.inputs.to_inputs(args.model, &loader)?;
            let projection = build_projection(
                inputs.model,
                &inputs.daily(),
                &inputs.period(),
                &inputs.residual(),
                loader.schedule(),
            );
            if args.inputs.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print_header(&loader, &inputs);
                print_projection(&projection, inputs.residual_months);
            }
            Ok(())
        }
        Command::Compare(args) => {
            let inputs = args.to_inputs(None, &loader)?;
            let comparison = compare_models(
                &inputs.daily(),
                &inputs.period(),
                &inputs.residual(),
                loader.schedule(),
            );
            if args.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print_header(&loader, &inputs);
                print_comparison(&comparison);
            }
            Ok(())
        }
    }
}

async fn serve(loader: ConfigLoader, bind: SocketAddr) -> Result<()> {
    let program = loader.program().code.clone();
    let router = create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, %program, "earnings engine listening");

    axum::serve(listener, router).await.context("server error")
}

// ─── report output ───────────────────────────────────────────────────────────

fn print_header(loader: &ConfigLoader, inputs: &CalculatorInputs) {
    println!("{}", loader.program().name);
    println!(
        "{} ({})",
        loader.enrollment_period().name,
        loader.enrollment_period().describe()
    );
    println!(
        "{} apps/day, {}h/day, {} working days, {}% persistency",
        inputs.applications_per_day.normalize(),
        inputs.hours_worked.normalize(),
        inputs.working_days,
        inputs.persistency_rate.normalize()
    );
    println!();
}

fn print_projection(projection: &ProjectionResult, months: u32) {
    let display = display_projection(projection);

    println!("{}", projection.model);
    println!("  Daily pay:            {}", display.daily_pay);
    if projection.model.pays_hourly() {
        println!("    hourly:             {}", format_currency(projection.daily.hourly_pay));
    }
    println!("    commission:         {}", format_currency(projection.daily.commission_pay));
    println!("  Applications:         {}", display.total_applications);
    println!("  Enrollment period:    {}", display.period_pay);
    println!("  Year 1 monthly:       {}", display.year_one_monthly_residual);
    println!("  5-year residuals:     {}", display.total_residuals);
    println!("  Cumulative total:     {}", display.cumulative_total);
    println!();

    println!("  Year  Customers    Monthly      Annual");
    for year in &projection.yearly_residuals {
        println!(
            "  {:>4}  {:>9}  {:>9}  {:>10}",
            year.year,
            format_count(Decimal::from(year.active_customers)),
            format_currency(year.monthly_amount),
            format_currency(year.year_total)
        );
    }
    println!();

    println!("  Month  Residual");
    for month in preview_monthly_residuals(&projection.yearly_residuals, months) {
        println!("  {:>5}  {:>8}", month.month, format_currency(month.amount));
    }
}

fn print_comparison(comparison: &ModelComparison) {
    let hpc = display_projection(&comparison.hourly_plus_commission);
    let co = display_projection(&comparison.commission_only);

    println!(
        "  {:<20} {:>20} {:>16} {:>12}",
        "", "Hourly + Commission", "Commission Only", "Difference"
    );
    let rows = [
        ("Daily pay", &hpc.daily_pay, &co.daily_pay, comparison.daily_pay_difference),
        ("Enrollment period", &hpc.period_pay, &co.period_pay, comparison.period_pay_difference),
        (
            "Year 1 monthly",
            &hpc.year_one_monthly_residual,
            &co.year_one_monthly_residual,
            comparison.year_one_monthly_residual_difference,
        ),
        (
            "5-year residuals",
            &hpc.total_residuals,
            &co.total_residuals,
            comparison.total_residuals_difference,
        ),
        (
            "Cumulative total",
            &hpc.cumulative_total,
            &co.cumulative_total,
            comparison.cumulative_difference,
        ),
    ];
    for (label, left, right, difference) in rows {
        println!(
            "  {:<20} {:>20} {:>16} {:>12}",
            label,
            left,
            right,
            format_currency(difference)
        );
    }
    println!();

    match comparison.higher_cumulative {
        Some(model) => println!("{model} earns more over the full horizon."),
        None => println!("Both models earn the same over the full horizon."),
    }
}
