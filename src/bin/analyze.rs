//! Headless companion to the dashboard: fit the model, print the key clients
//! and one customer's alive path.
use {
    anyhow::{Context, Result, bail},
    chrono::NaiveTime,
    churn_radar::{
        BucketWidth, PERSISTENCE,
        analysis::{customer_alive_path, customer_horizon, key_clients},
        config::{DASHBOARD, MODEL},
        data::{ModelCache, load_dataset},
        utils::TimeUtils,
    },
    clap::Parser,
    std::path::PathBuf,
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fit the churn model and inspect customers from the terminal")]
struct Args {
    /// Directory holding df_order.csv and customers_characteristics.csv
    #[arg(long, default_value = PERSISTENCE.data.directory)]
    data_dir: PathBuf,

    /// Print the alive path of this customer (defaults to the top key client)
    #[arg(long)]
    customer: Option<String>,

    /// Number of buckets after the first purchase (defaults to the customer's age T)
    #[arg(long)]
    horizon: Option<usize>,

    /// Bucket width of the alive path. Must match the unit the model's
    /// frequency/recency/T columns were computed in (day)
    #[arg(long, default_value_t = MODEL.time_unit)]
    bucket: BucketWidth,

    /// L2 penalty applied when fitting
    #[arg(long, default_value_t = MODEL.penalizer_coef)]
    penalizer: f64,

    /// Print the fitted parameters as JSON and exit
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Rows of the key clients table to print
    #[arg(long, default_value_t = DASHBOARD.key_clients_visible_rows)]
    top: usize,
}

impl Args {
    /// Reject a bucket width the fitted model cannot score, before any file is read.
    fn check_bucket(&self) -> Result<()> {
        if self.bucket != MODEL.time_unit {
            bail!(
                "--bucket {} does not match the model time unit ({}); the summary table is in {}",
                self.bucket,
                MODEL.time_unit,
                MODEL.time_unit.unit_label()
            );
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct KeyClientRow {
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Month. exp.")]
    monthly: i64,
    #[tabled(rename = "Proba churn")]
    churn: String,
}

#[derive(Tabled)]
struct AliveRow {
    #[tabled(rename = "t")]
    t: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Purchase")]
    purchase: u8,
    #[tabled(rename = "Frequency")]
    frequency: i64,
    #[tabled(rename = "Recency")]
    recency: i64,
    #[tabled(rename = "P(alive)")]
    p_alive: String,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("churn_radar"), log::LevelFilter::Info)
        .filter(Some("analyze"), log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();
    args.check_bucket()?;

    let dataset = load_dataset(&args.data_dir)?;
    let model = ModelCache::new()
        .get_or_fit(&dataset, args.penalizer)
        .context("Failed to fit the BG/NBD model")?;

    if args.json {
        let summary = model.summary().context("Model reported no fit summary")?;
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    if let Some(summary) = model.summary() {
        log::info!(
            "Fitted on {} customers: r={:.4} alpha={:.4} a={:.4} b={:.4} (nll {:.3}, {} iterations)",
            summary.customers,
            summary.params.r,
            summary.params.alpha,
            summary.params.a,
            summary.params.b,
            summary.negative_log_likelihood,
            summary.iterations
        );
    }

    let start = DASHBOARD.start_time.default.and_time(NaiveTime::MIN);
    let ranked = key_clients(&dataset.customers, start, DASHBOARD.min_frequency);
    println!(
        "Key clients with a purchase after {} ({} total):",
        TimeUtils::date_string(&start),
        ranked.len()
    );
    let rows = ranked.iter().take(args.top).map(|c| KeyClientRow {
        customer: c.customer_id.clone(),
        monthly: c.monthly_expenses,
        churn: format!("{:.4}", c.churn_probability),
    });
    println!("{}", Table::new(rows).with(Style::modern()));

    let customer_id = match args.customer.or_else(|| ranked.first().map(|c| c.customer_id.clone())) {
        Some(id) => id,
        None => bail!("No customer given and no key client to default to"),
    };
    let horizon = args
        .horizon
        .unwrap_or_else(|| customer_horizon(&dataset, &customer_id));

    let series = customer_alive_path(&dataset, model.as_ref(), &customer_id, args.bucket, horizon)
        .with_context(|| format!("Failed to build the alive path of customer {}", customer_id))?;

    println!(
        "\nProbability that the customer {} is still active ({} {}):",
        customer_id,
        series.len(),
        args.bucket.unit_label()
    );
    let rows = series.rows.iter().map(|row| AliveRow {
        t: row.t,
        date: series
            .bucket_start(row.t)
            .map(|dt| TimeUtils::date_string(&dt))
            .unwrap_or_default(),
        purchase: row.transactions,
        frequency: row.frequency,
        recency: row.recency,
        p_alive: format!("{:.4}", row.p_alive),
    });
    println!("{}", Table::new(rows).with(Style::modern()));
    Ok(())
}
