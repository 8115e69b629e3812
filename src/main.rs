mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use creator_analytics::config::EngineConfig;
use creator_analytics::predict::PredictionRequest;
use creator_analytics::store::{self, JsonDataStore};
use creator_analytics::{
    format_float, format_number, format_percent, sample, AnalyticsEngine, Platform,
};

#[derive(Parser)]
#[command(
    name = "creator-analytics",
    about = "Content performance analytics for creators"
)]
struct Cli {
    /// Path to the JSON dataset file.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Path to the engine config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Metrics and viral potential for one content item
    Insights(InsightsArgs),
    /// Timing, topic, format and style patterns for a creator
    Patterns(PatternsArgs),
    /// Topic, format, strategy and monetization recommendations
    Recommend(CreatorArgs),
    /// Marginal effect of timing, format, length, visuals, CTA and hashtags
    Factors(CreatorArgs),
    /// Audience aggregates for a date range
    Audience(RangeArgs),
    /// Performance comparison across content types
    Compare(RangeArgs),
    /// Heuristic performance estimate for a draft post
    Predict(PredictArgs),
    /// Generate a synthetic demo dataset
    Sample(SampleArgs),
    /// Serve the engine over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct InsightsArgs {
    content_id: String,
}

#[derive(Args, Debug, Clone)]
struct CreatorArgs {
    creator_id: String,
}

#[derive(Args, Debug, Clone)]
struct PatternsArgs {
    creator_id: String,
    #[arg(long)]
    top_n: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct RangeArgs {
    creator_id: String,
    /// Start date, YYYY-MM-DD (default: 90 days before end)
    #[arg(long)]
    start: Option<String>,
    /// End date, YYYY-MM-DD (default: today)
    #[arg(long)]
    end: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct PredictArgs {
    creator_id: String,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    body: String,
    #[arg(long)]
    platform: String,
    #[arg(long)]
    media: bool,
    #[arg(long)]
    hour: Option<u32>,
}

#[derive(Args, Debug, Clone)]
struct SampleArgs {
    #[arg(long, default_value = "creator-demo")]
    creator_id: String,
    #[arg(long, default_value_t = 24)]
    posts: usize,
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = EngineConfig::load(cli.config.clone())?;
    let data_path = cli.data.clone().unwrap_or_else(store::default_data_path);

    if let Command::Sample(args) = &cli.command {
        return run_sample(args, &data_path).await;
    }

    let store = JsonDataStore::load(&data_path)
        .await
        .map_err(|err| format!("failed to load dataset: {}", err))?;
    let engine = AnalyticsEngine::new(store, config);

    match cli.command {
        Command::Insights(args) => run_insights(&engine, &args).await,
        Command::Patterns(args) => run_patterns(&engine, &args).await,
        Command::Recommend(args) => run_recommend(&engine, &args).await,
        Command::Factors(args) => run_factors(&engine, &args).await,
        Command::Audience(args) => run_audience(&engine, &args).await,
        Command::Compare(args) => run_compare(&engine, &args).await,
        Command::Predict(args) => run_predict(&engine, &args).await,
        Command::Sample(_) => unreachable!("handled before store load"),
        Command::Serve(args) => server::serve(args, engine).await,
    }
}

async fn run_insights(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &InsightsArgs,
) -> Result<(), String> {
    let insights = engine
        .content_insights(&args.content_id)
        .await
        .map_err(|err| err.to_string())?;

    println!("{} ({})", insights.title, insights.platform.label());
    println!(
        "Views {} | likes {} | comentários {} | compartilhamentos {}",
        format_number(insights.views as f64),
        format_number(insights.likes as f64),
        format_number(insights.comments as f64),
        format_number(insights.shares as f64)
    );
    println!(
        "Engajamento: {} (score médio {})",
        format_percent(insights.engagement_rate),
        format_percent(insights.engagement_score)
    );
    println!(
        "Crescimento: {} views/h | velocidade de engajamento: {}/h",
        format_float(insights.growth_rate, 1),
        format_float(insights.engagement_speed, 1)
    );
    println!(
        "Potencial viral: {} ({})",
        format_float(insights.viral.score, 2),
        insights.viral.assessment
    );
    for factor in &insights.viral.key_factors {
        println!("- {}", factor);
    }
    Ok(())
}

async fn run_patterns(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &PatternsArgs,
) -> Result<(), String> {
    let report = engine
        .high_performance_patterns(&args.creator_id, args.top_n)
        .await
        .map_err(|err| err.to_string())?;

    println!("Confiança da análise de horários: {}", format_percent(report.timing.confidence));
    if let Some(day) = report.timing.best_days.first() {
        println!(
            "Melhor dia: {} ({} de engajamento médio)",
            day.label,
            format_percent(day.mean_engagement)
        );
    }
    if let Some(hour) = report.timing.best_hours.first() {
        println!("Melhor horário: {}", hour.label);
    }

    if !report.topics.is_empty() {
        println!("\nTemas de melhor desempenho:");
        for topic in &report.topics {
            println!(
                "- {} ({} posts, {} | tendência {})",
                topic.topic,
                topic.items,
                format_percent(topic.mean_engagement),
                format_float(topic.growth_trend, 1)
            );
        }
    }

    if !report.formats.is_empty() {
        println!("\nFormatos:");
        for format in &report.formats {
            println!(
                "- {} via {} ({})",
                format.format_name,
                format.platform.label(),
                format_percent(format.mean_engagement)
            );
        }
    }

    if !report.styles.is_empty() {
        println!("\nEstilos detectados:");
        for style in &report.styles {
            println!("- {} ({} posts)", style.label, style.items);
        }
    }

    println!("\nBoas práticas:");
    for practice in &report.best_practices {
        println!("- {}", practice);
    }
    Ok(())
}

async fn run_recommend(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &CreatorArgs,
) -> Result<(), String> {
    let report = engine
        .content_recommendations(&args.creator_id)
        .await
        .map_err(|err| err.to_string())?;

    println!("Temas recomendados:");
    for topic in &report.topics {
        let marker = if topic.trending { " [em alta]" } else { "" };
        println!(
            "- {}{} (alcance potencial: {})",
            topic.topic, marker, topic.potential_reach
        );
    }

    println!("\nFormatos:");
    for format in &report.formats {
        println!(
            "- {}: {} | tamanho ideal: {}",
            format.platform.label(),
            format.ideal_format,
            format.ideal_length
        );
    }

    println!("\nEstratégias:");
    for strategy in &report.strategies {
        println!("- {}", strategy.title);
    }
    println!("\nTáticas:");
    for tactic in &report.tactics {
        println!("- {}", tactic.title);
    }
    println!("\nMonetização:");
    for opportunity in &report.monetization {
        println!("- {}", opportunity.title);
    }
    Ok(())
}

async fn run_factors(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &CreatorArgs,
) -> Result<(), String> {
    let factors = engine
        .engagement_factors(&args.creator_id)
        .await
        .map_err(|err| err.to_string())?;

    for factor in factors {
        println!(
            "{} (importância {} | confiança {})",
            factor.name,
            format_percent(factor.importance),
            format_percent(factor.confidence)
        );
        for (bucket, mean) in &factor.subfactors {
            println!("  {} -> {}", bucket, format_percent(*mean));
        }
        for tip in &factor.optimization_tips {
            println!("  * {}", tip);
        }
    }
    Ok(())
}

async fn run_audience(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &RangeArgs,
) -> Result<(), String> {
    let (start, end) = resolve_range(args)?;
    let insights = engine
        .audience_insights(&args.creator_id, start, end)
        .await
        .map_err(|err| err.to_string())?;

    println!(
        "{} posts | {} views | {} interações",
        insights.posts,
        format_number(insights.total_views as f64),
        format_number(insights.total_interactions as f64)
    );
    println!("Engajamento médio: {}", format_percent(insights.engagement_score));
    if let Some(day) = &insights.best_weekday {
        println!("Melhor dia para publicar: {}", day);
    }
    if let Some(hour) = insights.best_hour {
        println!("Melhor horário: {}h", hour);
    }

    println!("\nDemografia (dados simulados):");
    for segment in &insights.demographics.segments {
        println!("  {} -> {}", segment.label, format_percent(segment.share));
    }
    println!("Sentimento (dados simulados):");
    for segment in &insights.sentiment.segments {
        println!("  {} -> {}", segment.label, format_percent(segment.share));
    }
    Ok(())
}

async fn run_compare(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &RangeArgs,
) -> Result<(), String> {
    let (start, end) = resolve_range(args)?;
    let report = engine
        .compare_content_types(&args.creator_id, start, end)
        .await
        .map_err(|err| err.to_string())?;

    for group in &report.groups {
        println!(
            "{}: {} posts | {} views/post | engajamento {} | score {}",
            group.content_type,
            group.posts,
            format_number(group.metrics.avg_views),
            format_percent(group.metrics.engagement_rate),
            format_float(group.performance_score, 2)
        );
    }

    if !report.cross_insights.is_empty() {
        println!("\nInsights:");
        for insight in &report.cross_insights {
            println!("- {}", insight);
        }
    }
    if !report.strategies.is_empty() {
        println!("\nEstratégias:");
        for strategy in &report.strategies {
            println!("- {}", strategy);
        }
    }
    Ok(())
}

async fn run_predict(
    engine: &AnalyticsEngine<JsonDataStore>,
    args: &PredictArgs,
) -> Result<(), String> {
    let platform = Platform::from_str(&args.platform)
        .ok_or_else(|| format!("invalid platform: {}", args.platform))?;
    if let Some(hour) = args.hour {
        if hour > 23 {
            return Err(format!("invalid hour (0-23): {}", hour));
        }
    }

    let request = PredictionRequest {
        creator_id: args.creator_id.clone(),
        title: args.title.clone(),
        body: args.body.clone(),
        platform,
        has_media: args.media,
        publish_hour: args.hour,
    };

    let report = engine
        .predict_performance(&request)
        .await
        .map_err(|err| err.to_string())?;

    println!(
        "Estimativa: {} views | {} likes | {} comentários | {} compartilhamentos",
        format_number(report.estimated_views),
        format_number(report.estimated_likes),
        format_number(report.estimated_comments),
        format_number(report.estimated_shares)
    );
    println!(
        "Engajamento estimado: {} (confiança {})",
        format_percent(report.estimated_engagement_rate),
        format_percent(report.confidence)
    );
    for rule in &report.applied_rules {
        println!("- {}", rule);
    }
    println!("Estimativa heurística baseada no seu histórico, não em um modelo treinado.");
    Ok(())
}

async fn run_sample(args: &SampleArgs, data_path: &Path) -> Result<(), String> {
    let dataset = sample::generate_dataset(&args.creator_id, args.posts, args.seed);
    store::save_dataset(data_path, &dataset)
        .await
        .map_err(|err| format!("failed to write dataset: {}", err))?;
    println!(
        "Dataset com {} posts gravado em {}",
        dataset.content.len(),
        data_path.display()
    );
    Ok(())
}

fn resolve_range(
    args: &RangeArgs,
) -> Result<(chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>), String> {
    let query = api::DateRangeQuery {
        start: args.start.clone(),
        end: args.end.clone(),
    };
    query.resolve()
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
