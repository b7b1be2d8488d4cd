mod writer;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{Dataset, UserId};
use pipeline::{Polarity, Recommendation, Recommender};
use rand::seq::IndexedRandom;
use similarity::{Cosine, MeanAbsoluteDifference, SimilarityEngine};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(
    about = "Nearest-neighbour movie recommendations from a ratings dataset",
    long_about = None
)]
struct Cli {
    /// Path to the movies CSV (movieId,title,genres)
    #[arg(long, env = "REEL_MOVIES", default_value = "data/movies.csv")]
    movies: PathBuf,

    /// Path to the ratings CSV (userId,movieId,rating,timestamp)
    #[arg(long, env = "REEL_RATINGS", default_value = "data/ratings.csv")]
    ratings: PathBuf,

    /// How to measure similarity between two users
    #[arg(long, value_enum, default_value_t = Metric::Mad)]
    metric: Metric,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Metric {
    /// Inverted mean absolute difference over co-rated movies
    Mad,
    /// Cosine similarity over co-rated movies
    Cosine,
}

#[derive(Args)]
struct RecommendArgs {
    /// User ID to compute the list for
    #[arg(long)]
    user_id: UserId,

    /// Maximum number of movies to return
    #[arg(long, default_value = "10")]
    limit: usize,

    /// Write titles to this file, one per line, instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show which similar user the list came from
    #[arg(long)]
    explain: bool,

    /// Print the result as JSON; with --explain the neighbour is included
    #[arg(long, conflicts_with = "output")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies the most similar user rated 5
    Recommend(RecommendArgs),

    /// List movies to avoid: ones the most similar user rated 1
    AntiRecommend(RecommendArgs),

    /// Show user profile and nearest neighbours
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,

        /// Number of similar users to list
        #[arg(long, default_value = "5")]
        neighbours: usize,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dataset = Dataset::load_from_files(&cli.movies, &cli.ratings)
        .context("Failed to load ratings dataset")?;
    let (users, ratings) = dataset.registry.counts();
    eprintln!(
        "{} Loaded {} users, {} ratings, {} movies in {:?}",
        "✓".green(),
        users,
        ratings,
        dataset.titles.len(),
        start.elapsed()
    );

    let engine = SimilarityEngine::new(&dataset.registry);
    let engine = match cli.metric {
        Metric::Mad => engine.with_metric(MeanAbsoluteDifference),
        Metric::Cosine => engine.with_metric(Cosine),
    };
    info!("Using {} similarity", engine.metric_name());
    let recommender = Recommender::with_engine(engine);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend(args) => {
            handle_recommend(&dataset, &recommender, args, Polarity::Recommend)?
        }
        Commands::AntiRecommend(args) => {
            handle_recommend(&dataset, &recommender, args, Polarity::Avoid)?
        }
        Commands::User {
            user_id,
            neighbours,
        } => handle_user(&dataset, &recommender, user_id, neighbours)?,
        Commands::Search { title } => handle_search(&dataset, &title),
        Commands::Benchmark { requests } => handle_benchmark(&dataset, &recommender, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' and 'anti-recommend' commands
fn handle_recommend(
    dataset: &Dataset,
    recommender: &Recommender<'_>,
    args: RecommendArgs,
    polarity: Polarity,
) -> Result<()> {
    let recommendation = recommender
        .compute(args.user_id, args.limit, polarity)
        .with_context(|| format!("Could not compute recommendations for user {}", args.user_id))?;

    let movies = writer::resolve_titles(&recommendation.movie_ids, &dataset.titles);

    if args.json {
        // Nothing but the JSON document goes to stdout
        let json = if args.explain {
            serde_json::to_string_pretty(&writer::ExplainedMovies {
                similar_user: recommendation.similar_user,
                movies: &movies,
            })?
        } else {
            serde_json::to_string_pretty(&movies)?
        };
        println!("{}", json);
        return Ok(());
    }

    if let Some(path) = &args.output {
        let written = writer::write_titles_file(path, &movies)?;
        println!("{} Wrote {} titles to {}", "✓".green(), written, path.display());
    } else {
        print_recommendations(&recommendation, &movies);
    }

    if args.explain {
        print_explanation(dataset, &recommendation)?;
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(
    dataset: &Dataset,
    recommender: &Recommender<'_>,
    user_id: UserId,
    neighbours: usize,
) -> Result<()> {
    let user = dataset.registry.get(user_id)?;

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    println!("{}Number of ratings: {}", "• ".cyan(), user.len());
    println!("{}Average rating: {:.2}", "• ".cyan(), user.average_rating());

    println!("Top rated movies:");
    for record in user.ratings().iter().take(5) {
        let title = dataset.titles.title(record.movie_id).unwrap_or("<unknown title>");
        println!("  - {} (Rating: {})", title, record.value);
    }

    println!("Least favourite movies:");
    for record in user.ratings().iter().rev().take(5) {
        let title = dataset.titles.title(record.movie_id).unwrap_or("<unknown title>");
        println!("  - {} (Rating: {})", title, record.value);
    }

    let ranked = recommender.engine().rank_similar(user_id, neighbours)?;
    println!("Most similar users ({}):", recommender.engine().metric_name());
    for scored in ranked {
        let score = scored
            .score
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  - User {}: score {} ({} movies in common)",
            scored.user_id, score, scored.co_rated
        );
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(dataset: &Dataset, title: &str) {
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for movie in dataset.titles.search(title).into_iter().take(20) {
        println!("{}: {} [{}]", movie.id, movie.title, movie.genres.join(", "));
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    dataset: &Dataset,
    recommender: &Recommender<'_>,
    requests: usize,
) -> Result<()> {
    let user_ids = dataset.registry.user_ids();
    if user_ids.is_empty() || requests == 0 {
        warn!("Nothing to benchmark");
        return Ok(());
    }

    let mut rng = rand::rng();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for _ in 0..requests {
        let Some(&user_id) = user_ids.choose(&mut rng) else {
            break;
        };
        let start = Instant::now();
        if let Err(err) = recommender.recommend(user_id, 20) {
            warn!(user_id, "Request failed: {}", err);
        }
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile =
        |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print the titles with a header and rank numbers
fn print_recommendations(recommendation: &Recommendation, movies: &[writer::TitledMovie<'_>]) {
    let header = match recommendation.polarity {
        Polarity::Recommend => "Movie Recommendations:",
        Polarity::Avoid => "Movies to Avoid:",
    };
    println!("{}", header.bold().blue());

    if movies.is_empty() {
        println!("  (nothing qualified)");
        return;
    }
    for (i, movie) in movies.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), movie.title);
    }
}

fn print_explanation(dataset: &Dataset, recommendation: &Recommendation) -> Result<()> {
    let similar = dataset.registry.get(recommendation.similar_user)?;
    let target = dataset.registry.get(recommendation.target_user)?;
    let shared = target
        .ratings()
        .iter()
        .filter(|r| similar.has_rated(r.movie_id))
        .count();

    let mark = match recommendation.polarity {
        Polarity::Recommend => 5,
        Polarity::Avoid => 1,
    };
    println!(
        "   Explanation: user {} is most similar to user {} ({} movies in common); \
         listed movies were rated {} by user {} and not yet rated by user {}",
        recommendation.target_user,
        recommendation.similar_user,
        shared,
        mark,
        recommendation.similar_user,
        recommendation.target_user
    );
    Ok(())
}
