use anyhow::Result;
use clap::{Parser, ValueEnum};

use podsight_k8s::{ConnectionMode, KubeClient, list_events, summarize_pods};
use podsight_types::{EventSummary, PodSummary};

/// Podsight - pod status summaries for a Kubernetes namespace
#[derive(Parser, Debug)]
#[command(name = "podsight")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Namespace to query (empty means "default")
    #[arg(value_name = "NAMESPACE", default_value = "")]
    namespace: String,

    /// How to authenticate to the cluster
    #[arg(long, value_enum, default_value_t = Mode::Kubeconfig)]
    mode: Mode,

    /// Also print the events recorded in the namespace
    #[arg(long)]
    events: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Output::Table)]
    output: Output,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    InCluster,
    Kubeconfig,
}

impl From<Mode> for ConnectionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::InCluster => ConnectionMode::InCluster,
            Mode::Kubeconfig => ConnectionMode::Kubeconfig,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    let client = KubeClient::new(args.mode.into()).await?;

    let pods = summarize_pods(&client, &args.namespace).await?;
    match args.output {
        Output::Table => print_pods(&pods),
        Output::Json => println!("{}", serde_json::to_string_pretty(&pods)?),
    }

    if args.events {
        let events = list_events(&client, &args.namespace).await?;
        match args.output {
            Output::Table => print_events(&events),
            Output::Json => println!("{}", serde_json::to_string_pretty(&events)?),
        }
    }

    Ok(())
}

fn print_pods(pods: &[PodSummary]) {
    println!(
        "{:<52} {:<20} {:>8} {:>10}",
        "NAME", "STATUS", "RESTARTS", "AGE"
    );
    for pod in pods {
        println!(
            "{:<52} {:<20} {:>8} {:>9}s",
            pod.name,
            pod.status,
            pod.restart_count,
            pod.uptime_seconds.round() as i64
        );
    }
}

fn print_events(events: &[EventSummary]) {
    println!();
    println!(
        "{:<10} {:<24} {:<32} {:>6}  {}",
        "TYPE", "REASON", "OBJECT", "COUNT", "MESSAGE"
    );
    for event in events {
        println!(
            "{:<10} {:<24} {:<32} {:>6}  {}",
            event.kind, event.reason, event.object, event.count, event.message
        );
    }
}
