//! faas-bench - gateway round-trip benchmark
//!
//! Deploys a throwaway function, times single and concurrent invocations of
//! it for a number of iterations, reports the averages and removes it again.
//!
//! Configured through the environment:
//! `FAASHOST`, `FAASUSERNAME`, `FAASPASSWORD`, `FAASITERATIONS`, `FAASIMAGE`
//! and `RUST_LOG`.

use faas_client::prelude::*;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const FANOUT: [&str; 10] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
];

/// Benchmark settings read from the environment.
#[derive(Debug, Clone)]
struct BenchConfig {
    host: String,
    username: Option<String>,
    password: Option<String>,
    iterations: usize,
    image: String,
}

impl BenchConfig {
    fn from_env() -> Self {
        let iterations = match std::env::var("FAASITERATIONS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid FAASITERATIONS={:?}, using 100", raw);
                100
            }),
            Err(_) => 100,
        };

        Self {
            host: std::env::var("FAASHOST")
                .unwrap_or_else(|_| faas_client::client::DEFAULT_GATEWAY.to_string()),
            username: std::env::var("FAASUSERNAME").ok(),
            password: std::env::var("FAASPASSWORD").ok(),
            iterations,
            image: std::env::var("FAASIMAGE")
                .unwrap_or_else(|_| "functions/figlet:latest".to_string()),
        }
    }

    fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::new();
        if let Some(username) = &self.username {
            options = options.username(username.clone());
        }
        if let Some(password) = &self.password {
            options = options.password(password.clone());
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BenchConfig::from_env();
    let client = FaasClient::new(config.host.clone(), config.client_options());
    let name = format!("faas-bench-figlet-{}", unique_suffix());

    info!("Deploying {} from {}", name, config.image);
    let deployed = client
        .deploy(&name, &config.image, DeployOptions::default())
        .await?;
    info!("Deploy answered: {:?}", deployed);
    info!("Inspect: {:?}", client.inspect(&name).await?);

    info!("Waiting for {} to be ready", name);
    client
        .invoke(&name, Some("Hello World".into()), InvokeOptions::default())
        .await?;

    let mut single = Vec::with_capacity(config.iterations);
    let mut fanout = Vec::with_capacity(config.iterations);

    for iteration in 0..config.iterations {
        info!("Running iteration {}", iteration);
        match run_iteration(&client, &name).await {
            Ok((one, many)) => {
                single.push(one);
                fanout.push(many);
            }
            Err(e) => error!("Iteration {} failed: {}", iteration, e),
        }
    }

    info!("Average over {} iterations:", config.iterations);
    info!("Executing one: {:.2}ms", average_millis(&single));
    info!("Executing {}: {:.2}ms", FANOUT.len(), average_millis(&fanout));

    info!("Removing {}", name);
    let removed = client.remove(&name).await?;
    info!("Remove answered: {:?}", removed);

    Ok(())
}

/// Time one invocation, then `FANOUT.len()` overlapping ones.
async fn run_iteration(client: &FaasClient, name: &str) -> Result<(Duration, Duration), BoxError> {
    let started = Instant::now();
    client
        .invoke(name, Some("Hello World".into()), InvokeOptions::default())
        .await?;
    let one = started.elapsed();
    info!("Time to run 1 invocation: {:.2}ms", as_millis(one));

    let started = Instant::now();
    let mut calls = JoinSet::new();
    for word in FANOUT {
        let client = client.clone();
        let name = name.to_string();
        calls.spawn(async move {
            client
                .invoke(
                    &name,
                    Some(format!("Hello World {}", word).into()),
                    InvokeOptions::default(),
                )
                .await
        });
    }
    while let Some(joined) = calls.join_next().await {
        joined??;
    }
    let many = started.elapsed();
    info!("Time to run {} invocations: {:.2}ms", FANOUT.len(), as_millis(many));

    info!("Inspect: {:?}", client.inspect(name).await?);
    Ok((one, many))
}

fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn average_millis(samples: &[Duration]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().copied().map(as_millis).sum::<f64>() / samples.len() as f64
}

/// Generate a unique function name suffix.
fn unique_suffix() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    format!("{:x}", timestamp)
}
