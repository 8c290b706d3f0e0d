use business_dashboard::{ApiClient, BusinessApi, Dashboard};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin, stdin};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_API_URL: &str = "http://localhost:5000";

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let base_url = std::env::var("DASHBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
    let api = ApiClient::new(base_url);
    let mut input = BufReader::new(stdin()).lines();
    let mut dashboard = Dashboard::new();

    loop {
        let Some(name) = prompt(&mut input, "Business Name (e.g. Cake & Co): ").await? else {
            return Ok(());
        };
        dashboard.set_name(name);

        let Some(location) = prompt(&mut input, "Location (e.g. Mumbai): ").await? else {
            return Ok(());
        };
        dashboard.set_location(location);

        let Some(request) = dashboard.begin_submit() else {
            println!("{}", dashboard.view());
            continue;
        };
        println!("{}", dashboard.view());

        let result = api.fetch_profile(&request.name, &request.location).await;
        dashboard.finish_submit(result);
        println!("{}", dashboard.view());

        if dashboard.profile().is_none() {
            continue;
        }

        loop {
            let Some(action) =
                prompt(&mut input, "[h] new headline  [n] new search  [q] quit: ").await?
            else {
                return Ok(());
            };

            match action.trim() {
                "h" => {
                    dashboard.regenerate(&api).await;
                    println!("{}", dashboard.view());
                }
                "n" => break,
                "q" => return Ok(()),
                _ => {}
            }
        }
    }
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
