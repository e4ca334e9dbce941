use std::env;

use bank_eng::csv::{read_intents, write_customers};
use bank_eng::seed;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).expect("usage: bank-eng <intents.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let mut engine = seed::engine();
    let (intent_sender, intent_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_intents(&path) {
            match result {
                Ok(intent) => {
                    intent_sender.send(intent).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    engine.run(ReceiverStream::new(intent_receiver)).await;

    let mut customers: Vec<_> = engine.customers().collect();
    customers.sort_by_key(|c| c.id);
    write_customers(customers);
}
