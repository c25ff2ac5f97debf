use aws_config::BehaviorVersion;
use axum::Router;
use domain::medications::cqrs;
use meds_api::{router, AppState, Config, Store};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env()?;
    let nerve = kilo_nerve::build(&config.nerve)?;

    tracing::info!(
        "Meds service starting with {:?} store, KiloNerve {}",
        config.store,
        if config.nerve.enabled { config.nerve.base_url.as_str() } else { "disabled" }
    );

    let app = match config.store {
        Store::Dynamo => {
            let aws = aws_config::defaults(BehaviorVersion::latest()).load().await;
            let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws);

            let (medications_cqrs, medications_repo) = cqrs::init(dynamodb_client);

            router(AppState::new(medications_cqrs, medications_repo, nerve))
        }
        Store::Memory => {
            let (medications_cqrs, medications_repo) = cqrs::init_in_memory();

            router(AppState::new(medications_cqrs, medications_repo, nerve))
        }
    };

    run(app, config.listen_addr).await
}

async fn run(app: Router, listen_addr: Option<SocketAddr>) -> Result<(), lambda_http::Error> {
    match listen_addr {
        Some(addr) => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!("Listening on {}", addr);
            axum::serve(listener, app).await?;
        }
        None => {
            let app = tower::ServiceBuilder::new()
                .layer(axum_aws_lambda::LambdaLayer::default())
                .service(app);

            lambda_http::run(app).await?;
        }
    }

    Ok(())
}
