use axum::ServiceExt;
use axum::extract::Request;
use dotenvy::dotenv;
use drivewise::drivewise_config::ServerConfig;
use drivewise::logging::init_tracing;
use drivewise::router::init_app;
use drivewise::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = init_tracing();

    let state = init_app_state().await?;
    let app = init_app(state);

    let server_config = ServerConfig::from_env();
    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(%address, "Server listening");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
