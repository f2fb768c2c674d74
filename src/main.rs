use cep_weather::{app, ServeArgs, ServiceVariant};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cep-weather")]
#[command(about = "Temperature by CEP: resolves the city via ViaCEP, then asks WeatherAPI")]
struct Args {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = app::run(ServiceVariant::Orchestration, args.serve).await {
        tracing::error!("❌ Service failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
