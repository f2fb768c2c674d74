use cep_weather::{app, ServeArgs, ServiceVariant};
use clap::Parser;

#[derive(Parser)]
#[command(name = "cep-weather-input")]
#[command(about = "Validates a CEP posted as JSON and forwards it to the temperature service")]
struct Args {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = app::run(ServiceVariant::Input, args.serve).await {
        tracing::error!("❌ Service failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
