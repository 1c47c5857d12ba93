use dotenvy::dotenv;
use log::{error, info};
use peerbill_server::{cli::handle_command_line_args, config::ServerConfig, server::run_server};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = ServerConfig::from_env_or_default();
    if let Err(e) = config.validate() {
        error!("🪛️ {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }

    info!("🚀️ Starting Peerbill gateway");
    match run_server(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
