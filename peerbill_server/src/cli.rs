use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Private keys and passwords are deliberately absent from this list
    const DISPLAY_ENVS: [&str; 19] = [
        "RUST_LOG",
        "PBG_GRPC_SERVER_ADDR",
        "PBG_HTTP_SERVER_ADDR",
        "PBG_WEBSOCKET_SERVER_ADDR",
        "PBG_ALLOWED_ORIGINS",
        "PBG_DB_DRIVER",
        "PBG_DB_SOURCE",
        "PBG_MIGRATION_URL",
        "PBG_TRADER_API_URL",
        "PBG_RATES_API_URL",
        "PBG_ETH_RPC_URL",
        "PBG_BSC_RPC_URL",
        "PBG_TRANSFER_CONFIRMATION",
        "PBG_TRANSFER_SETTLE_DELAY_SECS",
        "PBG_TRANSFER_CONFIRM_TIMEOUT_SECS",
        "PBG_TOKEN_GAS_FUNDING",
        "PBG_EMAIL_SENDER_NAME",
        "PBG_EMAIL_SENDER_ADDRESS",
        "PBG_DB_MAX_CONNECTIONS",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
