//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Starting Rankboard");

    let config = rankboard_app::AppConfig::parse();

    let board = match rankboard_app::load_board(&config.words, config.board.clone()) {
        Ok(board) => board,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    println!("{}", board.ranking_text());

    let mut clipboard = rankboard_app::SystemClipboard::new().waiting(config.wait_clipboard);
    for notice in rankboard_app::run_exports(&board, &mut clipboard, config.cloud_out.as_deref()) {
        eprintln!("{}", notice);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
