use life_window::{config, Game, WindowBackend};

fn main() -> Result<(), life_window::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut backend = WindowBackend::new(
        config::WINDOW_TITLE,
        config::WINDOW_WIDTH,
        config::WINDOW_HEIGHT,
    )?;

    let mut game = Game::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT);
    game.run(&mut backend);

    Ok(())
}
