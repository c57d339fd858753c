use anyhow::Result;
use clap::Parser;
use slither::game::GameConfig;
use slither::modes::PlayMode;

#[derive(Parser)]
#[command(name = "slither")]
#[command(version, about = "Joystick-style snake arcade game in the terminal")]
struct Cli {
    /// Play-area width in world units
    #[arg(long, default_value = "800.0")]
    width: f32,

    /// Play-area height in world units
    #[arg(long, default_value = "480.0")]
    height: f32,

    /// Number of body segments the snake starts with
    #[arg(long, default_value = "2")]
    bodies: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    slither::logger::init()?;

    let cli = Cli::parse();
    let config = GameConfig::new(cli.width, cli.height).with_initial_body_count(cli.bodies);

    let mut play = PlayMode::new(config);
    play.run().await?;

    Ok(())
}
