use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use prize_wheel::{ConfigFile, Wheel, WheelCommand, WheelConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Spin a prize wheel and show where it lands", long_about = None)]
struct Args {
    /// Wheel face image (8 equal wedges)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// TrueType/OpenType font for the result text
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// TOML file overriding the built-in settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window title
    #[arg(short, long)]
    title: Option<String>,

    /// Read commands from stdin: `spin`, `stop`, or a speed in rad/frame
    #[arg(long)]
    stdin: bool,
}

fn load_config(args: &Args) -> anyhow::Result<WheelConfig> {
    let mut file = match &args.config {
        Some(path) => ConfigFile::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConfigFile::default(),
    };
    // command line beats the file
    if args.image.is_some() {
        file.image_path = args.image.clone();
    }
    if args.font.is_some() {
        file.font_path = args.font.clone();
    }
    if args.title.is_some() {
        file.title = args.title.clone();
    }
    file.into_config().context("checking settings")
}

fn spawn_stdin_reader(sender: mpsc::Sender<WheelCommand>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match line.parse::<WheelCommand>() {
                Ok(command) => {
                    let stop = command == WheelCommand::Stop;
                    if sender.send(command).is_err() || stop {
                        break;
                    }
                }
                Err(err) => log::warn!("{err}"),
            }
        }
    });
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let wheel = Wheel::new(config);

    if args.stdin {
        let (sender, receiver) = mpsc::channel();
        spawn_stdin_reader(sender);
        wheel.show_with_commands(receiver)?;
    } else {
        wheel.show()?;
    }
    Ok(())
}
