use prize_wheel::{Wheel, WheelCommand, WheelConfig};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Faster stop than the stock wheel so results come round quickly
    let config = WheelConfig::builder()
        .title("Prize Wheel - auto spin".to_string())
        .deceleration(0.004)
        .build();

    let wheel = Wheel::new(config);

    let (sender, receiver) = mpsc::channel();

    // Spawn a thread that keeps asking for spins; requests mid-spin are ignored
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let command = if rng.random_bool(0.5) {
                WheelCommand::Spin
            } else {
                WheelCommand::SpinWithSpeed(rng.random_range(0.2..0.6))
            };
            if sender.send(command).is_err() {
                break;
            }
            thread::sleep(Duration::from_secs(3));
        }
    });

    println!("Spinning the wheel every few seconds. Close the window to exit.");

    wheel.show_with_commands(receiver)?;
    Ok(())
}
