//! Lights every button while it's held down and cycles through the scenes with the jog wheel.
//!
//! Usage: `cargo run --example scene_cycler -- <input port> <output port>`
//!
//! Without arguments, the available ports are listed. Set `RUST_LOG=debug` to see every message.
use nanokontrol::studio::{self, Input, Message, Output, Router};
use nanokontrol::{InputDevice as _, MsgPollingWrapper as _, OutputDevice as _};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let midi_input = nanokontrol::open_input()?;
    let midi_output = nanokontrol::open_output()?;

    let mut args = std::env::args().skip(1).map(|arg| arg.parse::<usize>());
    let (input_index, output_index) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input?, output?),
        _ => {
            println!("Inputs:");
            for (i, port) in midi_input.ports().iter().enumerate() {
                println!("  {}: {}", i, midi_input.port_name(port)?);
            }
            println!("Outputs:");
            for (i, port) in midi_output.ports().iter().enumerate() {
                println!("  {}: {}", i, midi_output.port_name(port)?);
            }
            return Ok(());
        }
    };

    let input_ports = midi_input.ports();
    let output_ports = midi_output.ports();
    let (input_port, output_port) = match (input_ports.get(input_index), output_ports.get(output_index)) {
        (Some(input_port), Some(output_port)) => (input_port, output_port),
        _ => {
            log::error!("No such port: {} / {}", input_index, output_index);
            return Ok(());
        }
    };
    log::debug!("Input device: {}", midi_input.port_name(input_port)?);
    log::debug!("Output device: {}", midi_output.port_name(output_port)?);

    let output: Output = match Output::from_port(midi_output, output_port) {
        Ok(output) => output,
        Err(e) => {
            log::error!("Cannot open MIDI port: {}", e);
            return Err(e.into());
        }
    };
    let mut router = Router::new(output);
    let input = Input::from_port_polling(midi_input, input_port)?;

    for msg in input.iter() {
        router.observe(&msg);

        match msg {
            Message::Press { address } => router.light(address, true)?,
            Message::Release { address } => router.light(address, false)?,
            Message::JogwheelTurned { direction } => {
                let scene = studio::next_scene(router.current_scene(), direction);
                router.set_scene(scene)?;
            }
            Message::SceneChanged { scene } => println!("Scene {}", scene),
            _ => {}
        }
    }

    Ok(())
}
