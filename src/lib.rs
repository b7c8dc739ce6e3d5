/*!
An interfacing library for the Korg nanoKONTROL Studio, translating between the raw MIDI messages
of the device and named controls.

# Reading the controls

The device is identified by wire addresses that mostly, but not always, follow a per-lane
pattern. The [`studio::TABLE`] knows all of them, and [`studio::Input`] uses it to turn incoming
messages into [`studio::Message`]s:

```no_run
use nanokontrol::{InputDevice as _, MsgPollingWrapper as _};
use nanokontrol::studio::{Input, Message};

let midi_input = nanokontrol::open_input()?;
let ports = midi_input.ports();
let input = Input::from_port_polling(midi_input, &ports[0])?; // picking the right port is up to you

for msg in input.iter() {
    match msg {
        Message::Press { .. } => println!("{} pressed", msg.control().unwrap()),
        Message::SliderChanged { lane, value } => println!("slider {} at {}", lane.index(), value),
        _ => {},
    }
}
# Ok::<(), nanokontrol::MidiError>(())
```

# Talking back

Every function of [`studio::Output`] corresponds to exactly one MIDI message. [`studio::Router`]
wraps an output and additionally keeps track of the scene the device is in:

```no_run
use nanokontrol::OutputDevice as _;
use nanokontrol::studio::{ControlIdentity, Output, Router, Transport};

let midi_output = nanokontrol::open_output()?;
let ports = midi_output.ports();
let output: Output = Output::from_port(midi_output, &ports[0])?;
let mut router = Router::new(output);

router.set_scene(2)?;
router.light_control(ControlIdentity::Transport(Transport::Play), true)?;
assert_eq!(router.current_scene(), Some(2));
# Ok::<(), nanokontrol::MidiError>(())
```

Nothing in here searches for devices - the host decides which ports to connect to.
*/

mod midi_io;
pub use midi_io::*;

mod errors;
pub use errors::*;

pub mod nanokontrol_studio;
pub use nanokontrol_studio as studio;

pub mod prelude {
	pub use crate::midi_io::{InputDevice, MidiSink, MsgPollingWrapper, OutputDevice};
	pub use crate::nanokontrol_studio::{ControlIdentity, Message, Router};
}

/// Identifier used for e.g. the midi port names etc.
const APPLICATION_NAME: &str = "nanokontrol";
