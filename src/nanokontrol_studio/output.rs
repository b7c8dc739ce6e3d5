use midir::MidiOutputConnection;

use super::{ControlAddress, ControlIdentity, PressStatus, TABLE};
use crate::{MidiError, MidiSink};

/// Every SysEx message to the device starts with this: SysEx start, Korg, channel 1, the
/// nanoKONTROL Studio product ID
pub const SYSEX_HEADER: [u8; 6] = [0xF0, 0x42, 0x40, 0x00, 0x01, 0x37];
const SYSEX_END: u8 = 0xF7;
const CMD_CC: u8 = 176;

/// Wrap `payload` in the device's SysEx header and terminator.
pub fn sysex_frame(payload: &[u8]) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(SYSEX_HEADER.len() + payload.len() + 1);
	bytes.extend(&SYSEX_HEADER);
	bytes.extend(payload);
	bytes.push(SYSEX_END);
	bytes
}

/// The nanoKONTROL Studio output connection handler.
///
/// Every method sends exactly one MIDI message. By default the messages go to a midir connection,
/// but any [`MidiSink`] works.
pub struct Output<S = MidiOutputConnection> {
	sink: S,
}

impl crate::OutputDevice for Output {
	const MIDI_CONNECTION_NAME: &'static str = "nanoKONTROL Studio output";

	fn from_connection(connection: MidiOutputConnection) -> Result<Self, MidiError> {
		Ok(Self::new(connection))
	}

	fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
		self.sink.send_bytes(bytes)
	}
}

impl<S: MidiSink> Output<S> {
	pub fn new(sink: S) -> Self {
		Self { sink }
	}

	pub fn sink(&self) -> &S { &self.sink }

	pub fn into_sink(self) -> S { self.sink }

	/// Send a SysEx message with the given payload.
	pub fn send_sysex(&mut self, payload: &[u8]) -> Result<(), MidiError> {
		self.sink.send_bytes(&sysex_frame(payload))
	}

	/// Switch the device to the given scene, counted from 1. The device has [`super::SCENE_COUNT`]
	/// scenes; other numbers are sent as they are and it's up to the device what to make of them.
	pub fn change_scene(&mut self, scene: u8) -> Result<(), MidiError> {
		log::debug!("Setting scene: {}", scene);
		self.send_sysex(&[0x02, 0x00, 0x00, 0x14, scene.wrapping_sub(1)])
	}

	/// Switch the LED of the control at `address` on or off.
	///
	/// The address isn't checked against the address table, so this also reaches addresses that
	/// aren't known to this library.
	pub fn light(&mut self, address: ControlAddress, on: bool) -> Result<(), MidiError> {
		let status = if on { PressStatus::ON } else { PressStatus::OFF };
		match TABLE.identity_of_button(address) {
			Ok(control) => log::debug!("Setting button light: {} to {}", control, on),
			Err(_) => log::debug!("Setting light at unknown address {} to {}", address.get(), on),
		}
		self.sink.send_bytes(&[CMD_CC, address.get(), status])
	}

	/// Same as [`Self::light`], addressing the control by name.
	pub fn light_control(&mut self, control: ControlIdentity, on: bool) -> Result<(), MidiError> {
		self.light(TABLE.address_of(control), on)
	}
}
