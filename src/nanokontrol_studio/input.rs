use std::convert::TryFrom;

use super::{ControlAddress, ControlIdentity, JogwheelDirection, Lane, PressStatus, TABLE};

const CMD_NOTE: u8 = 144;
const CMD_CC: u8 = 176;
const CHANNEL_COUNT: u8 = 16;

/// Length of the SysEx message the device sends when the scene was changed on the device
const SCENE_MESSAGE_LEN: usize = 12;
/// Position of the zero-based scene index in that message
const SCENE_INDEX_BYTE: usize = 10;

#[derive(Debug, Eq, PartialEq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
	/// When a button is pressed
	Press { address: ControlAddress },

	/// When a button is released
	Release { address: ControlAddress },

	/// When a rotary has been turned. `value` is the raw 0-127 position
	RotaryChanged { lane: Lane, value: u8 },

	/// When a slider has been moved. `value` is the raw 0-127 position
	SliderChanged { lane: Lane, value: u8 },

	/// When the jog wheel has been turned by one step
	JogwheelTurned { direction: JogwheelDirection },

	/// When the scene was changed using the Scene button on the device. `scene` counts from 1
	SceneChanged { scene: u8 },
}

impl Message {
	/// The control this message originates from, if any
	pub fn control(&self) -> Option<ControlIdentity> {
		match *self {
			Self::Press { address } | Self::Release { address } => TABLE.identity_of_button(address).ok(),
			Self::RotaryChanged { lane, .. } => Some(ControlIdentity::Rotary(lane)),
			Self::SliderChanged { lane, .. } => Some(ControlIdentity::Slider(lane)),
			Self::JogwheelTurned { .. } => Some(ControlIdentity::Jogwheel),
			Self::SceneChanged { .. } => None,
		}
	}

	pub fn is_press(&self) -> bool { matches!(self, Self::Press { .. }) }
	pub fn is_release(&self) -> bool { matches!(self, Self::Release { .. }) }
}

/// The nanoKONTROL Studio input connection creator.
pub struct Input;

/// The 1-based channel of a control change or note on message, `None` for every other status byte
fn channel(status: u8) -> Option<u8> {
	if (CMD_CC..CMD_CC + CHANNEL_COUNT).contains(&status) {
		Some(status - CMD_CC + 1)
	} else if (CMD_NOTE..CMD_NOTE + CHANNEL_COUNT).contains(&status) {
		Some(status - CMD_NOTE + 1)
	} else {
		None
	}
}

impl Input {
	fn decode_short_message(status: u8, address: u8, value: u8) -> Option<Message> {
		let channel = match channel(status) {
			Some(channel) => channel,
			None => {
				log::debug!("Ignoring message with status byte {}", status);
				return None;
			},
		};
		let address = ControlAddress::try_from(address).ok()?;

		// The order matters here: if an address was ever shared between two kinds of control,
		// buttons win over rotaries, rotaries over sliders, and sliders over the jog wheel
		let msg = if TABLE.is_button_address(address) {
			match value {
				PressStatus::ON => Message::Press { address },
				_ => Message::Release { address },
			}
		} else if let Some(lane) = TABLE.lane_of_rotary(address) {
			Message::RotaryChanged { lane, value }
		} else if let Some(lane) = TABLE.lane_of_slider(address) {
			Message::SliderChanged { lane, value }
		} else if address == TABLE.jogwheel() {
			Message::JogwheelTurned { direction: JogwheelDirection::from_value(value) }
		} else {
			log::debug!("Ignoring message for unmapped address {} on channel {}", address.get(), channel);
			return None;
		};

		log::debug!("{:?} on channel {}", msg, channel);
		Some(msg)
	}

	fn decode_sysex_message(data: &[u8]) -> Message {
		let scene = data[SCENE_INDEX_BYTE].wrapping_add(1);
		log::debug!("Scene change: {}", scene);
		Message::SceneChanged { scene }
	}
}

impl crate::InputDevice for Input {
	const MIDI_CONNECTION_NAME: &'static str = "nanoKONTROL Studio input";
	type Message = Message;

	fn decode_message(_timestamp: u64, data: &[u8]) -> Option<Message> {
		log::debug!("MIDI message: {:?}", data);

		match *data {
			[status, address, value] => Self::decode_short_message(status, address, value),
			_ if data.len() == SCENE_MESSAGE_LEN => Some(Self::decode_sysex_message(data)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::studio::{LaneRole, Transport};
	use crate::InputDevice as _;

	fn decode(data: &[u8]) -> Option<Message> {
		Input::decode_message(0, data)
	}

	fn address_of(control: ControlIdentity) -> ControlAddress {
		TABLE.address_of(control)
	}

	const PLAY: ControlIdentity = ControlIdentity::Transport(Transport::Play);

	#[test]
	fn play_press_and_release() {
		let press = decode(&[176, 80, 127]).unwrap();
		assert_eq!(press, Message::Press { address: ControlAddress::new(80) });
		assert_eq!(press.control(), Some(PLAY));

		let release = decode(&[176, 80, 0]).unwrap();
		assert_eq!(release, Message::Release { address: ControlAddress::new(80) });
		assert_eq!(release.control(), Some(PLAY));
	}

	#[test]
	fn every_value_but_127_releases() {
		let mute = address_of(ControlIdentity::LaneControl { lane: Lane::new(2), role: LaneRole::Mute });
		for value in 0..127 {
			assert_eq!(decode(&[176, mute.get(), value]), Some(Message::Release { address: mute }));
		}
	}

	#[test]
	fn note_family_decodes_like_control_change() {
		for channel in 0..16 {
			assert_eq!(decode(&[176 + channel, 80, 127]), decode(&[144 + channel, 80, 127]));
			assert_eq!(decode(&[144 + channel, 13, 5]), Some(Message::RotaryChanged { lane: Lane::new(0), value: 5 }));
		}
	}

	#[test]
	fn rotary_change() {
		assert_eq!(decode(&[176, 13, 42]), Some(Message::RotaryChanged { lane: Lane::new(0), value: 42 }));
		assert_eq!(decode(&[176, 20, 0]), Some(Message::RotaryChanged { lane: Lane::new(7), value: 0 }));
	}

	#[test]
	fn slider_change() {
		assert_eq!(decode(&[176, 2, 100]), Some(Message::SliderChanged { lane: Lane::new(0), value: 100 }));
		assert_eq!(decode(&[176, 12, 127]), Some(Message::SliderChanged { lane: Lane::new(7), value: 127 }));
		assert_eq!(decode(&[176, 7, 127]), None);
	}

	#[test]
	fn jogwheel_direction() {
		let turn = |value| decode(&[176, 82, value]);
		assert_eq!(turn(1), Some(Message::JogwheelTurned { direction: JogwheelDirection::Right }));
		assert_eq!(turn(63), Some(Message::JogwheelTurned { direction: JogwheelDirection::Right }));
		assert_eq!(turn(64), Some(Message::JogwheelTurned { direction: JogwheelDirection::Left }));
		assert_eq!(turn(127), Some(Message::JogwheelTurned { direction: JogwheelDirection::Left }));
	}

	#[test]
	fn scene_change() {
		let data = [0xF0, 0x42, 0x40, 0x00, 0x01, 0x37, 0x02, 0x00, 0x00, 0x4F, 3, 0xF7];
		assert_eq!(decode(&data), Some(Message::SceneChanged { scene: 4 }));
		assert_eq!(decode(&data).unwrap().control(), None);
	}

	#[test]
	fn wrong_lengths_ignored() {
		assert_eq!(decode(&[]), None);
		assert_eq!(decode(&[176]), None);
		assert_eq!(decode(&[176, 80]), None);
		assert_eq!(decode(&[176, 80, 127, 0]), None);
		assert_eq!(decode(&[0; 11]), None);
		assert_eq!(decode(&[0; 13]), None);
	}

	#[test]
	fn other_status_bytes_ignored() {
		for status in (0..=255u8).filter(|s| !(144..160).contains(s) && !(176..192).contains(s)) {
			assert_eq!(decode(&[status, 80, 127]), None, "status {}", status);
		}
	}

	#[test]
	fn unmapped_addresses_ignored() {
		for address in [0, 1, 7, 10, 11, 32, 64, 79, 83, 127, 128, 255] {
			assert_eq!(decode(&[176, address, 127]), None, "address {}", address);
		}
	}
}
